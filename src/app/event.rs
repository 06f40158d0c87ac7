use crate::api::{ApiError, ListId, ListSummary, TodoList};
use crossterm::event::Event as CrosstermEvent;

/// Monotonic tag attached to each summary refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(pub u64);

/// Collection-level mutation whose completion triggers a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { name: String },
    Delete { id: ListId },
}

/// Item-level mutation inside the open collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemMutation {
    Create { label: String },
    SetChecked { item_id: String, checked: bool },
    Delete { item_id: String },
}

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Summary list request settled
    SummariesLoaded {
        ticket: RefreshTicket,
        result: Result<Vec<ListSummary>, ApiError>,
    },

    /// Create/delete collection request settled
    CollectionMutated {
        mutation: Mutation,
        result: Result<(), ApiError>,
    },

    /// Single collection request settled
    ListLoaded {
        id: ListId,
        result: Result<TodoList, ApiError>,
    },

    /// Item request settled
    ItemMutated {
        list_id: ListId,
        mutation: ItemMutation,
        result: Result<(), ApiError>,
    },

    /// Tick for the loading indicator
    Tick,
}
