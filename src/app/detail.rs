//! Single-collection view: loads one list's items and edits them.
//!
//! Like the controller, every item mutation is followed by a reload of the
//! open list once the request settles, successful or not.

use crate::api::{ApiError, ListId, TodoItem, TodoList};
use crate::app::action::{Action, ApiRequest};
use crate::app::event::ItemMutation;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct DetailState {
    pub list_id: Option<ListId>,
    pub list: Option<TodoList>,
    pub cursor: usize,
}

impl DetailState {
    pub fn open(&mut self, id: ListId) -> Vec<Action> {
        *self = DetailState {
            list_id: Some(id.clone()),
            list: None,
            cursor: 0,
        };
        self.reload()
    }

    pub fn close(&mut self) {
        *self = DetailState::default();
    }

    pub fn reload(&self) -> Vec<Action> {
        match &self.list_id {
            Some(id) => vec![ApiRequest::FetchList { id: id.clone() }.into()],
            None => vec![],
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        self.list
            .as_ref()
            .map(|l| l.items.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_item(&self) -> Option<&TodoItem> {
        self.items().get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items().len() {
            self.cursor += 1;
        }
    }

    /// Responses for a list that is no longer open are dropped.
    pub fn list_loaded(&mut self, id: ListId, result: Result<TodoList, ApiError>) {
        if self.list_id.as_ref() != Some(&id) {
            debug!(%id, "ignoring response for closed list");
            return;
        }
        match result {
            Ok(list) => {
                self.list = Some(list);
                let len = self.items().len();
                if self.cursor >= len {
                    self.cursor = len.saturating_sub(1);
                }
            }
            Err(e) => warn!(%id, error = %e, "loading list failed"),
        }
    }

    pub fn add_item(&self, label: String) -> Vec<Action> {
        match &self.list_id {
            Some(list_id) => vec![ApiRequest::CreateItem {
                list_id: list_id.clone(),
                label,
            }
            .into()],
            None => vec![],
        }
    }

    pub fn toggle_selected(&self) -> Vec<Action> {
        match (&self.list_id, self.selected_item()) {
            (Some(list_id), Some(item)) => vec![ApiRequest::SetItemChecked {
                list_id: list_id.clone(),
                item_id: item.id.clone(),
                checked: !item.checked,
            }
            .into()],
            _ => vec![],
        }
    }

    pub fn delete_selected(&self) -> Vec<Action> {
        match (&self.list_id, self.selected_item()) {
            (Some(list_id), Some(item)) => vec![ApiRequest::DeleteItem {
                list_id: list_id.clone(),
                item_id: item.id.clone(),
            }
            .into()],
            _ => vec![],
        }
    }

    pub fn item_mutated(
        &mut self,
        list_id: ListId,
        mutation: ItemMutation,
        result: Result<(), ApiError>,
    ) -> Vec<Action> {
        match (&mutation, result) {
            (ItemMutation::Create { label }, Ok(())) => info!(%list_id, %label, "item added"),
            (ItemMutation::SetChecked { item_id, checked }, Ok(())) => {
                info!(%list_id, %item_id, checked, "item updated")
            }
            (ItemMutation::Delete { item_id }, Ok(())) => info!(%list_id, %item_id, "item deleted"),
            (_, Err(e)) => warn!(%list_id, ?mutation, error = %e, "item request failed"),
        }
        if self.list_id.as_ref() == Some(&list_id) {
            self.reload()
        } else {
            vec![]
        }
    }
}
