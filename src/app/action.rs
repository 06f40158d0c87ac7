use crate::api::ListId;
use crate::app::event::RefreshTicket;

/// Side effects requested by the handler and executed by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Request(ApiRequest),
    Quit,
}

/// A single call against the to-do API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    FetchSummaries { ticket: RefreshTicket },
    CreateCollection { name: String },
    DeleteCollection { id: ListId },
    FetchList { id: ListId },
    CreateItem { list_id: ListId, label: String },
    SetItemChecked { list_id: ListId, item_id: String, checked: bool },
    DeleteItem { list_id: ListId, item_id: String },
}

impl From<ApiRequest> for Action {
    fn from(request: ApiRequest) -> Self {
        Action::Request(request)
    }
}
