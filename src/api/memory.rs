//! In-memory `TodoApi` used by tests in place of a live server.

use crate::api::{ApiError, ListId, ListSummary, TodoApi, TodoItem, TodoList};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Store {
    lists: Vec<TodoList>,
    next_id: u64,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct MemoryApi {
    store: Mutex<Store>,
    offline: AtomicBool,
}

impl MemoryApi {
    pub fn with_lists(names: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut store = api.store.lock().unwrap();
            for name in names {
                store.next_id += 1;
                let id = ListId::new(store.next_id.to_string());
                store.lists.push(TodoList {
                    id,
                    name: name.to_string(),
                    items: Vec::new(),
                });
            }
        }
        api
    }

    /// While offline every call fails with 503 and leaves the data untouched.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.store.lock().unwrap().calls.clone()
    }

    fn begin(&self, method: Method, path: String) -> Result<std::sync::MutexGuard<'_, Store>, ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("{} {}", method, path));
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                method,
                url: path,
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(store)
    }
}

fn not_found(method: Method, path: String) -> ApiError {
    ApiError::Status {
        method,
        url: path,
        status: StatusCode::NOT_FOUND,
    }
}

#[async_trait]
impl TodoApi for MemoryApi {
    async fn list_summaries(&self) -> Result<Vec<ListSummary>, ApiError> {
        let store = self.begin(Method::GET, "/api/lists".into())?;
        let mut rows: Vec<ListSummary> = store
            .lists
            .iter()
            .map(|l| ListSummary {
                id: l.id.clone(),
                name: l.name.clone(),
                item_count: l.items.len(),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn create_list(&self, name: &str) -> Result<(), ApiError> {
        let mut store = self.begin(Method::POST, "/api/lists/".into())?;
        store.next_id += 1;
        let id = ListId::new(store.next_id.to_string());
        store.lists.push(TodoList {
            id,
            name: name.to_string(),
            items: Vec::new(),
        });
        Ok(())
    }

    async fn delete_list(&self, id: &ListId) -> Result<(), ApiError> {
        let mut store = self.begin(Method::DELETE, format!("/api/lists/{}", id))?;
        store.lists.retain(|l| &l.id != id);
        Ok(())
    }

    async fn get_list(&self, id: &ListId) -> Result<TodoList, ApiError> {
        let path = format!("/api/lists/{}", id);
        let store = self.begin(Method::GET, path.clone())?;
        store
            .lists
            .iter()
            .find(|l| &l.id == id)
            .cloned()
            .ok_or_else(|| not_found(Method::GET, path))
    }

    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<(), ApiError> {
        let path = format!("/api/lists/{}/items", list_id);
        let mut store = self.begin(Method::POST, path.clone())?;
        store.next_id += 1;
        let item_id = format!("item-{}", store.next_id);
        let list = store
            .lists
            .iter_mut()
            .find(|l| &l.id == list_id)
            .ok_or_else(|| not_found(Method::POST, path))?;
        list.items.push(TodoItem {
            id: item_id,
            label: label.to_string(),
            checked: false,
        });
        Ok(())
    }

    async fn set_checked(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<(), ApiError> {
        let path = format!("/api/lists/{}/checked_state", list_id);
        let mut store = self.begin(Method::PUT, path.clone())?;
        let item = store
            .lists
            .iter_mut()
            .find(|l| &l.id == list_id)
            .and_then(|l| l.items.iter_mut().find(|i| i.id == item_id))
            .ok_or_else(|| not_found(Method::PUT, path))?;
        item.checked = checked;
        Ok(())
    }

    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/lists/{}/items/{}", list_id, item_id);
        let mut store = self.begin(Method::DELETE, path.clone())?;
        let list = store
            .lists
            .iter_mut()
            .find(|l| &l.id == list_id)
            .ok_or_else(|| not_found(Method::DELETE, path))?;
        list.items.retain(|i| i.id != item_id);
        Ok(())
    }
}
