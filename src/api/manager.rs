use crate::api::TodoApi;
use crate::app::action::ApiRequest;
use crate::app::event::{AppEvent, ItemMutation, Mutation};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs API requests off the event loop.
///
/// Each request becomes its own task and reports back with exactly one
/// `AppEvent`. Nothing is cancelled or deduplicated, so overlapping requests
/// all settle and their events arrive in completion order.
pub struct ApiManager {
    api: Arc<dyn TodoApi>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ApiManager {
    pub fn new(api: Arc<dyn TodoApi>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { api, event_tx }
    }

    pub fn dispatch(&self, request: ApiRequest) -> JoinHandle<()> {
        debug!(?request, "dispatching request");
        let api = Arc::clone(&self.api);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let event = match request {
                ApiRequest::FetchSummaries { ticket } => AppEvent::SummariesLoaded {
                    ticket,
                    result: api.list_summaries().await,
                },
                ApiRequest::CreateCollection { name } => {
                    let result = api.create_list(&name).await;
                    AppEvent::CollectionMutated {
                        mutation: Mutation::Create { name },
                        result,
                    }
                }
                ApiRequest::DeleteCollection { id } => {
                    let result = api.delete_list(&id).await;
                    AppEvent::CollectionMutated {
                        mutation: Mutation::Delete { id },
                        result,
                    }
                }
                ApiRequest::FetchList { id } => {
                    let result = api.get_list(&id).await;
                    AppEvent::ListLoaded { id, result }
                }
                ApiRequest::CreateItem { list_id, label } => {
                    let result = api.create_item(&list_id, &label).await;
                    AppEvent::ItemMutated {
                        list_id,
                        mutation: ItemMutation::Create { label },
                        result,
                    }
                }
                ApiRequest::SetItemChecked {
                    list_id,
                    item_id,
                    checked,
                } => {
                    let result = api.set_checked(&list_id, &item_id, checked).await;
                    AppEvent::ItemMutated {
                        list_id,
                        mutation: ItemMutation::SetChecked { item_id, checked },
                        result,
                    }
                }
                ApiRequest::DeleteItem { list_id, item_id } => {
                    let result = api.delete_item(&list_id, &item_id).await;
                    AppEvent::ItemMutated {
                        list_id,
                        mutation: ItemMutation::Delete { item_id },
                        result,
                    }
                }
            };

            // Receiver gone means the app is shutting down
            let _ = event_tx.send(event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryApi;
    use crate::api::ListId;
    use crate::app::event::RefreshTicket;

    #[tokio::test]
    async fn test_each_request_reports_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = ApiManager::new(Arc::new(MemoryApi::with_lists(&["Groceries"])), tx);

        manager
            .dispatch(ApiRequest::FetchSummaries {
                ticket: RefreshTicket(4),
            })
            .await
            .unwrap();
        match rx.recv().await.unwrap() {
            AppEvent::SummariesLoaded { ticket, result } => {
                assert_eq!(ticket, RefreshTicket(4));
                assert_eq!(result.unwrap()[0].name, "Groceries");
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_item_requests_carry_list_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = ApiManager::new(Arc::new(MemoryApi::with_lists(&["Groceries"])), tx);
        let list_id = ListId::new("1");

        manager
            .dispatch(ApiRequest::CreateItem {
                list_id: list_id.clone(),
                label: "Milk".into(),
            })
            .await
            .unwrap();
        match rx.recv().await.unwrap() {
            AppEvent::ItemMutated {
                list_id: got,
                mutation,
                result,
            } => {
                assert_eq!(got, list_id);
                assert_eq!(mutation, ItemMutation::Create { label: "Milk".into() });
                assert!(result.is_ok());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failures_are_reported_not_dropped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let api = Arc::new(MemoryApi::default());
        api.set_offline(true);
        let manager = ApiManager::new(api, tx);

        manager
            .dispatch(ApiRequest::DeleteCollection {
                id: ListId::new("9"),
            })
            .await
            .unwrap();
        match rx.recv().await.unwrap() {
            AppEvent::CollectionMutated { mutation, result } => {
                assert_eq!(mutation, Mutation::Delete { id: ListId::new("9") });
                assert!(result.is_err());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
