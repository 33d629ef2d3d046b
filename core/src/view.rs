//! Re-fetching view backed by the warehouse API.

use async_trait::async_trait;
use tracing::debug;

use crate::client::WarehouseClient;
use crate::dispatcher::{Transport, View};
use crate::error::RequestError;
use crate::types::ViewModel;

/// Which page the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    Warehouses,
    Slots { warehouse_id: String, page: String },
}

/// A `View` whose reload is one GET for its target, parsed into a `ViewModel`.
pub struct RemoteView<T> {
    client: WarehouseClient,
    transport: T,
    target: ViewTarget,
}

impl<T: Transport> RemoteView<T> {
    pub fn new(client: WarehouseClient, transport: T, target: ViewTarget) -> Self {
        Self {
            client,
            transport,
            target,
        }
    }
}

#[async_trait]
impl<T: Transport> View for RemoteView<T> {
    type Model = ViewModel;

    async fn reload(&self) -> Result<ViewModel, RequestError> {
        debug!(target_view = ?self.target, "reloading view");
        match &self.target {
            ViewTarget::Warehouses => {
                let request = self.client.build_list_warehouses();
                let response = self.transport.execute(request).await?;
                self.client
                    .parse_list_warehouses(response)
                    .map(ViewModel::Warehouses)
            }
            ViewTarget::Slots { warehouse_id, page } => {
                let request = self.client.build_get_slot_page(warehouse_id, page);
                let response = self.transport.execute(request).await?;
                self.client.parse_slot_page(response).map(ViewModel::Slots)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    struct OneShot {
        seen: Mutex<Option<HttpRequest>>,
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl Transport for OneShot {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(HttpResponse {
                status: self.status,
                status_text: String::new(),
                body: self.body.to_string(),
            })
        }
    }

    fn view(target: ViewTarget, status: u16, body: &'static str) -> RemoteView<OneShot> {
        RemoteView::new(
            WarehouseClient::new("http://backend"),
            OneShot {
                seen: Mutex::new(None),
                status,
                body,
            },
            target,
        )
    }

    #[tokio::test]
    async fn warehouses_reload_lists_warehouses() {
        let v = view(
            ViewTarget::Warehouses,
            200,
            r#"[{"id":1,"name":"North","creation_time":"2024-01-01T10:00:00"}]"#,
        );
        let model = v.reload().await.unwrap();

        match model {
            ViewModel::Warehouses(list) => assert_eq!(list[0].name, "North"),
            other => panic!("unexpected model: {other:?}"),
        }
        let seen = v.transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.method, HttpMethod::Get);
        assert_eq!(seen.path, "http://backend/warehouses");
    }

    #[tokio::test]
    async fn slots_reload_fetches_target_page() {
        let target = ViewTarget::Slots {
            warehouse_id: "4".to_string(),
            page: "2".to_string(),
        };
        let v = view(
            target,
            200,
            r#"{"warehouse_id":4,"page":2,"max_page":2,"pages":[1,2],"slots":[]}"#,
        );
        let model = v.reload().await.unwrap();

        assert!(matches!(model, ViewModel::Slots(ref p) if p.page == 2));
        let seen = v.transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.path, "http://backend/warehouses/4/slots?page=2");
    }

    #[tokio::test]
    async fn reload_of_missing_warehouse_is_client_error() {
        let target = ViewTarget::Slots {
            warehouse_id: "9".to_string(),
            page: "1".to_string(),
        };
        let err = view(target, 404, "").reload().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
