//! Dispatcher round-trips against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every dispatcher
//! operation over real HTTP through a ureq-backed `Transport`. ureq is
//! blocking, so each request runs on tokio's blocking pool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use slot_core::{
    ErrorReporter, HttpMethod, HttpRequest, HttpResponse, NewSlot, NewWarehouse, Reload,
    RemoteView, RequestDispatcher, RequestError, Transport, ViewModel, ViewTarget, WarehouseClient,
};

/// Executes `HttpRequest`s with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data and the core classifies them.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, RequestError> {
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| match e {
        ureq::Error::Timeout(_) => RequestError::Timeout,
        other => RequestError::Network(other.to_string()),
    })?;

    let status = response.status();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?
    }
}

#[derive(Default)]
struct Alerts(Mutex<Vec<String>>);

impl ErrorReporter for Alerts {
    fn report(&self, error: &RequestError) {
        self.0.lock().unwrap().push(error.to_string());
    }
}

impl Alerts {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

type Dispatcher = RequestDispatcher<Arc<UreqTransport>, RemoteView<Arc<UreqTransport>>, Alerts>;

fn dispatcher(base_url: &str, transport: &Arc<UreqTransport>, target: ViewTarget) -> Dispatcher {
    let client = WarehouseClient::new(base_url);
    let view = RemoteView::new(client.clone(), Arc::clone(transport), target);
    RequestDispatcher::new(client, Arc::clone(transport), view, Alerts::default())
}

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn slot(guid: &str, from: u32, to: u32) -> NewSlot {
    NewSlot {
        guid: guid.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        time_from: NaiveTime::from_hms_opt(from, 0, 0).unwrap(),
        time_to: NaiveTime::from_hms_opt(to, 0, 0).unwrap(),
    }
}

fn slots_of(outcome: Reload<ViewModel>) -> slot_core::SlotPage {
    match outcome.into_result().unwrap() {
        ViewModel::Slots(page) => page,
        other => panic!("expected slot view, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn dispatch_lifecycle() {
    let base_url = start_server().await;
    let transport = Arc::new(UreqTransport::new());
    let client = WarehouseClient::new(&base_url);

    // Step 1: seed a warehouse with three slots.
    let req = client
        .build_create_warehouse(&NewWarehouse { name: "Main".to_string() })
        .unwrap();
    let warehouse = client
        .parse_create_warehouse(transport.execute(req).await.unwrap())
        .unwrap();
    let w = warehouse.id;

    let mut slot_ids = Vec::new();
    for (guid, from, to) in [("a", 8, 10), ("b", 9, 11), ("c", 10, 12)] {
        let req = client.build_create_slot(w, &slot(guid, from, to)).unwrap();
        let created = client
            .parse_create_slot(transport.execute(req).await.unwrap())
            .unwrap();
        slot_ids.push(created.id);
    }

    let slots_view = ViewTarget::Slots {
        warehouse_id: w.to_string(),
        page: "1".to_string(),
    };
    let d = dispatcher(&base_url, &transport, slots_view);

    // Step 2: select reloads the slot page.
    let page = slots_of(d.select_warehouse_slots(w).await.unwrap());
    assert_eq!(page.slots.len(), 3);
    assert!(page.slots.iter().all(|s| s.is_free()));

    // Step 3: planning assigns conveyors, visible after reload.
    let page = slots_of(d.advance_planning(w, 1).await.unwrap());
    assert!(page.slots.iter().all(|s| s.conveyor_id.is_some()));

    // Step 4: delete one slot.
    let page = slots_of(d.delete_slot(w, slot_ids[0]).await.unwrap());
    assert_eq!(page.slots.len(), 2);
    assert!(d.reporter().take().is_empty());

    // Step 5: deleting an unknown slot alerts once and does not reload.
    let err = d.delete_slot(w, 9999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    let alerts = d.reporter().take();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("404"));
    assert!(alerts[0].contains("Not Found"));

    // Step 6: delete all slots twice; both succeed independently.
    for _ in 0..2 {
        let page = slots_of(d.delete_all_slots(w).await.unwrap());
        assert!(page.slots.is_empty());
    }

    // Step 7: delete the warehouse from the warehouse list view.
    let list = dispatcher(&base_url, &transport, ViewTarget::Warehouses);
    match list.delete_warehouse(w).await.unwrap().into_result().unwrap() {
        ViewModel::Warehouses(warehouses) => assert!(warehouses.is_empty()),
        other => panic!("expected warehouse view, got {other:?}"),
    }

    // Step 8: deleting it again is a client error.
    let err = list.delete_warehouse(w).await.unwrap_err();
    assert!(matches!(err, RequestError::Client(_)));
    assert_eq!(list.reporter().take().len(), 1);

    // Step 9: the old slot view now fails to reload after a successful request.
    // The request went through, so the reload failure is not alerted.
    let req = client
        .build_create_warehouse(&NewWarehouse { name: "Other".to_string() })
        .unwrap();
    let other = client
        .parse_create_warehouse(transport.execute(req).await.unwrap())
        .unwrap();
    match d.delete_all_slots(other.id).await.unwrap() {
        Reload::Failed(err) => assert_eq!(err.status(), Some(404)),
        outcome => panic!("expected failed reload, got {outcome:?}"),
    }
    assert!(d.reporter().take().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_is_network_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base_url = format!("http://{addr}");
    let transport = Arc::new(UreqTransport::new());
    let d = dispatcher(&base_url, &transport, ViewTarget::Warehouses);

    let err = d.delete_warehouse(1).await.unwrap_err();
    assert!(matches!(err, RequestError::Network(_) | RequestError::Timeout));
    assert_eq!(d.reporter().take().len(), 1);
}
