//! Terminal host for the warehouse slot dispatcher.
//!
//! Wires `slot_core::RequestDispatcher` to a reqwest transport, a
//! `RemoteView` for the page the command leaves the user on, and an
//! `ErrorReporter`.

pub mod config;
pub mod report;
pub mod transport;

use std::sync::Arc;

use slot_core::{
    ErrorReporter, Reload, RemoteView, RequestDispatcher, RequestError, Transport, View,
    ViewModel, ViewTarget, WarehouseClient,
};

pub use config::{Cli, Command};
pub use report::StderrReporter;
pub use transport::ReqwestTransport;

pub type Dispatcher<R> = RequestDispatcher<Arc<ReqwestTransport>, RemoteView<Arc<ReqwestTransport>>, R>;

/// Build a dispatcher whose reload shows `target`. The dispatcher and its view
/// share one connection pool.
pub fn dispatcher<R: ErrorReporter>(
    base_url: &str,
    target: ViewTarget,
    reporter: R,
) -> Result<Dispatcher<R>, reqwest::Error> {
    let transport = Arc::new(ReqwestTransport::new()?);
    let client = WarehouseClient::new(base_url);
    let view = RemoteView::new(client.clone(), Arc::clone(&transport), target);
    Ok(RequestDispatcher::new(client, transport, view, reporter))
}

/// Run one command. Mutating commands go through the dispatcher; view-only
/// commands just reload. Failures have already been reported when this
/// returns `Err`. `Ok(Reload::Failed)` means the request succeeded but the
/// refreshed view could not be fetched.
pub async fn execute<T, V, R>(
    command: &Command,
    dispatcher: &RequestDispatcher<T, V, R>,
) -> Result<Reload<ViewModel>, RequestError>
where
    T: Transport,
    V: View<Model = ViewModel>,
    R: ErrorReporter,
{
    match command {
        Command::Select { warehouse_id } => dispatcher.select_warehouse_slots(warehouse_id).await,
        Command::DeleteSlot {
            warehouse_id,
            slot_id,
        } => dispatcher.delete_slot(warehouse_id, slot_id).await,
        Command::DeleteSlots { warehouse_id } => dispatcher.delete_all_slots(warehouse_id).await,
        Command::DeleteWarehouse { warehouse_id } => dispatcher.delete_warehouse(warehouse_id).await,
        Command::Planning { warehouse_id, page } => {
            dispatcher.advance_planning(warehouse_id, page).await
        }
        Command::Warehouses | Command::Slots { .. } => match dispatcher.view().reload().await {
            Ok(model) => Ok(Reload::Fresh(model)),
            Err(err) => {
                dispatcher.reporter().report(&err);
                Err(err)
            }
        },
    }
}
