use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub mod planning;
pub mod store;

pub use store::Store;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: u64,
    pub name: String,
    pub creation_time: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Slot {
    pub id: u64,
    pub guid: String,
    pub warehouse_id: u64,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub conveyor_id: Option<u32>,
    pub creation_time: NaiveDateTime,
}

impl Slot {
    pub fn is_free(&self) -> bool {
        self.conveyor_id.is_none()
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time_from)
    }

    /// A window with `time_from > time_to` ends on the next day.
    pub fn ends_at(&self) -> NaiveDateTime {
        if self.time_from > self.time_to {
            (self.date + Duration::days(1)).and_time(self.time_to)
        } else {
            self.date.and_time(self.time_to)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlotPage {
    pub warehouse_id: u64,
    pub page: u32,
    pub max_page: u32,
    pub pages: Vec<u32>,
    pub slots: Vec<Slot>,
}

#[derive(Deserialize)]
pub struct CreateWarehouse {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateSlot {
    pub guid: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
}

/// Filters for the slot listing.
///
/// `date` selects one calendar day and only applies when none of the range
/// bounds are given. `date_from`/`time_from` bound the slot start;
/// `date_to`/`time_to` bound its end, which for an overnight slot falls on the
/// next day. A missing `time_from` means midnight; a missing `time_to` means
/// the end of `date_to`.
#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    pub page: Option<u32>,
    pub guid: Option<String>,
    pub conveyor_id: Option<u32>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub time_from: Option<NaiveTime>,
    pub date_to: Option<NaiveDate>,
    pub time_to: Option<NaiveTime>,
}

impl SlotQuery {
    /// Inclusive `(start, end)` bounds on slot start and end times.
    pub fn bounds(&self) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let ranged = self.date_from.is_some()
            || self.time_from.is_some()
            || self.date_to.is_some()
            || self.time_to.is_some();
        if let Some(date) = self.date.filter(|_| !ranged) {
            return (
                Some(date.and_time(NaiveTime::MIN)),
                Some((date + Duration::days(1)).and_time(NaiveTime::MIN)),
            );
        }
        let from = self
            .date_from
            .map(|d| d.and_time(self.time_from.unwrap_or(NaiveTime::MIN)));
        let to = self.date_to.map(|d| match self.time_to {
            Some(t) => d.and_time(t),
            None => (d + Duration::days(1)).and_time(NaiveTime::MIN),
        });
        (from, to)
    }
}

#[derive(Deserialize)]
pub struct PlanningQuery {
    pub page: Option<String>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/ping", get(ping))
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route("/warehouses/{id}", get(get_warehouse).delete(delete_warehouse))
        .route(
            "/warehouses/{id}/slots",
            get(list_slots).post(create_slot).delete(delete_slots),
        )
        .route("/warehouses/{id}/slots/", get(list_slots))
        .route("/warehouses/{id}/slots/{slot_id}", delete(delete_slot))
        .route("/warehouses/{id}/planning", get(planning))
        .route("/warehouses/{id}/clear", get(clear_conveyors))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "OK"
}

async fn list_warehouses(State(db): State<Db>) -> Json<Vec<Warehouse>> {
    Json(db.read().await.warehouses())
}

async fn create_warehouse(
    State(db): State<Db>,
    Json(input): Json<CreateWarehouse>,
) -> (StatusCode, Json<Warehouse>) {
    let warehouse = db.write().await.insert_warehouse(input.name);
    info!(id = warehouse.id, name = %warehouse.name, "warehouse created");
    (StatusCode::CREATED, Json(warehouse))
}

async fn get_warehouse(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Warehouse>, StatusCode> {
    let store = db.read().await;
    store.warehouse(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_warehouse(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    if db.write().await.remove_warehouse(id) {
        info!(id, "warehouse deleted");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_slots(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotPage>, StatusCode> {
    let store = db.read().await;
    if store.warehouse(id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(store.slot_page(id, &query)))
}

async fn create_slot(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<CreateSlot>,
) -> Result<(StatusCode, Json<Slot>), StatusCode> {
    // time_from > time_to is an overnight slot; only an empty window is rejected.
    if input.time_from == input.time_to {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    if store.warehouse(id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    let slot = store.insert_slot(id, input);
    info!(warehouse_id = id, slot_id = slot.id, "slot created");
    Ok((StatusCode::CREATED, Json(slot)))
}

async fn delete_slots(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    if store.warehouse(id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    let removed = store.remove_slots(id);
    info!(warehouse_id = id, removed, "slots deleted");
    StatusCode::NO_CONTENT
}

async fn delete_slot(State(db): State<Db>, Path((id, slot_id)): Path<(u64, u64)>) -> StatusCode {
    if db.write().await.remove_slot(id, slot_id) {
        info!(warehouse_id = id, slot_id, "slot deleted");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn planning(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(query): Query<PlanningQuery>,
) -> StatusCode {
    let mut store = db.write().await;
    if store.warehouse(id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    let conveyors = store.plan(id);
    info!(warehouse_id = id, page = ?query.page, conveyors, "planning done");
    StatusCode::OK
}

async fn clear_conveyors(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    if store.warehouse(id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.clear_conveyors(id);
    StatusCode::OK
}
