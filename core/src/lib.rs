//! Request dispatcher core for the warehouse slot planning service.
//!
//! # Overview
//! Builds `HttpRequest` values and classifies `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sits the async
//! `RequestDispatcher`, which runs one request through a host-supplied
//! `Transport` and then either reloads the current `View` or hands the error to
//! an `ErrorReporter`.
//!
//! # Design
//! - `WarehouseClient` is stateless and holds only `base_url`.
//! - Every dispatcher operation is a `build_*` call, one transport round-trip,
//!   then `check_outcome`. There is no retry and no state carried between calls.
//! - Identifiers are opaque: anything `Display` is interpolated verbatim.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::WarehouseClient;
pub use dispatcher::{ErrorReporter, Reload, RequestDispatcher, Transport, View};
pub use error::{ErrorDetail, RequestError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewSlot, NewWarehouse, Slot, SlotPage, ViewModel, Warehouse};
pub use view::{RemoteView, ViewTarget};
