//! Async request dispatcher: one request, then reload or report.
//!
//! # Design
//! The dispatcher owns no state beyond its collaborators. Each operation builds
//! exactly one request, executes it through the `Transport`, and then takes one
//! of two continuations:
//! - 2xx: `View::reload` is called once and its outcome comes back as
//!   `Ok(Reload)`.
//! - anything else: `ErrorReporter::report` is called once and the error is
//!   returned.
//!
//! A reload that fails after a 2xx is `Ok(Reload::Failed)`: the request itself
//! went through, so nothing is reported. Nothing is retried.
//! Operations take `&self`, so any number may be in flight at once; no ordering
//! between them is enforced.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::client::WarehouseClient;
use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP request on behalf of the core.
///
/// Implementations must return non-2xx responses as `Ok`; only failures that
/// produced no response at all become `Err` (`Network` or `Timeout`).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        (**self).execute(request).await
    }
}

/// The view a successful dispatch refreshes.
#[async_trait]
pub trait View: Send + Sync {
    type Model: Send;

    /// Re-fetch and return a fresh model of the current view.
    async fn reload(&self) -> Result<Self::Model, RequestError>;
}

/// What the view refresh produced after a request succeeded.
#[derive(Debug)]
pub enum Reload<M> {
    Fresh(M),
    Failed(RequestError),
}

impl<M> Reload<M> {
    pub fn into_result(self) -> Result<M, RequestError> {
        match self {
            Reload::Fresh(model) => Ok(model),
            Reload::Failed(err) => Err(err),
        }
    }
}

/// Surfaces a failed dispatch to the user.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &RequestError);
}

pub struct RequestDispatcher<T, V, R> {
    client: WarehouseClient,
    transport: T,
    view: V,
    reporter: R,
}

impl<T, V, R> RequestDispatcher<T, V, R>
where
    T: Transport,
    V: View,
    R: ErrorReporter,
{
    pub fn new(client: WarehouseClient, transport: T, view: V, reporter: R) -> Self {
        Self {
            client,
            transport,
            view,
            reporter,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// `GET /warehouses/{warehouse_id}/slots/`
    pub async fn select_warehouse_slots(
        &self,
        warehouse_id: impl Display,
    ) -> Result<Reload<V::Model>, RequestError> {
        let request = self.client.build_select_warehouse_slots(warehouse_id);
        self.dispatch(request).await
    }

    /// `DELETE /warehouses/{warehouse_id}/slots/{slot_id}`
    pub async fn delete_slot(
        &self,
        warehouse_id: impl Display,
        slot_id: impl Display,
    ) -> Result<Reload<V::Model>, RequestError> {
        let request = self.client.build_delete_slot(warehouse_id, slot_id);
        self.dispatch(request).await
    }

    /// `DELETE /warehouses/{warehouse_id}/slots`
    pub async fn delete_all_slots(
        &self,
        warehouse_id: impl Display,
    ) -> Result<Reload<V::Model>, RequestError> {
        let request = self.client.build_delete_all_slots(warehouse_id);
        self.dispatch(request).await
    }

    /// `DELETE /warehouses/{warehouse_id}`
    pub async fn delete_warehouse(
        &self,
        warehouse_id: impl Display,
    ) -> Result<Reload<V::Model>, RequestError> {
        let request = self.client.build_delete_warehouse(warehouse_id);
        self.dispatch(request).await
    }

    /// `GET /warehouses/{warehouse_id}/planning?page={page}`
    pub async fn advance_planning(
        &self,
        warehouse_id: impl Display,
        page: impl Display,
    ) -> Result<Reload<V::Model>, RequestError> {
        let request = self.client.build_advance_planning(warehouse_id, page);
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<Reload<V::Model>, RequestError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, "issuing request");

        let outcome = match self.transport.execute(request).await {
            Ok(response) => self.client.check_outcome(&response),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            warn!(%method, %path, error = %err, "request failed");
            self.reporter.report(&err);
            return Err(err);
        }

        info!(%method, %path, "request succeeded, reloading view");
        match self.view.reload().await {
            Ok(model) => Ok(Reload::Fresh(model)),
            Err(err) => {
                warn!(%method, %path, error = %err, "view reload failed");
                Ok(Reload::Failed(err))
            }
        }
    }
}
