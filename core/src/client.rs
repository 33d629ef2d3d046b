//! Stateless HTTP request builder and response classifier for the warehouse API.
//!
//! # Design
//! `WarehouseClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `check_outcome` / `parse_*` step that consumes the
//! `HttpResponse`. The caller executes the HTTP round-trip in between.
//!
//! Identifiers and page numbers are taken as `impl Display` and interpolated
//! verbatim; they are never parsed, validated, or percent-encoded here.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewSlot, NewWarehouse, Slot, SlotPage, Warehouse};

/// Synchronous, stateless client for the warehouse API.
#[derive(Debug, Clone)]
pub struct WarehouseClient {
    base_url: String,
}

impl WarehouseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // --- dispatcher operations ---

    pub fn build_select_warehouse_slots(&self, warehouse_id: impl Display) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/warehouses/{warehouse_id}/slots/"))
    }

    pub fn build_delete_slot(&self, warehouse_id: impl Display, slot_id: impl Display) -> HttpRequest {
        self.bare(
            HttpMethod::Delete,
            format!("/warehouses/{warehouse_id}/slots/{slot_id}"),
        )
    }

    pub fn build_delete_all_slots(&self, warehouse_id: impl Display) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/warehouses/{warehouse_id}/slots"))
    }

    pub fn build_delete_warehouse(&self, warehouse_id: impl Display) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/warehouses/{warehouse_id}"))
    }

    pub fn build_advance_planning(&self, warehouse_id: impl Display, page: impl Display) -> HttpRequest {
        self.bare(
            HttpMethod::Get,
            format!("/warehouses/{warehouse_id}/planning?page={page}"),
        )
    }

    // --- views and backend housekeeping ---

    pub fn build_list_warehouses(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/warehouses".to_string())
    }

    pub fn build_get_slot_page(&self, warehouse_id: impl Display, page: impl Display) -> HttpRequest {
        self.bare(
            HttpMethod::Get,
            format!("/warehouses/{warehouse_id}/slots?page={page}"),
        )
    }

    pub fn build_clear_conveyors(&self, warehouse_id: impl Display) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/warehouses/{warehouse_id}/clear"))
    }

    pub fn build_ping(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/ping".to_string())
    }

    pub fn build_create_warehouse(&self, input: &NewWarehouse) -> Result<HttpRequest, RequestError> {
        self.json(HttpMethod::Post, "/warehouses".to_string(), input)
    }

    pub fn build_create_slot(
        &self,
        warehouse_id: impl Display,
        input: &NewSlot,
    ) -> Result<HttpRequest, RequestError> {
        self.json(
            HttpMethod::Post,
            format!("/warehouses/{warehouse_id}/slots"),
            input,
        )
    }

    // --- response side ---

    /// Classify a response: any 2xx is success, everything else is an error.
    /// The body of a successful response is ignored.
    pub fn check_outcome(&self, response: &HttpResponse) -> Result<(), RequestError> {
        if response.is_success() {
            Ok(())
        } else {
            Err(RequestError::from_status(response))
        }
    }

    pub fn parse_list_warehouses(&self, response: HttpResponse) -> Result<Vec<Warehouse>, RequestError> {
        self.parse_json(response)
    }

    pub fn parse_slot_page(&self, response: HttpResponse) -> Result<SlotPage, RequestError> {
        self.parse_json(response)
    }

    pub fn parse_create_warehouse(&self, response: HttpResponse) -> Result<Warehouse, RequestError> {
        self.parse_json(response)
    }

    pub fn parse_create_slot(&self, response: HttpResponse) -> Result<Slot, RequestError> {
        self.parse_json(response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json<T: Serialize>(&self, method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, RequestError> {
        let body = serde_json::to_string(input).map_err(|e| RequestError::Serialization(e.to_string()))?;
        let mut request = self.bare(method, path);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, RequestError> {
        self.check_outcome(&response)?;
        serde_json::from_str(&response.body).map_err(|e| RequestError::Deserialization(e.to_string()))
    }
}
