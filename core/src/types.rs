//! Domain DTOs and view models for the warehouse API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The dispatcher never deserializes mutation responses; these types are only
//! used by view reloads and creation payloads.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A warehouse as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warehouse {
    pub id: u64,
    pub name: String,
    pub creation_time: NaiveDateTime,
}

/// A delivery time window inside a warehouse.
///
/// A window whose `time_from` is later than `time_to` crosses midnight and
/// ends on the following day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

    pub fn ends_at(&self) -> NaiveDateTime {
        if self.time_from > self.time_to {
            (self.date + Duration::days(1)).and_time(self.time_to)
        } else {
            self.date.and_time(self.time_to)
        }
    }
}

/// One page of a warehouse's slots plus the pagination window around it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotPage {
    pub warehouse_id: u64,
    pub page: u32,
    pub max_page: u32,
    pub pages: Vec<u32>,
    pub slots: Vec<Slot>,
}

/// Request payload for creating a warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWarehouse {
    pub name: String,
}

/// Request payload for creating a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSlot {
    pub guid: String,
    pub date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
}

/// The typed result of a view reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    Warehouses(Vec<Warehouse>),
    Slots(SlotPage),
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewModel::Warehouses(warehouses) => {
                if warehouses.is_empty() {
                    return writeln!(f, "no warehouses");
                }
                writeln!(f, "{:>6}  {:<19}  name", "id", "created")?;
                for w in warehouses {
                    writeln!(
                        f,
                        "{:>6}  {:<19}  {}",
                        w.id,
                        w.creation_time.format("%Y-%m-%d %H:%M:%S"),
                        w.name
                    )?;
                }
                Ok(())
            }
            ViewModel::Slots(page) => {
                writeln!(
                    f,
                    "warehouse {} - page {}/{}",
                    page.warehouse_id, page.page, page.max_page
                )?;
                if page.slots.is_empty() {
                    return writeln!(f, "no slots");
                }
                writeln!(
                    f,
                    "{:>6}  {:<36}  {:<10}  {:<5}  {:<5}  conveyor",
                    "id", "guid", "date", "from", "to"
                )?;
                for s in &page.slots {
                    let conveyor = s
                        .conveyor_id
                        .map_or_else(|| "-".to_string(), |c| c.to_string());
                    writeln!(
                        f,
                        "{:>6}  {:<36}  {:<10}  {:<5}  {:<5}  {}",
                        s.id,
                        s.guid,
                        s.date,
                        s.time_from.format("%H:%M"),
                        s.time_to.format("%H:%M"),
                        conveyor
                    )?;
                }
                let pages: Vec<String> = page.pages.iter().map(u32::to_string).collect();
                writeln!(f, "pages: {}", pages.join(" "))
            }
        }
    }
}
