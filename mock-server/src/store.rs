//! In-memory persistence for warehouses and their slots.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::planning::assign_conveyors;
use crate::{CreateSlot, Slot, SlotPage, SlotQuery, Warehouse};

/// Slots per page.
pub const LIMIT: u32 = 10;
/// Width of the pagination window.
pub const PAGE_COUNT: i64 = 10;

#[derive(Debug, Default)]
pub struct Store {
    warehouses: BTreeMap<u64, Warehouse>,
    slots: BTreeMap<u64, Slot>,
    last_warehouse_id: u64,
    last_slot_id: u64,
}

impl Store {
    pub fn warehouses(&self) -> Vec<Warehouse> {
        self.warehouses.values().cloned().collect()
    }

    pub fn warehouse(&self, id: u64) -> Option<&Warehouse> {
        self.warehouses.get(&id)
    }

    pub fn insert_warehouse(&mut self, name: String) -> Warehouse {
        self.last_warehouse_id += 1;
        let warehouse = Warehouse {
            id: self.last_warehouse_id,
            name,
            creation_time: Utc::now().naive_utc(),
        };
        self.warehouses.insert(warehouse.id, warehouse.clone());
        warehouse
    }

    /// Remove a warehouse together with all of its slots.
    pub fn remove_warehouse(&mut self, id: u64) -> bool {
        if self.warehouses.remove(&id).is_none() {
            return false;
        }
        self.remove_slots(id);
        true
    }

    pub fn insert_slot(&mut self, warehouse_id: u64, input: CreateSlot) -> Slot {
        self.last_slot_id += 1;
        let slot = Slot {
            id: self.last_slot_id,
            guid: input.guid,
            warehouse_id,
            date: input.date,
            time_from: input.time_from,
            time_to: input.time_to,
            conveyor_id: None,
            creation_time: Utc::now().naive_utc(),
        };
        self.slots.insert(slot.id, slot.clone());
        slot
    }

    /// Remove one slot, only if it belongs to `warehouse_id`.
    pub fn remove_slot(&mut self, warehouse_id: u64, slot_id: u64) -> bool {
        match self.slots.get(&slot_id) {
            Some(slot) if slot.warehouse_id == warehouse_id => {
                self.slots.remove(&slot_id);
                true
            }
            _ => false,
        }
    }

    /// Remove every slot of a warehouse and return how many were removed.
    pub fn remove_slots(&mut self, warehouse_id: u64) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.warehouse_id != warehouse_id);
        before - self.slots.len()
    }

    pub fn slot_page(&self, warehouse_id: u64, query: &SlotQuery) -> SlotPage {
        let guid = query.guid.as_deref().filter(|g| !g.is_empty());
        let (from, to) = query.bounds();
        let mut matching: Vec<&Slot> = self
            .slots
            .values()
            .filter(|s| s.warehouse_id == warehouse_id)
            .filter(|s| guid.map_or(true, |g| s.guid == g))
            .filter(|s| query.conveyor_id.map_or(true, |c| s.conveyor_id == Some(c)))
            .filter(|s| from.map_or(true, |f| f <= s.starts_at()))
            .filter(|s| to.map_or(true, |t| s.ends_at() <= t))
            .collect();
        matching.sort_by_key(|s| (s.conveyor_id.is_none(), s.conveyor_id, s.date, s.time_from, s.time_to, s.id));

        // Page 0 is a valid request for an empty page.
        let page = query.page.unwrap_or(1);
        let count = u32::try_from(matching.len()).unwrap_or(u32::MAX);
        let max_page = count.div_ceil(LIMIT);
        let slots = match page.checked_sub(1) {
            Some(skip) => matching
                .into_iter()
                .skip(skip.saturating_mul(LIMIT) as usize)
                .take(LIMIT as usize)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        SlotPage {
            warehouse_id,
            page,
            max_page,
            pages: page_window(page, max_page),
            slots,
        }
    }

    /// Re-plan conveyors for a warehouse; returns the number of conveyors used.
    pub fn plan(&mut self, warehouse_id: u64) -> u32 {
        let mut slots: Vec<Slot> = self
            .slots
            .values()
            .filter(|s| s.warehouse_id == warehouse_id)
            .cloned()
            .collect();
        let conveyors = assign_conveyors(&mut slots);
        for planned in slots {
            if let Some(slot) = self.slots.get_mut(&planned.id) {
                slot.conveyor_id = planned.conveyor_id;
            }
        }
        conveyors
    }

    pub fn clear_conveyors(&mut self, warehouse_id: u64) {
        for slot in self.slots.values_mut().filter(|s| s.warehouse_id == warehouse_id) {
            slot.conveyor_id = None;
        }
    }
}

/// Page numbers shown around `page`.
///
/// The window starts at 1 near the beginning, is pinned to the last
/// `PAGE_COUNT` pages near the end, and is centred on `page` otherwise.
pub fn page_window(page: u32, max_page: u32) -> Vec<u32> {
    let half = PAGE_COUNT / 2;
    let page = i64::from(page);
    let max_page = i64::from(max_page);

    let left = if page - half < 1 {
        1
    } else if page + half + 1 > max_page {
        (max_page - PAGE_COUNT + 1).max(1)
    } else {
        page - half
    };
    let right = (left + PAGE_COUNT).min(max_page);
    (left..=right).filter_map(|p| u32::try_from(p).ok()).collect()
}
