//! Conveyor planning: pack a warehouse's slots onto as few conveyors as possible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::NaiveDateTime;

use crate::Slot;

/// Assign every slot to a conveyor and return how many conveyors were opened.
///
/// Slots are taken in (start, end) order. Each goes onto the conveyor that
/// frees up earliest if that conveyor is free by the slot's start; a slot may
/// begin exactly when the previous one on its conveyor ends. Otherwise a new
/// conveyor is opened. Conveyor ids start at 1. Any previous assignment is
/// overwritten.
pub fn assign_conveyors(slots: &mut [Slot]) -> u32 {
    slots.sort_by_key(|s| (s.starts_at(), s.ends_at(), s.id));

    let mut lanes: BinaryHeap<Reverse<(NaiveDateTime, u32)>> = BinaryHeap::new();
    let mut opened = 0;
    for slot in slots.iter_mut() {
        let conveyor = match lanes.peek() {
            Some(Reverse((free_at, id))) if *free_at <= slot.starts_at() => {
                let id = *id;
                lanes.pop();
                id
            }
            _ => {
                opened += 1;
                opened
            }
        };
        slot.conveyor_id = Some(conveyor);
        lanes.push(Reverse((slot.ends_at(), conveyor)));
    }
    opened
}
