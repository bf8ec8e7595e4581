//! Destination queue management.
//!
//! A car's queue is kept in SCAN order relative to its estimated position: a
//! leading run heading away from the car in the direction of the head, then a
//! run back the other way. Every mutation is pushed to the host with
//! `set_destination_queue` and followed by an indicator refresh.

use lift_traits::{Car, CarId, Direction};

use crate::estimator::CarExt;
use crate::fleet::KnownFloors;
use crate::host_error::check;
use crate::registry::RequestRegistry;

/// Re-partition `queue` into SCAN order around position `cur`.
///
/// If the head lies above `cur`: floors at or above `cur` ascending, then
/// floors below descending. Otherwise: floors at or below `cur` descending,
/// then floors above ascending.
pub fn scan_order(queue: &[i32], cur: f64) -> Vec<i32> {
    let Some(&head) = queue.first() else {
        return Vec::new();
    };
    let (mut lead, mut tail): (Vec<i32>, Vec<i32>) = if f64::from(head) > cur {
        queue.iter().partition(|&&f| f64::from(f) >= cur)
    } else {
        queue.iter().partition(|&&f| f64::from(f) <= cur)
    };
    if f64::from(head) > cur {
        lead.sort_unstable();
        tail.sort_unstable_by(|a, b| b.cmp(a));
    } else {
        lead.sort_unstable_by(|a, b| b.cmp(a));
        tail.sort_unstable();
    }
    lead.extend(tail);
    lead
}

/// Whether `queue` is already in SCAN order around `cur`.
pub fn is_scan_ordered(queue: &[i32], cur: f64) -> bool {
    scan_order(queue, cur) == queue
}

/// Set the hall lanterns from the head of the queue.
///
/// An empty queue lights both, so waiting passengers in either direction board.
pub fn refresh_indicators<C: Car + ?Sized>(car: &mut C, id: CarId) {
    let cur = car.estimated_position();
    let next = car.next_destination().map_or(cur, f64::from);
    check(car.set_going_down_indicator(cur >= next), id, "set_going_down_indicator");
    check(car.set_going_up_indicator(cur <= next), id, "set_going_up_indicator");
}

/// Commit `floor` as a stop.
///
/// Floors outside the building and the floor the car is estimated to be on
/// are ignored. A floor lying strictly between the car and its current head
/// becomes the new head (moved there if already queued); anything else not
/// already queued is appended. The
/// queue is then put back into SCAN order. Returns whether the queue changed.
pub fn insert<C: Car + ?Sized>(car: &mut C, id: CarId, floor: i32, known: &KnownFloors) -> bool {
    if !known.accepts(floor) {
        tracing::debug!(car = id, floor, "ignoring stop outside the building");
        return false;
    }
    let cur = car.estimated_position();
    let target = f64::from(floor);
    if target == cur {
        tracing::trace!(car = id, floor, "already at floor");
        refresh_indicators(car, id);
        return false;
    }

    let mut queue = car.destination_queue().to_vec();
    let next = queue.first().map_or(target, |&h| f64::from(h));
    let between = (cur < target && target < next) || (next < target && target < cur);
    if between {
        queue.retain(|&f| f != floor);
        queue.insert(0, floor);
    } else if !queue.contains(&floor) {
        queue.push(floor);
    }

    let ordered = scan_order(&queue, cur);
    debug_assert!(is_scan_ordered(&ordered, cur));
    let changed = ordered != car.destination_queue();
    if changed {
        tracing::debug!(car = id, floor, queue = ?ordered, "stop committed");
        check(car.set_destination_queue(ordered), id, "set_destination_queue");
    }
    refresh_indicators(car, id);
    changed
}

/// Drop the first occurrence of `floor` from the car's queue and clear the
/// registry calls for the `cleared` directions at that floor.
///
/// Nothing happens when the floor is not queued.
pub fn remove<C: Car + ?Sized>(
    car: &mut C,
    id: CarId,
    floor: i32,
    cleared: &[Direction],
    registry: &mut RequestRegistry,
) -> bool {
    let mut queue = car.destination_queue().to_vec();
    let Some(idx) = queue.iter().position(|&f| f == floor) else {
        return false;
    };
    queue.remove(idx);
    tracing::debug!(car = id, floor, queue = ?queue, "stop withdrawn");
    check(car.set_destination_queue(queue), id, "set_destination_queue");
    for &d in cleared {
        registry.remove(floor, d);
    }
    refresh_indicators(car, id);
    true
}

/// Splice `floor` out of the queue (if present) and make it the next stop.
pub fn stop_next<C: Car + ?Sized>(car: &mut C, id: CarId, floor: i32) {
    let queue = car.destination_queue();
    if queue.contains(&floor) {
        let rest: Vec<i32> = queue.iter().copied().filter(|&f| f != floor).collect();
        check(car.set_destination_queue(rest), id, "set_destination_queue");
    }
    check(car.go_to_floor(floor, true), id, "go_to_floor");
}
