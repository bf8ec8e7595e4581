//! Once-per-tick removal of stops that another car already served.
//!
//! A floor whose buttons are no longer both lit may still sit in the queues of
//! cars that were sent for the call now gone. Such stops are withdrawn, unless
//! an occupant of that car is bound for the floor.

use lift_traits::{Car, Direction, Floor};

use crate::estimator::CarExt;
use crate::fleet::buttons_at;
use crate::queue;
use crate::registry::RequestRegistry;
use crate::status::{Removal, TickReport};

/// `floor` is followed by a lower floor, i.e. the car would stop there on its
/// way down. False when the floor is absent or is the last entry.
pub fn served_descending(queue: &[i32], floor: i32) -> bool {
    match queue.iter().position(|&f| f == floor) {
        Some(i) if i + 1 < queue.len() => queue[i] > queue[i + 1],
        _ => false,
    }
}

/// `floor` is followed by a higher floor, i.e. the car would stop there on its
/// way up. False when the floor is absent or is the last entry.
pub fn served_ascending(queue: &[i32], floor: i32) -> bool {
    match queue.iter().position(|&f| f == floor) {
        Some(i) if i + 1 < queue.len() => queue[i] < queue[i + 1],
        _ => false,
    }
}

/// Withdraw stale stops from every car and drop registry calls whose button
/// went dark. Removals and dropped calls are appended to `report`.
pub fn sweep<C: Car, F: Floor>(
    cars: &mut [C],
    floors: &[F],
    registry: &mut RequestRegistry,
    report: &mut TickReport,
) {
    for fl in floors {
        let floor = fl.floor_num();
        let buttons = fl.button_states();
        let cleared: &[Direction] = match (buttons.up, buttons.down) {
            (true, true) => continue,
            (false, false) => &[Direction::Up, Direction::Down],
            (true, false) => &[Direction::Down],
            (false, true) => &[Direction::Up],
        };

        for (id, car) in cars.iter_mut().enumerate() {
            if car.occupant_wants(floor) {
                continue;
            }
            let q = car.destination_queue();
            let stale = match (buttons.up, buttons.down) {
                (false, false) => q.contains(&floor),
                // Only up still lit: a stop made on the way down is stale.
                (true, false) => served_descending(q, floor),
                (false, true) => served_ascending(q, floor),
                (true, true) => false,
            };
            if stale && queue::remove(car, id, floor, cleared, registry) {
                report.removed.push(Removal { car: id, floor });
            }
        }
    }

    let dropped = registry.drain_where(|r| {
        !buttons_at(floors, r.floor).is_some_and(|b| b.is_lit(r.direction))
    });
    for r in &dropped {
        tracing::debug!(floor = r.floor, direction = %r.direction, "dropping answered call");
    }
    report.stale_requests.extend(dropped);
}
