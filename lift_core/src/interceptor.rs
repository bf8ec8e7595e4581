//! Opportunistic stops for a car crossing a floor.

use lift_traits::{Car, CarId, Direction, Floor, Heading};

use crate::capacity::can_pick_up;
use crate::config::{CapacityCfg, DispatchCfg};
use crate::fleet::buttons_at;
use crate::queue::{refresh_indicators, stop_next};
use crate::registry::RequestRegistry;

/// Outcome of a passing-floor check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intercept {
    Ignored,
    /// A queued floor deep in the plan was pulled forward.
    Detour,
    /// A waiting call in the travel direction was picked up.
    Pickup(Direction),
}

/// Decide whether a car crossing `floor` should stop there now.
#[allow(clippy::too_many_arguments)]
pub fn on_passing<C: Car + ?Sized, F: Floor>(
    car: &mut C,
    id: CarId,
    floor: i32,
    heading: Heading,
    floors: &[F],
    registry: &mut RequestRegistry,
    dispatch: &DispatchCfg,
    capacity: &CapacityCfg,
) -> Intercept {
    if !can_pick_up(car, capacity) {
        tracing::trace!(car = id, floor, "too full to stop while passing");
        return Intercept::Ignored;
    }
    let lit = heading
        .as_direction()
        .filter(|&d| buttons_at(floors, floor).is_some_and(|b| b.is_lit(d)));

    let position = car.destination_queue().iter().position(|&f| f == floor);
    match position {
        Some(0) => Intercept::Ignored,
        Some(1) => match lit {
            Some(d) => pickup(car, id, floor, d, registry),
            None => Intercept::Ignored,
        },
        Some(_) => {
            tracing::debug!(car = id, floor, "pulling queued stop forward");
            stop_next(car, id, floor);
            refresh_indicators(car, id);
            Intercept::Detour
        }
        None => match lit {
            Some(d) if dispatch.pickup_unqueued_floors => pickup(car, id, floor, d, registry),
            _ => Intercept::Ignored,
        },
    }
}

fn pickup<C: Car + ?Sized>(
    car: &mut C,
    id: CarId,
    floor: i32,
    direction: Direction,
    registry: &mut RequestRegistry,
) -> Intercept {
    tracing::debug!(car = id, floor, %direction, "opportunistic pickup");
    stop_next(car, id, floor);
    refresh_indicators(car, id);
    registry.remove(floor, direction);
    Intercept::Pickup(direction)
}
