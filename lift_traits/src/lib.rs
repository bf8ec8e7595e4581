//! Host capability traits for the dispatch scheduler.
//!
//! The scheduler never owns cars or floors. A host (simulator, test double, real
//! controller) implements [`Car`] and [`Floor`] and hands slices of them to the
//! scheduler on every call. Queries are infallible; commands return [`HostResult`]
//! so that a misbehaving host can report failures without aborting dispatch.

pub mod direction;
pub mod event;

pub use direction::{ButtonStates, Direction, Heading};
pub use event::{CarId, Event};

/// Result of a host command.
pub type HostResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub trait Car {
    /// Last floor the car crossed or stopped at.
    fn current_floor(&self) -> i32;
    /// Coarse travel direction towards the current destination.
    fn destination_direction(&self) -> Heading;
    /// Approximate load in `[0, 1]`.
    fn load_factor(&self) -> f64;
    fn max_passenger_count(&self) -> u32;
    /// Floors requested by occupants currently inside the car.
    fn pressed_floors(&self) -> &[i32];
    /// Committed stops; index 0 is the next stop.
    fn destination_queue(&self) -> &[i32];

    /// Replace the committed stops and make the car act on the new head.
    fn set_destination_queue(&mut self, queue: Vec<i32>) -> HostResult;
    /// Queue a floor; `immediate` puts it in front of every other stop.
    fn go_to_floor(&mut self, floor: i32, immediate: bool) -> HostResult;
    /// Clear all committed stops and halt at the next possible floor.
    fn stop(&mut self) -> HostResult;
    fn set_going_up_indicator(&mut self, on: bool) -> HostResult;
    fn set_going_down_indicator(&mut self, on: bool) -> HostResult;
}

pub trait Floor {
    fn floor_num(&self) -> i32;
    fn button_states(&self) -> ButtonStates;
}

impl<T: Car + ?Sized> Car for Box<T> {
    fn current_floor(&self) -> i32 {
        (**self).current_floor()
    }
    fn destination_direction(&self) -> Heading {
        (**self).destination_direction()
    }
    fn load_factor(&self) -> f64 {
        (**self).load_factor()
    }
    fn max_passenger_count(&self) -> u32 {
        (**self).max_passenger_count()
    }
    fn pressed_floors(&self) -> &[i32] {
        (**self).pressed_floors()
    }
    fn destination_queue(&self) -> &[i32] {
        (**self).destination_queue()
    }
    fn set_destination_queue(&mut self, queue: Vec<i32>) -> HostResult {
        (**self).set_destination_queue(queue)
    }
    fn go_to_floor(&mut self, floor: i32, immediate: bool) -> HostResult {
        (**self).go_to_floor(floor, immediate)
    }
    fn stop(&mut self) -> HostResult {
        (**self).stop()
    }
    fn set_going_up_indicator(&mut self, on: bool) -> HostResult {
        (**self).set_going_up_indicator(on)
    }
    fn set_going_down_indicator(&mut self, on: bool) -> HostResult {
        (**self).set_going_down_indicator(on)
    }
}

impl<T: Floor + ?Sized> Floor for Box<T> {
    fn floor_num(&self) -> i32 {
        (**self).floor_num()
    }
    fn button_states(&self) -> ButtonStates {
        (**self).button_states()
    }
}
