//! Events delivered by the host, in delivery order, to the scheduler.

use crate::direction::{Direction, Heading};

/// Index of a car in the slice handed to the scheduler.
pub type CarId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An occupant pressed a floor button inside `car`.
    CarButtonPressed { car: CarId, floor: i32 },
    /// `car` is about to cross `floor` without a planned stop.
    PassingFloor {
        car: CarId,
        floor: i32,
        direction: Heading,
    },
    /// `car` stopped at `floor` and opened its doors.
    StoppedAtFloor { car: CarId, floor: i32 },
    /// `car` has nothing left to do.
    Idle { car: CarId },
    /// A hall call button was pressed.
    FloorButtonPressed { floor: i32, direction: Direction },
}

impl Event {
    /// Car the event refers to, if any.
    pub fn car(&self) -> Option<CarId> {
        match *self {
            Event::CarButtonPressed { car, .. }
            | Event::PassingFloor { car, .. }
            | Event::StoppedAtFloor { car, .. }
            | Event::Idle { car } => Some(car),
            Event::FloorButtonPressed { .. } => None,
        }
    }

    /// Delivery rank within a tick: button events, then passing, then stops.
    pub fn delivery_rank(&self) -> u8 {
        match self {
            Event::CarButtonPressed { .. } | Event::FloorButtonPressed { .. } => 0,
            Event::PassingFloor { .. } => 1,
            Event::StoppedAtFloor { .. } | Event::Idle { .. } => 2,
        }
    }
}
