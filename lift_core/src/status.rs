//! What a tick changed, as reported by `Scheduler::update`.

use lift_traits::{CarId, Direction};

use crate::registry::Request;

/// A call handed to a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub car: CarId,
    pub floor: i32,
    /// `None` when the car was sent to an occupant's floor.
    pub direction: Option<Direction>,
}

/// A committed stop withdrawn by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub car: CarId,
    pub floor: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Calls assigned since the previous report.
    pub assignments: Vec<Assignment>,
    /// Stale stops removed by the sweep.
    pub removed: Vec<Removal>,
    /// Registry calls dropped because their button went dark.
    pub stale_requests: Vec<Request>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.removed.is_empty() && self.stale_requests.is_empty()
    }
}
