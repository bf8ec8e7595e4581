//! Common shape of a dispatch strategy.

use lift_traits::{Car, Event, Floor};

use crate::config::StrategyKind;
use crate::error::Result;
use crate::status::TickReport;

/// A strategy owns the scheduler-side state for one fleet and reacts to host
/// events and ticks. Event validation (unknown cars or floors) happens before a
/// strategy sees an event.
pub trait DispatchStrategy {
    fn kind(&self) -> StrategyKind;

    /// Called once, right after the fleet has been learned.
    fn start<C: Car, F: Floor>(&mut self, cars: &mut [C], floors: &[F]) -> Result<()>;

    fn on_event<C: Car, F: Floor>(
        &mut self,
        event: Event,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<()>;

    fn on_tick<C: Car, F: Floor>(
        &mut self,
        dt: f64,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<TickReport>;
}
