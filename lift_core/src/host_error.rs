//! Maps `Box<dyn Error>` from host commands to typed `DispatchError`.
//!
//! Host commands in `lift_traits` return `Box<dyn Error + Send + Sync>`; this
//! module converts those to our typed error enum, with an optional
//! feature-gated path for `lift_sim::SimError` downcasting.

use lift_traits::{CarId, HostResult};

use crate::error::DispatchError;

/// Map a host command error to a typed `DispatchError`.
pub fn map_host_error(e: &(dyn std::error::Error + 'static)) -> DispatchError {
    #[cfg(feature = "sim-errors")]
    {
        if let Some(sim) = e.downcast_ref::<lift_sim::SimError>() {
            return match sim {
                lift_sim::SimError::UnknownFloor(_) => {
                    DispatchError::Config(sim.to_string())
                }
                other => DispatchError::Host(other.to_string()),
            };
        }
    }

    DispatchError::Host(e.to_string())
}

/// Log a failed host command and report whether it succeeded.
///
/// Command failures never abort dispatch; the car keeps whatever plan the host
/// accepted last.
pub(crate) fn check(res: HostResult, car: CarId, command: &'static str) -> bool {
    match res {
        Ok(()) => true,
        Err(e) => {
            let mapped = map_host_error(e.as_ref());
            tracing::warn!(car, command, error = %mapped, "host command failed");
            false
        }
    }
}
