//! Simulated building host for the lift dispatcher.
//!
//! `SimCar` and `SimFloor` implement the `lift_traits` host contract. A
//! `Building` owns them, spawns passengers (seeded random or scripted) and
//! moves cars in discrete steps, returning the events a real host would
//! deliver. There is no door timing and no rendering.

pub mod building;
pub mod car;
pub mod error;
pub mod floor;
pub mod passenger;
pub mod stats;

pub use building::{Building, PATIENCE_S, SimConfig};
pub use car::SimCar;
pub use error::{Result, SimError};
pub use floor::SimFloor;
pub use passenger::{Arrival, Passenger, RandomArrivals};
pub use stats::SimStats;
