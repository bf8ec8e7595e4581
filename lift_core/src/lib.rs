#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::float_cmp
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Elevator dispatch core (host-agnostic).
//!
//! The scheduler never owns cars or floors. Every call receives the host's
//! `lift_traits::Car` and `lift_traits::Floor` slices, reads their coarse
//! signals and issues commands back through the same traits.
//!
//! ## Architecture
//!
//! - **Estimator**: position/direction guesses from coarse signals (`estimator`)
//! - **Capacity**: free-space thresholds for new calls and pickups (`capacity`)
//! - **Registry**: outstanding hall calls in arrival order (`registry`)
//! - **Queue**: SCAN-ordered destination queues (`queue`)
//! - **Interceptor**: opportunistic stops while passing (`interceptor`)
//! - **Reconcile**: per-tick removal of stale stops (`reconcile`)
//! - **Strategies**: `request_queue` (event-driven) and `floor_scan` (tick-polled)
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = Scheduler::builder()
//!     .with_strategy(StrategyKind::RequestQueue)
//!     .with_cars(cars.len())
//!     .with_floors(floors.len())
//!     .build()?;
//! scheduler.init(&mut cars, &floors)?;
//! for event in host.step(dt) {
//!     scheduler.handle_event(event, &mut cars, &floors)?;
//! }
//! let report = scheduler.update(dt, &mut cars, &floors)?;
//! ```

pub mod builder;
pub mod capacity;
pub mod config;
pub mod conversions;
pub mod error;
pub mod estimator;
pub mod fleet;
pub mod floor_scan;
pub mod host_error;
pub mod interceptor;
pub mod mocks;
pub mod queue;
pub mod reconcile;
pub mod registry;
pub mod request_queue;
pub mod status;
pub mod strategy;

pub use builder::{Missing, Scheduler, SchedulerBuilder, Set};
pub use config::{CapacityCfg, DispatchCfg, StrategyKind};
pub use error::{BuildError, DispatchError, Result};
pub use estimator::CarExt;
pub use fleet::{CarState, Fleet, KnownFloors};
pub use registry::{Request, RequestRegistry};
pub use status::{Assignment, Removal, TickReport};
pub use strategy::DispatchStrategy;
