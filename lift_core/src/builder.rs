//! Type-state builder for `Scheduler` and the scheduler facade itself.
//!
//! The builder enforces at compile time that a strategy, a car count and a
//! floor count are provided before `build()` is available. `try_build()` is
//! always available for dynamic checks.

use std::marker::PhantomData;

use lift_traits::{Car, Event, Floor};

use crate::config::{CapacityCfg, DispatchCfg, StrategyKind};
use crate::error::{BuildError, DispatchError, Result};
use crate::fleet::{Fleet, KnownFloors};
use crate::floor_scan::FloorScanDispatch;
use crate::request_queue::RequestQueueDispatch;
use crate::status::TickReport;
use crate::strategy::DispatchStrategy;

#[derive(Debug)]
enum Engine {
    RequestQueue(RequestQueueDispatch),
    FloorScan(FloorScanDispatch),
}

/// Dispatch scheduler for one building.
///
/// Lifecycle: `init` once with the host's cars and floors, then
/// `handle_event` for every host event in delivery order and `update` once per
/// tick after the events.
#[derive(Debug)]
pub struct Scheduler {
    dispatch: DispatchCfg,
    capacity: CapacityCfg,
    car_count: usize,
    floor_count: usize,
    engine: Option<Engine>,
    known_floors: KnownFloors,
}

impl Scheduler {
    /// Start building a Scheduler.
    pub fn builder() -> SchedulerBuilder<Missing, Missing, Missing> {
        SchedulerBuilder::default()
    }

    pub fn strategy(&self) -> StrategyKind {
        self.dispatch.strategy
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Calls waiting in the registry (always 0 for the floor scan strategy).
    pub fn pending_calls(&self) -> usize {
        match &self.engine {
            Some(Engine::RequestQueue(rq)) => rq.registry().len(),
            _ => 0,
        }
    }

    /// Learn the fleet and the building. Must be called exactly once.
    pub fn init<C: Car, F: Floor>(&mut self, cars: &mut [C], floors: &[F]) -> Result<()> {
        if self.engine.is_some() {
            return Err(DispatchError::State("scheduler already initialized".into()).into());
        }
        if cars.len() != self.car_count {
            return Err(DispatchError::State(format!(
                "expected {} cars, host has {}",
                self.car_count,
                cars.len()
            ))
            .into());
        }
        if floors.len() != self.floor_count {
            return Err(DispatchError::State(format!(
                "expected {} floors, host has {}",
                self.floor_count,
                floors.len()
            ))
            .into());
        }

        let fleet = Fleet::learn(cars, floors, self.capacity);
        self.known_floors = fleet.floors.clone();
        let mut engine = match self.dispatch.strategy {
            StrategyKind::RequestQueue => {
                Engine::RequestQueue(RequestQueueDispatch::new(fleet, self.dispatch.clone()))
            }
            StrategyKind::FloorScan => Engine::FloorScan(FloorScanDispatch::new(fleet)),
        };
        match &mut engine {
            Engine::RequestQueue(s) => s.start(cars, floors)?,
            Engine::FloorScan(s) => s.start(cars, floors)?,
        }
        tracing::info!(
            strategy = %self.dispatch.strategy,
            cars = cars.len(),
            floors = floors.len(),
            "scheduler initialized"
        );
        self.engine = Some(engine);
        Ok(())
    }

    /// Feed one host event. Events naming unknown cars or floors are logged and
    /// dropped.
    pub fn handle_event<C: Car, F: Floor>(
        &mut self,
        event: Event,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(DispatchError::State("handle_event before init".into()).into());
        };
        if let Some(car) = event.car()
            && car >= cars.len()
        {
            tracing::warn!(car, ?event, "event for unknown car ignored");
            return Ok(());
        }
        let floor = match event {
            Event::CarButtonPressed { floor, .. }
            | Event::PassingFloor { floor, .. }
            | Event::StoppedAtFloor { floor, .. }
            | Event::FloorButtonPressed { floor, .. } => Some(floor),
            Event::Idle { .. } => None,
        };
        if let Some(floor) = floor
            && !self.known_floors.accepts(floor)
        {
            tracing::warn!(floor, ?event, "event for unknown floor ignored");
            return Ok(());
        }
        match engine {
            Engine::RequestQueue(s) => s.on_event(event, cars, floors),
            Engine::FloorScan(s) => s.on_event(event, cars, floors),
        }
    }

    /// End-of-tick pass: reconciliation, or the full assignment pass for the
    /// floor scan strategy.
    pub fn update<C: Car, F: Floor>(
        &mut self,
        dt: f64,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<TickReport> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(DispatchError::State("update before init".into()).into());
        };
        let report = match engine {
            Engine::RequestQueue(s) => s.on_tick(dt, cars, floors)?,
            Engine::FloorScan(s) => s.on_tick(dt, cars, floors)?,
        };
        if !report.is_empty() {
            tracing::trace!(
                assignments = report.assignments.len(),
                removed = report.removed.len(),
                stale = report.stale_requests.len(),
                "tick"
            );
        }
        Ok(report)
    }
}

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `Scheduler`. All fields are validated on `build()`.
pub struct SchedulerBuilder<S, C, F> {
    strategy: Option<StrategyKind>,
    cars: Option<usize>,
    floors: Option<usize>,
    dispatch: Option<DispatchCfg>,
    capacity: Option<CapacityCfg>,
    _s: PhantomData<S>,
    _c: PhantomData<C>,
    _f: PhantomData<F>,
}

impl Default for SchedulerBuilder<Missing, Missing, Missing> {
    fn default() -> Self {
        Self {
            strategy: None,
            cars: None,
            floors: None,
            dispatch: None,
            capacity: None,
            _s: PhantomData,
            _c: PhantomData,
            _f: PhantomData,
        }
    }
}

/// Validate configuration and construct an uninitialized `Scheduler`.
fn validate_and_build(
    strategy: StrategyKind,
    car_count: usize,
    floor_count: usize,
    mut dispatch: DispatchCfg,
    capacity: CapacityCfg,
) -> Result<Scheduler> {
    if car_count == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "car count must be >= 1",
        )));
    }
    if floor_count < 2 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "floor count must be >= 2",
        )));
    }
    if dispatch.oldest_window == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "oldest_window must be >= 1",
        )));
    }
    if !(0.0..=1.0).contains(&capacity.min_free_fraction) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "min_free_fraction must be in [0, 1]",
        )));
    }
    if !(capacity.assign_min_space.is_finite() && capacity.assign_min_space >= 0.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "assign_min_space must be >= 0",
        )));
    }
    if !(capacity.pickup_min_space.is_finite() && capacity.pickup_min_space >= 0.0) {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "pickup_min_space must be >= 0",
        )));
    }

    dispatch.strategy = strategy;
    Ok(Scheduler {
        dispatch,
        capacity,
        car_count,
        floor_count,
        engine: None,
        known_floors: KnownFloors::default(),
    })
}

impl<S, C, F> SchedulerBuilder<S, C, F> {
    /// Fallible build available in any type-state; returns detailed error for missing pieces.
    pub fn try_build(self) -> Result<Scheduler> {
        let strategy = self
            .strategy
            .ok_or_else(|| eyre::Report::new(BuildError::MissingStrategy))?;
        let cars = self
            .cars
            .ok_or_else(|| eyre::Report::new(BuildError::MissingCars))?;
        let floors = self
            .floors
            .ok_or_else(|| eyre::Report::new(BuildError::MissingFloors))?;
        validate_and_build(
            strategy,
            cars,
            floors,
            self.dispatch.unwrap_or_default(),
            self.capacity.unwrap_or_default(),
        )
    }

    /// Dispatch knobs; the strategy set with `with_strategy` wins over
    /// `dispatch.strategy`.
    pub fn with_dispatch(mut self, dispatch: DispatchCfg) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn with_capacity(mut self, capacity: CapacityCfg) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

impl<C, F> SchedulerBuilder<Missing, C, F> {
    pub fn with_strategy(self, strategy: StrategyKind) -> SchedulerBuilder<Set, C, F> {
        SchedulerBuilder {
            strategy: Some(strategy),
            cars: self.cars,
            floors: self.floors,
            dispatch: self.dispatch,
            capacity: self.capacity,
            _s: PhantomData,
            _c: PhantomData,
            _f: PhantomData,
        }
    }
}

impl<S, F> SchedulerBuilder<S, Missing, F> {
    pub fn with_cars(self, count: usize) -> SchedulerBuilder<S, Set, F> {
        SchedulerBuilder {
            strategy: self.strategy,
            cars: Some(count),
            floors: self.floors,
            dispatch: self.dispatch,
            capacity: self.capacity,
            _s: PhantomData,
            _c: PhantomData,
            _f: PhantomData,
        }
    }
}

impl<S, C> SchedulerBuilder<S, C, Missing> {
    pub fn with_floors(self, count: usize) -> SchedulerBuilder<S, C, Set> {
        SchedulerBuilder {
            strategy: self.strategy,
            cars: self.cars,
            floors: Some(count),
            dispatch: self.dispatch,
            capacity: self.capacity,
            _s: PhantomData,
            _c: PhantomData,
            _f: PhantomData,
        }
    }
}

impl SchedulerBuilder<Set, Set, Set> {
    /// Validate and build. Only available when strategy, cars and floors are set.
    pub fn build(self) -> Result<Scheduler> {
        self.try_build()
    }
}

impl Scheduler {
    /// Build an uninitialized scheduler from a validated config file.
    pub fn from_config(cfg: &lift_config::Config) -> Result<Self> {
        let dispatch = DispatchCfg::from(&cfg.dispatch);
        Self::builder()
            .with_strategy(dispatch.strategy)
            .with_cars(cfg.building.cars as usize)
            .with_floors(cfg.building.floors as usize)
            .with_capacity(CapacityCfg::from(&cfg.capacity))
            .with_dispatch(dispatch)
            .build()
    }
}
