//! Event-driven dispatch with opportunistic pickup.
//!
//! Hall calls go into a registry; idle cars take the nearest of the oldest
//! calls. Cars crossing floors may stop early for calls on their way, and a
//! sweep after every tick withdraws stops another car already served.

use lift_traits::{Car, CarId, Event, Floor};

use crate::capacity::can_take_call;
use crate::config::{DispatchCfg, StrategyKind};
use crate::error::Result;
use crate::fleet::Fleet;
use crate::interceptor::{self, Intercept};
use crate::queue;
use crate::reconcile;
use crate::registry::RequestRegistry;
use crate::status::{Assignment, TickReport};
use crate::strategy::DispatchStrategy;

#[derive(Debug)]
pub struct RequestQueueDispatch {
    fleet: Fleet,
    registry: RequestRegistry,
    cfg: DispatchCfg,
    /// Assignments made by events since the last tick.
    pending: TickReport,
}

impl RequestQueueDispatch {
    pub fn new(fleet: Fleet, cfg: DispatchCfg) -> Self {
        Self {
            fleet,
            registry: RequestRegistry::new(cfg.oldest_window),
            cfg,
            pending: TickReport::default(),
        }
    }

    pub fn registry(&self) -> &RequestRegistry {
        &self.registry
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Give an idle car the best of the oldest waiting calls.
    fn idle<C: Car>(&mut self, id: CarId, car: &mut C) {
        if !can_take_call(car, &self.fleet.capacity) {
            tracing::trace!(car = id, "idle but too full for a new call");
            queue::refresh_indicators(car, id);
            return;
        }
        let Some(req) = self.registry.best_of_oldest(car.current_floor()) else {
            queue::refresh_indicators(car, id);
            return;
        };
        tracing::debug!(car = id, floor = req.floor, direction = %req.direction, "assigning call");
        if queue::insert(car, id, req.floor, &self.fleet.floors) {
            self.pending.assignments.push(Assignment {
                car: id,
                floor: req.floor,
                direction: Some(req.direction),
            });
        }
        self.fleet.cars[id].available = car.destination_queue().is_empty();
    }
}

impl DispatchStrategy for RequestQueueDispatch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RequestQueue
    }

    fn start<C: Car, F: Floor>(&mut self, cars: &mut [C], _floors: &[F]) -> Result<()> {
        for (id, car) in cars.iter_mut().enumerate() {
            queue::refresh_indicators(car, id);
        }
        Ok(())
    }

    fn on_event<C: Car, F: Floor>(
        &mut self,
        event: Event,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<()> {
        match event {
            Event::CarButtonPressed { car, floor } => {
                queue::insert(&mut cars[car], car, floor, &self.fleet.floors);
                self.fleet.cars[car].available = false;
            }
            Event::FloorButtonPressed { floor, direction } => {
                if self.registry.queue(floor, direction) {
                    tracing::debug!(floor, %direction, "call registered");
                }
                for (id, car) in cars.iter_mut().enumerate() {
                    if car.destination_queue().is_empty() {
                        self.idle(id, car);
                    }
                }
            }
            Event::PassingFloor {
                car,
                floor,
                direction,
            } => {
                let outcome = interceptor::on_passing(
                    &mut cars[car],
                    car,
                    floor,
                    direction,
                    floors,
                    &mut self.registry,
                    &self.cfg,
                    &self.fleet.capacity,
                );
                if let Intercept::Pickup(d) = outcome {
                    self.pending.assignments.push(Assignment {
                        car,
                        floor,
                        direction: Some(d),
                    });
                }
            }
            Event::StoppedAtFloor { car, floor } => {
                tracing::trace!(car, floor, "stopped");
                queue::refresh_indicators(&mut cars[car], car);
                if cars[car].destination_queue().is_empty() {
                    self.idle(car, &mut cars[car]);
                }
            }
            Event::Idle { car } => self.idle(car, &mut cars[car]),
        }
        Ok(())
    }

    fn on_tick<C: Car, F: Floor>(
        &mut self,
        _dt: f64,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<TickReport> {
        let mut report = std::mem::take(&mut self.pending);
        let before = report.removed.len();
        reconcile::sweep(cars, floors, &mut self.registry, &mut report);

        // Cars emptied by the sweep look for work right away.
        let mut emptied: Vec<CarId> = report.removed[before..]
            .iter()
            .map(|r| r.car)
            .filter(|&id| cars[id].destination_queue().is_empty())
            .collect();
        emptied.sort_unstable();
        emptied.dedup();
        for id in emptied {
            self.idle(id, &mut cars[id]);
        }
        report.assignments.append(&mut self.pending.assignments);

        self.fleet.refresh_availability(cars);
        Ok(report)
    }
}
