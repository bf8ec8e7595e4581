//! Tick-polled greedy dispatch.
//!
//! Every tick each lit call, ups first then downs in floor order, goes to the
//! nearest free and compatible car, unless that car's own occupants are closer.
//! Free cars left over head for their nearest occupant floor. Events are not
//! used.

use lift_traits::{Car, CarId, Direction, Event, Floor};

use crate::capacity::can_take_call;
use crate::config::StrategyKind;
use crate::error::Result;
use crate::estimator::{CarExt, NO_OCCUPANT_DISTANCE};
use crate::fleet::Fleet;
use crate::queue;
use crate::registry::Request;
use crate::status::{Assignment, TickReport};
use crate::strategy::DispatchStrategy;

#[derive(Debug)]
pub struct FloorScanDispatch {
    fleet: Fleet,
}

impl FloorScanDispatch {
    pub fn new(fleet: Fleet) -> Self {
        Self { fleet }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}

/// Lit calls, ups then downs, each in floor order.
pub fn outstanding_calls<F: Floor>(floors: &[F]) -> Vec<Request> {
    let mut lit: Vec<(i32, lift_traits::ButtonStates)> = floors
        .iter()
        .map(|f| (f.floor_num(), f.button_states()))
        .collect();
    lit.sort_unstable_by_key(|&(n, _)| n);
    [Direction::Up, Direction::Down]
        .into_iter()
        .flat_map(|d| {
            lit.iter()
                .filter(move |(_, b)| b.is_lit(d))
                .map(move |&(n, _)| Request::new(n, d))
        })
        .collect()
}

/// Make `floor` the car's only immediate target.
fn stop_and_go<C: Car + ?Sized>(car: &mut C, id: CarId, floor: i32) {
    if car.next_destination() == Some(floor) {
        return;
    }
    if !car.destination_queue().is_empty() {
        crate::host_error::check(car.stop(), id, "stop");
    }
    crate::host_error::check(car.go_to_floor(floor, true), id, "go_to_floor");
    queue::refresh_indicators(car, id);
}

impl DispatchStrategy for FloorScanDispatch {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FloorScan
    }

    fn start<C: Car, F: Floor>(&mut self, cars: &mut [C], _floors: &[F]) -> Result<()> {
        self.fleet.refresh_availability(cars);
        Ok(())
    }

    fn on_event<C: Car, F: Floor>(
        &mut self,
        event: Event,
        _cars: &mut [C],
        _floors: &[F],
    ) -> Result<()> {
        tracing::trace!(?event, "floor scan ignores events");
        Ok(())
    }

    fn on_tick<C: Car, F: Floor>(
        &mut self,
        _dt: f64,
        cars: &mut [C],
        floors: &[F],
    ) -> Result<TickReport> {
        let mut report = TickReport::default();
        self.fleet.refresh_availability(cars);
        for (id, car) in cars.iter_mut().enumerate() {
            queue::refresh_indicators(car, id);
        }

        for call in outstanding_calls(floors) {
            if !self.fleet.floors.accepts(call.floor) {
                continue;
            }
            if cars.iter().any(|c| c.next_destination() == Some(call.floor)) {
                continue;
            }
            let mut best: Option<(CarId, f64)> = None;
            for (id, car) in cars.iter().enumerate() {
                if !self.fleet.cars[id].available
                    || !can_take_call(car, &self.fleet.capacity)
                    || !car.is_compatible(call.floor, call.direction)
                {
                    continue;
                }
                let d = car.distance_to_floor(call.floor);
                let occupants = car
                    .nearest_occupant_target()
                    .map_or(NO_OCCUPANT_DISTANCE, |(_, od)| od);
                if d < occupants && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((id, d));
                }
            }
            if let Some((id, d)) = best {
                tracing::debug!(car = id, floor = call.floor, direction = %call.direction, distance = d, "assigning call");
                stop_and_go(&mut cars[id], id, call.floor);
                self.fleet.cars[id].available = false;
                report.assignments.push(Assignment {
                    car: id,
                    floor: call.floor,
                    direction: Some(call.direction),
                });
            }
        }

        for (id, car) in cars.iter_mut().enumerate() {
            if !self.fleet.cars[id].available {
                continue;
            }
            if let Some((floor, _)) = car.nearest_occupant_target() {
                tracing::debug!(car = id, floor, "heading for occupant floor");
                stop_and_go(car, id, floor);
                self.fleet.cars[id].available = false;
                report.assignments.push(Assignment {
                    car: id,
                    floor,
                    direction: None,
                });
            }
        }
        Ok(report)
    }
}
