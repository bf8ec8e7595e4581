//! The simulated building: cars, floors and passengers advanced in steps.
//!
//! Each `step` runs, in order: arrivals (lighting buttons), boarding at cars
//! whose doors are open, then car motion. Cars never cross more than one floor
//! boundary per step. Events come back sorted in host delivery order.

use std::collections::VecDeque;

use lift_traits::{Car, Direction, Event, Heading};

use crate::car::SimCar;
use crate::error::{Result, SimError};
use crate::floor::SimFloor;
use crate::passenger::{Arrival, Passenger, RandomArrivals};
use crate::stats::{SimStats, StatsCollector};

/// Seconds a waiting passenger tolerates a lit button before pressing again.
pub const PATIENCE_S: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub floors: u32,
    pub cars: u32,
    pub capacity: u32,
    pub speed_floors_per_s: f64,
    pub spawn_per_s: f64,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floors: 8,
            cars: 3,
            capacity: 6,
            speed_floors_per_s: 1.0,
            spawn_per_s: 0.5,
            seed: 7,
        }
    }
}

#[derive(Debug)]
pub struct Building {
    cars: Vec<SimCar>,
    floors: Vec<SimFloor>,
    speed: f64,
    now: f64,
    step_no: u64,
    random: RandomArrivals,
    script: Option<VecDeque<Arrival>>,
    next_passenger: u64,
    stats: StatsCollector,
}

impl Building {
    /// Random arrivals at `spawn_per_s`.
    pub fn new(cfg: &SimConfig) -> Result<Self> {
        if cfg.floors < 2 {
            return Err(SimError::InvalidBuilding("need at least two floors"));
        }
        if cfg.cars == 0 {
            return Err(SimError::InvalidBuilding("need at least one car"));
        }
        if !(cfg.speed_floors_per_s.is_finite() && cfg.speed_floors_per_s > 0.0) {
            return Err(SimError::InvalidBuilding("speed must be > 0"));
        }
        let n = cfg.floors as i32;
        Ok(Self {
            // Cars start spread over the building.
            cars: (0..cfg.cars as usize)
                .map(|id| {
                    let start = (id as i32 * n) / cfg.cars as i32;
                    SimCar::new(id, start, cfg.capacity, n)
                })
                .collect(),
            floors: (0..n).map(SimFloor::new).collect(),
            speed: cfg.speed_floors_per_s,
            now: 0.0,
            step_no: 0,
            random: RandomArrivals::new(cfg.spawn_per_s, cfg.seed),
            script: None,
            next_passenger: 0,
            stats: StatsCollector::default(),
        })
    }

    /// Only the scripted arrivals, no random ones.
    pub fn with_script(cfg: &SimConfig, arrivals: Vec<Arrival>) -> Result<Self> {
        let mut me = Self::new(cfg)?;
        let top = cfg.floors as i32 - 1;
        for a in &arrivals {
            let valid = (0..=top).contains(&a.origin)
                && (0..=top).contains(&a.destination)
                && a.origin != a.destination;
            if !valid {
                return Err(SimError::InvalidTrip {
                    origin: a.origin,
                    destination: a.destination,
                });
            }
        }
        let mut arrivals = arrivals;
        arrivals.sort_by_key(|a| a.step);
        me.script = Some(arrivals.into());
        Ok(me)
    }

    /// Cars and floors at once, as the scheduler wants them.
    pub fn parts_mut(&mut self) -> (&mut [SimCar], &[SimFloor]) {
        (&mut self.cars, &self.floors)
    }

    pub fn cars(&self) -> &[SimCar] {
        &self.cars
    }

    pub fn floors(&self) -> &[SimFloor] {
        &self.floors
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn stats(&self) -> SimStats {
        self.stats.snapshot()
    }

    /// Passengers waiting on floors or riding in cars.
    pub fn in_flight(&self) -> usize {
        self.floors.iter().map(|f| f.waiting.len()).sum::<usize>()
            + self.cars.iter().map(|c| c.passengers.len()).sum::<usize>()
    }

    /// Whether scripted arrivals remain to be spawned.
    pub fn script_pending(&self) -> bool {
        self.script.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Add a waiting passenger now. Lights the button if needed.
    pub fn spawn(&mut self, origin: i32, destination: i32) -> Result<Vec<Event>> {
        let top = self.floors.len() as i32 - 1;
        if !(0..=top).contains(&origin) || !(0..=top).contains(&destination) || origin == destination
        {
            return Err(SimError::InvalidTrip {
                origin,
                destination,
            });
        }
        let p = Passenger {
            id: self.next_passenger,
            origin,
            destination,
            spawned_at: self.now,
            boarded_at: None,
        };
        self.next_passenger += 1;
        self.stats.spawned += 1;
        let direction = p.direction();
        tracing::trace!(id = p.id, origin, destination, "passenger arrived");
        let floor = &mut self.floors[origin as usize];
        floor.waiting.push(p);
        let mut events = Vec::new();
        if floor.press(direction, self.now) {
            events.push(Event::FloorButtonPressed {
                floor: origin,
                direction,
            });
        }
        Ok(events)
    }

    /// Advance the building by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Vec<Event> {
        let mut events = Vec::new();
        self.now += dt;

        self.arrivals(&mut events);
        self.repress(&mut events);
        for id in 0..self.cars.len() {
            self.board(id, &mut events);
        }
        for id in 0..self.cars.len() {
            self.advance(id, dt, &mut events);
        }

        self.step_no += 1;
        events.sort_by_key(Event::delivery_rank);
        events
    }

    fn arrivals(&mut self, events: &mut Vec<Event>) {
        let trips: Vec<(i32, i32)> = match self.script.as_mut() {
            Some(script) => {
                let mut due = Vec::new();
                while script.front().is_some_and(|a| a.step <= self.step_no) {
                    if let Some(a) = script.pop_front() {
                        due.push((a.origin, a.destination));
                    }
                }
                due
            }
            None => self.random.due(self.now, self.floors.len() as i32),
        };
        for (origin, destination) in trips {
            match self.spawn(origin, destination) {
                Ok(evs) => events.extend(evs),
                Err(e) => tracing::warn!(error = %e, "dropping arrival"),
            }
        }
    }

    /// Passengers who have waited too long press their lit button again.
    fn repress(&mut self, events: &mut Vec<Event>) {
        for floor in &mut self.floors {
            for direction in floor.repress_due(self.now, PATIENCE_S) {
                events.push(Event::FloorButtonPressed {
                    floor: floor.num,
                    direction,
                });
            }
        }
    }

    /// Waiting passengers step into a car standing with open doors, if its
    /// lanterns show their direction.
    fn board(&mut self, id: usize, events: &mut Vec<Event>) {
        let car = &mut self.cars[id];
        if !car.doors_open {
            return;
        }
        let Some(at) = car.on_floor() else {
            return;
        };
        let floor = &mut self.floors[at as usize];
        if floor.waiting.is_empty() {
            return;
        }
        let mut stay = Vec::new();
        for mut p in std::mem::take(&mut floor.waiting) {
            let lit = match p.direction() {
                Direction::Up => car.going_up,
                Direction::Down => car.going_down,
            };
            if !lit || car.free_slots() == 0 {
                stay.push(p);
                continue;
            }
            p.boarded_at = Some(self.now);
            self.stats.record_wait(self.now - p.spawned_at);
            let destination = p.destination;
            if car.board(p) {
                events.push(Event::CarButtonPressed {
                    car: id,
                    floor: destination,
                });
            }
        }
        floor.waiting = stay;
        floor.settle_buttons();
    }

    fn advance(&mut self, id: usize, dt: f64, events: &mut Vec<Event>) {
        let car = &mut self.cars[id];
        let target = match car.queue.first() {
            Some(&head) => head,
            None => match car.on_floor() {
                // Idle on a floor: doors stay open.
                Some(_) => {
                    car.doors_open = true;
                    return;
                }
                // Stopped mid-shaft: settle on the next floor.
                None => match car.motion {
                    Heading::Down => car.position.floor() as i32,
                    _ => car.position.ceil() as i32,
                },
            },
        };

        if car.on_floor() == Some(target) {
            self.arrive(id, target, events);
            return;
        }

        let car = &mut self.cars[id];
        car.doors_open = false;
        let heading = if f64::from(target) > car.position {
            Heading::Up
        } else {
            Heading::Down
        };
        car.motion = heading;
        let reach = self.speed * dt;
        let new_pos = match heading {
            Heading::Up => {
                let boundary = car.position.floor() + 1.0;
                (car.position + reach).min(boundary).min(f64::from(target))
            }
            _ => {
                let boundary = car.position.ceil() - 1.0;
                (car.position - reach).max(boundary).max(f64::from(target))
            }
        };
        car.position = new_pos;

        if let Some(at) = car.on_floor() {
            car.position = f64::from(at);
            if at == target {
                self.arrive(id, target, events);
            } else {
                events.push(Event::PassingFloor {
                    car: id,
                    floor: at,
                    direction: heading,
                });
            }
        }
    }

    fn arrive(&mut self, id: usize, floor: i32, events: &mut Vec<Event>) {
        let car = &mut self.cars[id];
        car.position = f64::from(floor);
        car.motion = Heading::Stationary;
        if car.queue.first() == Some(&floor) {
            car.queue.remove(0);
        }
        let out = car.unload(floor);
        car.doors_open = true;
        self.stats.delivered += out.len() as u64;
        self.stats.moves += 1;
        tracing::trace!(car = id, floor, delivered = out.len(), "car stopped");
        events.push(Event::StoppedAtFloor { car: id, floor });
    }
}
