//! Passengers and the arrival processes that create them.

use lift_traits::Direction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id: u64,
    pub origin: i32,
    pub destination: i32,
    /// Simulation time (s) the passenger started waiting.
    pub spawned_at: f64,
    pub boarded_at: Option<f64>,
}

impl Passenger {
    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// A scripted passenger appearing at a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub step: u64,
    pub origin: i32,
    pub destination: i32,
}

/// Random arrivals: a Poisson process over time with uniformly drawn trips,
/// part of them starting at the lobby.
#[derive(Debug, Clone)]
pub struct RandomArrivals {
    rate_per_sec: f64,
    rng: StdRng,
    next_at: f64,
}

/// Share of random trips that start at floor 0.
const LOBBY_SHARE: f64 = 0.4;

impl RandomArrivals {
    pub fn new(rate_per_sec: f64, seed: u64) -> Self {
        let mut me = Self {
            rate_per_sec: rate_per_sec.max(0.0),
            rng: StdRng::seed_from_u64(seed),
            next_at: 0.0,
        };
        me.next_at = me.gap();
        me
    }

    /// Exponential inter-arrival time in seconds.
    fn gap(&mut self) -> f64 {
        if self.rate_per_sec <= 0.0 {
            return f64::INFINITY;
        }
        let u: f64 = self.rng.r#gen();
        let u = u.max(1e-10);
        -u.ln() / self.rate_per_sec
    }

    /// Trips `(origin, destination)` starting in `(.., now]`.
    pub fn due(&mut self, now: f64, floors: i32) -> Vec<(i32, i32)> {
        let mut trips = Vec::new();
        if floors < 2 {
            return trips;
        }
        while self.next_at <= now {
            let origin = if self.rng.gen_bool(LOBBY_SHARE) {
                0
            } else {
                self.rng.gen_range(0..floors)
            };
            // Any other floor, uniformly.
            let mut destination = self.rng.gen_range(0..floors - 1);
            if destination >= origin {
                destination += 1;
            }
            trips.push((origin, destination));
            self.next_at += self.gap();
        }
        trips
    }
}
