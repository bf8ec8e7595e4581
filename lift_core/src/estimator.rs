//! Position and direction estimates derived from a car's coarse signals.
//!
//! A car only reports the last floor it crossed and a coarse heading. The
//! estimate nudges the reported floor towards the heading so that a moving car
//! is never considered to sit exactly on a floor it is leaving.

use lift_traits::{Car, Direction};

/// Offset applied to the reported floor in the direction of travel.
pub const POSITION_LEAD: f64 = 0.3;
/// Offset added to a target floor when ranking distances, so a car is never
/// exactly "at" a target it has not reached yet.
pub const TARGET_BIAS: f64 = 0.1;
/// Distance used when a car has no occupant targets.
pub const NO_OCCUPANT_DISTANCE: f64 = 10_000.0;

pub trait CarExt: Car {
    /// +1 up, -1 down, 0 stationary.
    #[inline]
    fn heading_sign(&self) -> i32 {
        self.destination_direction().sign()
    }

    #[inline]
    fn estimated_position(&self) -> f64 {
        f64::from(self.current_floor()) + POSITION_LEAD * f64::from(self.heading_sign())
    }

    /// Sign of `floor - estimated_position`.
    fn direction_to_floor(&self, floor: i32) -> i32 {
        let delta = f64::from(floor) - self.estimated_position();
        if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            0
        }
    }

    /// A call is compatible when the car has no committed direction, or it
    /// travels in the call's direction and the floor is still ahead.
    fn is_compatible(&self, floor: i32, direction: Direction) -> bool {
        let sign = self.heading_sign();
        sign == 0 || (sign == direction.sign() && self.direction_to_floor(floor) == sign)
    }

    /// Biased distance used for ranking cars against a floor.
    fn distance_to_floor(&self, floor: i32) -> f64 {
        (self.estimated_position() - (f64::from(floor) + TARGET_BIAS)).abs()
    }

    #[inline]
    fn next_destination(&self) -> Option<i32> {
        self.destination_queue().first().copied()
    }

    /// Whether an occupant still needs to get off at `floor`.
    #[inline]
    fn occupant_wants(&self, floor: i32) -> bool {
        self.pressed_floors().contains(&floor)
    }

    /// Closest occupant target with its biased distance. Ties favour the
    /// earliest pressed floor.
    fn nearest_occupant_target(&self) -> Option<(i32, f64)> {
        self.pressed_floors()
            .iter()
            .map(|&f| (f, self.distance_to_floor(f)))
            .fold(None, |best, (f, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((f, d)),
            })
    }
}

impl<T: Car + ?Sized> CarExt for T {}
