//! Per-car scheduler state and the building layout learned at init.

use lift_traits::{ButtonStates, Car, CarId, Floor};

use crate::config::CapacityCfg;

/// Derived state the scheduler keeps beside each host car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarState {
    pub id: CarId,
    /// Empty destination queue at the last refresh.
    pub available: bool,
}

/// Floors that exist in the building, sorted.
#[derive(Debug, Clone, Default)]
pub struct KnownFloors {
    floors: Vec<i32>,
}

impl KnownFloors {
    pub fn from_floors<F: Floor>(floors: &[F]) -> Self {
        let mut nums: Vec<i32> = floors.iter().map(Floor::floor_num).collect();
        nums.sort_unstable();
        nums.dedup();
        Self { floors: nums }
    }

    /// Whether a car may be sent to `floor`.
    pub fn accepts(&self, floor: i32) -> bool {
        floor >= 0 && self.floors.binary_search(&floor).is_ok()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}

/// Everything both strategies share about the fleet.
#[derive(Debug, Clone)]
pub struct Fleet {
    pub cars: Vec<CarState>,
    pub floors: KnownFloors,
    pub capacity: CapacityCfg,
}

impl Fleet {
    pub fn learn<C: Car, F: Floor>(cars: &[C], floors: &[F], capacity: CapacityCfg) -> Self {
        Self {
            cars: cars
                .iter()
                .enumerate()
                .map(|(id, c)| CarState {
                    id,
                    available: c.destination_queue().is_empty(),
                })
                .collect(),
            floors: KnownFloors::from_floors(floors),
            capacity,
        }
    }

    /// Refresh the availability flag of every car from the host.
    pub fn refresh_availability<C: Car>(&mut self, cars: &[C]) {
        for (state, car) in self.cars.iter_mut().zip(cars) {
            state.available = car.destination_queue().is_empty();
        }
    }
}

/// Button state of the floor numbered `floor`, if the building has it.
pub fn buttons_at<F: Floor>(floors: &[F], floor: i32) -> Option<ButtonStates> {
    floors
        .iter()
        .find(|f| f.floor_num() == floor)
        .map(Floor::button_states)
}
