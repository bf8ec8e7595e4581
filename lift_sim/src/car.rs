//! Simulated car implementing the host `Car` contract.

use lift_traits::{Car, CarId, Heading, HostResult};

use crate::error::SimError;
use crate::passenger::Passenger;

/// Positions closer than this to an integer count as on that floor.
const ON_FLOOR_EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SimCar {
    pub(crate) id: CarId,
    /// Continuous position in floors.
    pub(crate) position: f64,
    /// Direction of the last movement, used to settle after `stop()`.
    pub(crate) motion: Heading,
    pub(crate) queue: Vec<i32>,
    pub(crate) passengers: Vec<Passenger>,
    /// Distinct occupant destinations in press order.
    pub(crate) pressed: Vec<i32>,
    pub(crate) capacity: u32,
    pub(crate) going_up: bool,
    pub(crate) going_down: bool,
    pub(crate) doors_open: bool,
    top: i32,
}

impl SimCar {
    pub fn new(id: CarId, floor: i32, capacity: u32, floors: i32) -> Self {
        Self {
            id,
            position: f64::from(floor),
            motion: Heading::Stationary,
            queue: Vec::new(),
            passengers: Vec::new(),
            pressed: Vec::new(),
            capacity: capacity.max(1),
            going_up: true,
            going_down: true,
            doors_open: true,
            top: floors - 1,
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn indicators(&self) -> (bool, bool) {
        (self.going_up, self.going_down)
    }

    /// Integer floor the car is standing on, if any.
    pub fn on_floor(&self) -> Option<i32> {
        let r = self.position.round();
        ((self.position - r).abs() < ON_FLOOR_EPS).then_some(r as i32)
    }

    pub fn free_slots(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.passengers.len())
    }

    pub(crate) fn board(&mut self, p: Passenger) -> bool {
        let new_press = !self.pressed.contains(&p.destination);
        if new_press {
            self.pressed.push(p.destination);
        }
        self.passengers.push(p);
        new_press
    }

    /// Let off everyone bound for `floor`.
    pub(crate) fn unload(&mut self, floor: i32) -> Vec<Passenger> {
        let (out, stay): (Vec<_>, Vec<_>) = std::mem::take(&mut self.passengers)
            .into_iter()
            .partition(|p| p.destination == floor);
        self.passengers = stay;
        self.pressed.retain(|&f| f != floor);
        out
    }

    fn check_floor(&self, floor: i32) -> Result<(), SimError> {
        if (0..=self.top).contains(&floor) {
            Ok(())
        } else {
            Err(SimError::UnknownFloor(floor))
        }
    }
}

impl Car for SimCar {
    fn current_floor(&self) -> i32 {
        match self.destination_direction() {
            Heading::Up => self.position.floor() as i32,
            Heading::Down => self.position.ceil() as i32,
            Heading::Stationary => self.position.round() as i32,
        }
    }

    fn destination_direction(&self) -> Heading {
        match self.queue.first() {
            Some(&head) if f64::from(head) > self.position + ON_FLOOR_EPS => Heading::Up,
            Some(&head) if f64::from(head) < self.position - ON_FLOOR_EPS => Heading::Down,
            _ => Heading::Stationary,
        }
    }

    fn load_factor(&self) -> f64 {
        self.passengers.len() as f64 / f64::from(self.capacity)
    }

    fn max_passenger_count(&self) -> u32 {
        self.capacity
    }

    fn pressed_floors(&self) -> &[i32] {
        &self.pressed
    }

    fn destination_queue(&self) -> &[i32] {
        &self.queue
    }

    fn set_destination_queue(&mut self, queue: Vec<i32>) -> HostResult {
        for &f in &queue {
            self.check_floor(f)?;
        }
        self.queue = queue;
        Ok(())
    }

    fn go_to_floor(&mut self, floor: i32, immediate: bool) -> HostResult {
        self.check_floor(floor)?;
        if immediate {
            self.queue.retain(|&f| f != floor);
            self.queue.insert(0, floor);
        } else if !self.queue.contains(&floor) {
            self.queue.push(floor);
        }
        Ok(())
    }

    fn stop(&mut self) -> HostResult {
        self.queue.clear();
        Ok(())
    }

    fn set_going_up_indicator(&mut self, on: bool) -> HostResult {
        self.going_up = on;
        Ok(())
    }

    fn set_going_down_indicator(&mut self, on: bool) -> HostResult {
        self.going_down = on;
        Ok(())
    }
}
