//! Test and helper mocks for lift_core
//!
//! `MockCar` records every command it receives and can be told to fail them;
//! `MockFloor` is a pair of hall buttons.

use lift_traits::{ButtonStates, Car, Direction, Floor, Heading, HostResult};

/// A command received by a `MockCar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetQueue(Vec<i32>),
    GoTo { floor: i32, immediate: bool },
    Stop,
    UpIndicator(bool),
    DownIndicator(bool),
}

#[derive(Debug, Clone)]
pub struct MockCar {
    pub floor: i32,
    pub heading: Heading,
    pub load: f64,
    pub max_passengers: u32,
    pub pressed: Vec<i32>,
    pub queue: Vec<i32>,
    pub going_up: bool,
    pub going_down: bool,
    pub log: Vec<Command>,
    /// When set, every command fails without changing state.
    pub fail_commands: bool,
}

impl MockCar {
    /// Empty, stationary car with room for four.
    pub fn at(floor: i32) -> Self {
        Self {
            floor,
            heading: Heading::Stationary,
            load: 0.0,
            max_passengers: 4,
            pressed: Vec::new(),
            queue: Vec::new(),
            going_up: true,
            going_down: true,
            log: Vec::new(),
            fail_commands: false,
        }
    }

    pub fn heading(mut self, heading: Heading) -> Self {
        self.heading = heading;
        self
    }

    pub fn load(mut self, load: f64) -> Self {
        self.load = load;
        self
    }

    pub fn capacity(mut self, max_passengers: u32) -> Self {
        self.max_passengers = max_passengers;
        self
    }

    pub fn pressed(mut self, floors: &[i32]) -> Self {
        self.pressed = floors.to_vec();
        self
    }

    pub fn queue(mut self, floors: &[i32]) -> Self {
        self.queue = floors.to_vec();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_commands = true;
        self
    }

    fn record(&mut self, cmd: Command) -> HostResult {
        if self.fail_commands {
            return Err(format!("mock car rejected {cmd:?}").into());
        }
        self.log.push(cmd);
        Ok(())
    }
}

impl Car for MockCar {
    fn current_floor(&self) -> i32 {
        self.floor
    }
    fn destination_direction(&self) -> Heading {
        self.heading
    }
    fn load_factor(&self) -> f64 {
        self.load
    }
    fn max_passenger_count(&self) -> u32 {
        self.max_passengers
    }
    fn pressed_floors(&self) -> &[i32] {
        &self.pressed
    }
    fn destination_queue(&self) -> &[i32] {
        &self.queue
    }

    fn set_destination_queue(&mut self, queue: Vec<i32>) -> HostResult {
        self.record(Command::SetQueue(queue.clone()))?;
        self.queue = queue;
        Ok(())
    }

    fn go_to_floor(&mut self, floor: i32, immediate: bool) -> HostResult {
        self.record(Command::GoTo { floor, immediate })?;
        if immediate {
            self.queue.retain(|&f| f != floor);
            self.queue.insert(0, floor);
        } else if !self.queue.contains(&floor) {
            self.queue.push(floor);
        }
        Ok(())
    }

    fn stop(&mut self) -> HostResult {
        self.record(Command::Stop)?;
        self.queue.clear();
        Ok(())
    }

    fn set_going_up_indicator(&mut self, on: bool) -> HostResult {
        self.record(Command::UpIndicator(on))?;
        self.going_up = on;
        Ok(())
    }

    fn set_going_down_indicator(&mut self, on: bool) -> HostResult {
        self.record(Command::DownIndicator(on))?;
        self.going_down = on;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFloor {
    pub num: i32,
    pub buttons: ButtonStates,
}

impl MockFloor {
    pub fn new(num: i32) -> Self {
        Self {
            num,
            buttons: ButtonStates::default(),
        }
    }

    /// Floors `0..n` with dark buttons.
    pub fn building(n: i32) -> Vec<Self> {
        (0..n).map(Self::new).collect()
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.buttons.up = true,
            Direction::Down => self.buttons.down = true,
        }
    }

    pub fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.buttons.up = false,
            Direction::Down => self.buttons.down = false,
        }
    }
}

impl Floor for MockFloor {
    fn floor_num(&self) -> i32 {
        self.num
    }
    fn button_states(&self) -> ButtonStates {
        self.buttons
    }
}
