//! Simulated floor: a pair of hall buttons and a waiting line.

use lift_traits::{ButtonStates, Direction, Floor};

use crate::passenger::Passenger;

#[derive(Debug, Clone)]
pub struct SimFloor {
    pub(crate) num: i32,
    pub(crate) buttons: ButtonStates,
    pub(crate) waiting: Vec<Passenger>,
    /// Time each button was last pressed.
    pub(crate) pressed_at: [Option<f64>; 2],
}

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
    }
}

impl SimFloor {
    pub fn new(num: i32) -> Self {
        Self {
            num,
            buttons: ButtonStates::default(),
            waiting: Vec::new(),
            pressed_at: [None, None],
        }
    }

    pub fn waiting(&self) -> &[Passenger] {
        &self.waiting
    }

    /// Light the button for `direction`. Returns true on a dark to lit change.
    pub(crate) fn press(&mut self, direction: Direction, now: f64) -> bool {
        let was_lit = self.buttons.is_lit(direction);
        match direction {
            Direction::Up => self.buttons.up = true,
            Direction::Down => self.buttons.down = true,
        }
        if !was_lit {
            self.pressed_at[slot(direction)] = Some(now);
        }
        !was_lit
    }

    /// Turn off buttons nobody is waiting behind any more.
    pub(crate) fn settle_buttons(&mut self) {
        for d in [Direction::Up, Direction::Down] {
            if !self.waiting.iter().any(|p| p.direction() == d) {
                match d {
                    Direction::Up => self.buttons.up = false,
                    Direction::Down => self.buttons.down = false,
                }
                self.pressed_at[slot(d)] = None;
            }
        }
    }

    /// Lit buttons pressed at least `patience` seconds ago; their timers restart.
    pub(crate) fn repress_due(&mut self, now: f64, patience: f64) -> Vec<Direction> {
        let mut due = Vec::new();
        for d in [Direction::Up, Direction::Down] {
            let s = slot(d);
            if let Some(at) = self.pressed_at[s]
                && self.buttons.is_lit(d)
                && now - at >= patience
            {
                self.pressed_at[s] = Some(now);
                due.push(d);
            }
        }
        due
    }
}

impl Floor for SimFloor {
    fn floor_num(&self) -> i32 {
        self.num
    }

    fn button_states(&self) -> ButtonStates {
        self.buttons
    }
}
