/// Direction of a hall call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse travel direction reported by a car.
///
/// - `Up`/`Down`: the car is committed to a destination in that direction
/// - `Stationary`: no committed direction (also the fallback for unknown signals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heading {
    Up,
    Down,
    #[default]
    Stationary,
}

impl Heading {
    /// +1 for up, -1 for down, 0 otherwise.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Heading::Up => 1,
            Heading::Down => -1,
            Heading::Stationary => 0,
        }
    }

    /// Parse a host direction signal. Anything other than "up"/"down" degrades to
    /// `Stationary`.
    pub fn from_signal(signal: &str) -> Self {
        match signal.trim().to_ascii_lowercase().as_str() {
            "up" => Heading::Up,
            "down" => Heading::Down,
            _ => Heading::Stationary,
        }
    }

    /// Call direction this heading travels in, if any.
    #[inline]
    pub fn as_direction(self) -> Option<Direction> {
        match self {
            Heading::Up => Some(Direction::Up),
            Heading::Down => Some(Direction::Down),
            Heading::Stationary => None,
        }
    }
}

impl From<Direction> for Heading {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Heading::Up,
            Direction::Down => Heading::Down,
        }
    }
}

/// Lit state of a floor's hall call buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStates {
    pub up: bool,
    pub down: bool,
}

impl ButtonStates {
    #[inline]
    pub fn is_lit(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}
