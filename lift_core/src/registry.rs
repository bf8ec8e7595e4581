//! Outstanding hall calls in arrival order.

use lift_traits::Direction;

/// A hall call waiting for a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    pub floor: i32,
    pub direction: Direction,
}

impl Request {
    pub fn new(floor: i32, direction: Direction) -> Self {
        Self { floor, direction }
    }
}

/// Insertion-ordered set of calls, unique by `(floor, direction)`.
#[derive(Debug, Clone)]
pub struct RequestRegistry {
    entries: Vec<Request>,
    oldest_window: usize,
}

impl Default for RequestRegistry {
    fn default() -> Self {
        Self::new(2)
    }
}

impl RequestRegistry {
    /// `oldest_window` is how many of the oldest calls `best_of_oldest` weighs;
    /// values below 1 are treated as 1.
    pub fn new(oldest_window: usize) -> Self {
        Self {
            entries: Vec::new(),
            oldest_window: oldest_window.max(1),
        }
    }

    /// Record a call. Returns `false` when an identical call is already waiting.
    pub fn queue(&mut self, floor: i32, direction: Direction) -> bool {
        let req = Request::new(floor, direction);
        if self.entries.contains(&req) {
            return false;
        }
        self.entries.push(req);
        true
    }

    /// Drop the call for `(floor, direction)`. Returns how many entries went.
    pub fn remove(&mut self, floor: i32, direction: Direction) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|r| !(r.floor == floor && r.direction == direction));
        before - self.entries.len()
    }

    /// Drop every call matching `drop`; returns the dropped calls.
    pub fn drain_where(&mut self, mut drop: impl FnMut(&Request) -> bool) -> Vec<Request> {
        let mut dropped = Vec::new();
        self.entries.retain(|r| {
            if drop(r) {
                dropped.push(*r);
                false
            } else {
                true
            }
        });
        dropped
    }

    /// Take the closest of the oldest calls, measured from `from_floor`.
    ///
    /// Only the first `oldest_window` entries are considered; on equal distance
    /// the older call wins.
    pub fn best_of_oldest(&mut self, from_floor: i32) -> Option<Request> {
        let (idx, _) = self
            .entries
            .iter()
            .take(self.oldest_window)
            .enumerate()
            .fold(None, |best: Option<(usize, u32)>, (i, r)| {
                let d = r.floor.abs_diff(from_floor);
                match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((i, d)),
                }
            })?;
        Some(self.entries.remove(idx))
    }

    pub fn contains(&self, floor: i32, direction: Direction) -> bool {
        self.entries.contains(&Request::new(floor, direction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Down, Up};

    #[test]
    fn queue_dedups_by_content() {
        let mut r = RequestRegistry::default();
        assert!(r.queue(3, Up));
        // A freshly built pair with the same content is the same call.
        assert!(!r.queue(3, Up));
        assert!(r.queue(3, Down));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut r = RequestRegistry::default();
        r.queue(1, Up);
        assert_eq!(r.remove(1, Down), 0);
        assert_eq!(r.remove(7, Up), 0);
        assert_eq!(r.len(), 1);
        assert_eq!(r.remove(1, Up), 1);
        assert!(r.is_empty());
    }

    #[test]
    fn best_of_oldest_only_weighs_the_window() {
        let mut r = RequestRegistry::default();
        r.queue(9, Up);
        r.queue(6, Down);
        r.queue(1, Up); // closest, but third oldest
        assert_eq!(r.best_of_oldest(0), Some(Request::new(6, Down)));
        // 1 is now inside the window.
        assert_eq!(r.best_of_oldest(0), Some(Request::new(1, Up)));
        assert_eq!(r.best_of_oldest(0), Some(Request::new(9, Up)));
        assert_eq!(r.best_of_oldest(0), None);
    }

    #[test]
    fn best_of_oldest_tie_goes_to_oldest() {
        let mut r = RequestRegistry::default();
        r.queue(2, Up);
        r.queue(6, Down);
        assert_eq!(r.best_of_oldest(4), Some(Request::new(2, Up)));
    }

    #[test]
    fn wider_window() {
        let mut r = RequestRegistry::new(3);
        r.queue(9, Up);
        r.queue(6, Down);
        r.queue(1, Up);
        assert_eq!(r.best_of_oldest(0), Some(Request::new(1, Up)));
    }

    #[test]
    fn drain_where_returns_dropped_calls() {
        let mut r = RequestRegistry::default();
        r.queue(2, Up);
        r.queue(5, Up);
        assert_eq!(r.remove(2, Up), 1);
        let gone = r.drain_where(|q| q.floor == 5);
        assert_eq!(gone, vec![Request::new(5, Up)]);
        assert!(r.is_empty());
    }
}
