/// Outcome of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimStats {
    pub spawned: u64,
    pub delivered: u64,
    /// Mean time from arrival to boarding, over boarded passengers.
    pub avg_wait_s: f64,
    pub max_wait_s: f64,
    /// Stops made by all cars.
    pub moves: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct StatsCollector {
    pub spawned: u64,
    pub delivered: u64,
    pub boarded: u64,
    pub wait_sum_s: f64,
    pub max_wait_s: f64,
    pub moves: u64,
}

impl StatsCollector {
    pub fn record_wait(&mut self, wait_s: f64) {
        self.boarded += 1;
        self.wait_sum_s += wait_s;
        self.max_wait_s = self.max_wait_s.max(wait_s);
    }

    pub fn snapshot(&self) -> SimStats {
        SimStats {
            spawned: self.spawned,
            delivered: self.delivered,
            avg_wait_s: if self.boarded == 0 {
                0.0
            } else {
                self.wait_sum_s / self.boarded as f64
            },
            max_wait_s: self.max_wait_s,
            moves: self.moves,
        }
    }
}
