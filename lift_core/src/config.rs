//! Runtime configuration for the dispatcher.
//!
//! These are the structs the scheduler works with. They are separate from the
//! TOML-deserialized config in `lift_config`.

/// Which dispatch strategy the scheduler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Event-driven request queue with opportunistic pickup.
    #[default]
    RequestQueue,
    /// Tick-polled greedy floor scan.
    FloorScan,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::RequestQueue => "request_queue",
            StrategyKind::FloorScan => "floor_scan",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "request_queue" => Ok(StrategyKind::RequestQueue),
            "floor_scan" => Ok(StrategyKind::FloorScan),
            other => Err(format!(
                "unknown strategy '{other}' (expected request_queue or floor_scan)"
            )),
        }
    }
}

/// Free-capacity thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityCfg {
    /// A car with less free load fraction than this counts as full.
    pub min_free_fraction: f64,
    /// Free space (in passengers) strictly required to take a new call.
    pub assign_min_space: f64,
    /// Free space (in passengers) required to stop for a passing call.
    pub pickup_min_space: f64,
}

impl Default for CapacityCfg {
    fn default() -> Self {
        Self {
            min_free_fraction: 0.33,
            assign_min_space: 1.0,
            pickup_min_space: 0.8,
        }
    }
}

/// Dispatch policy knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCfg {
    pub strategy: StrategyKind,
    /// Number of oldest registry entries an idle car chooses from.
    pub oldest_window: usize,
    /// Stop for lit calls on crossed floors that are not queued at all.
    pub pickup_unqueued_floors: bool,
}

impl Default for DispatchCfg {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::RequestQueue,
            oldest_window: 2,
            pickup_unqueued_floors: false,
        }
    }
}
