//! `From` implementations bridging `lift_config` types to `lift_core` types.

use crate::config::{CapacityCfg, DispatchCfg, StrategyKind};

impl From<lift_config::StrategyName> for StrategyKind {
    fn from(s: lift_config::StrategyName) -> Self {
        match s {
            lift_config::StrategyName::RequestQueue => StrategyKind::RequestQueue,
            lift_config::StrategyName::FloorScan => StrategyKind::FloorScan,
        }
    }
}

impl From<&lift_config::Dispatch> for DispatchCfg {
    fn from(c: &lift_config::Dispatch) -> Self {
        Self {
            strategy: c.strategy.into(),
            oldest_window: c.oldest_window,
            pickup_unqueued_floors: c.pickup_unqueued_floors,
        }
    }
}

impl From<&lift_config::Capacity> for CapacityCfg {
    fn from(c: &lift_config::Capacity) -> Self {
        Self {
            min_free_fraction: c.min_free_fraction,
            assign_min_space: c.assign_min_space,
            pickup_min_space: c.pickup_min_space,
        }
    }
}
