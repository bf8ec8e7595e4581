//! Simulation runs: config mapping, building assembly and the host loop.

use std::sync::atomic::{AtomicBool, Ordering};

use eyre::WrapErr;

use lift_config::{Config, ScenarioRow, StrategyName};
use lift_core::{Result, Scheduler, StrategyKind};
use lift_sim::{Arrival, Building, SimConfig, SimStats};

/// Upper bound on ticks for the built-in self-check scenario.
pub const SELF_CHECK_TICKS: u64 = 20_000;

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub strategy: StrategyKind,
    pub ticks: u64,
    pub stats: SimStats,
    /// Calls still in the scheduler's registry when the run ended.
    pub pending_calls: usize,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn all_delivered(&self) -> bool {
        self.stats.delivered == self.stats.spawned
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": unix_now(),
            "strategy": self.strategy.as_str(),
            "ticks": self.ticks,
            "spawned": self.stats.spawned,
            "delivered": self.stats.delivered,
            "avg_wait_s": self.stats.avg_wait_s,
            "max_wait_s": self.stats.max_wait_s,
            "moves": self.stats.moves,
            "pending_calls": self.pending_calls,
            "interrupted": self.interrupted,
        })
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "strategy:   {}", self.strategy)?;
        writeln!(f, "ticks:      {}", self.ticks)?;
        writeln!(
            f,
            "delivered:  {}/{}",
            self.stats.delivered, self.stats.spawned
        )?;
        writeln!(f, "avg_wait_s: {:.2}", self.stats.avg_wait_s)?;
        writeln!(f, "max_wait_s: {:.2}", self.stats.max_wait_s)?;
        write!(f, "moves:      {}", self.stats.moves)?;
        if self.interrupted {
            write!(f, "\n(interrupted)")?;
        }
        Ok(())
    }
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Apply `run` subcommand overrides on top of the file config.
pub fn apply_overrides(
    cfg: &mut Config,
    ticks: Option<u64>,
    strategy: Option<StrategyName>,
    seed: Option<u64>,
) {
    if let Some(t) = ticks {
        cfg.simulation.ticks = t;
    }
    if let Some(s) = strategy {
        cfg.dispatch.strategy = s;
    }
    if let Some(s) = seed {
        cfg.simulation.seed = s;
    }
}

pub fn sim_config(cfg: &Config) -> SimConfig {
    SimConfig {
        floors: cfg.building.floors,
        cars: cfg.building.cars,
        capacity: cfg.building.capacity,
        speed_floors_per_s: cfg.building.speed_floors_per_s,
        spawn_per_s: cfg.simulation.spawn_per_s,
        seed: cfg.simulation.seed,
    }
}

fn arrival(row: &ScenarioRow) -> Arrival {
    Arrival {
        step: row.tick,
        origin: row.origin,
        destination: row.destination,
    }
}

/// Run the building for up to `simulation.ticks` ticks under the configured
/// strategy.
///
/// With a script the run ends early once every scripted passenger has been
/// delivered. A set `shutdown` flag ends the run between ticks.
pub fn simulate(
    cfg: &Config,
    script: Option<&[ScenarioRow]>,
    shutdown: &AtomicBool,
) -> Result<RunSummary> {
    let sim = sim_config(cfg);
    let mut building = match script {
        Some(rows) => Building::with_script(&sim, rows.iter().map(arrival).collect())?,
        None => Building::new(&sim)?,
    };
    let mut scheduler = Scheduler::from_config(cfg)?;
    {
        let (cars, floors) = building.parts_mut();
        scheduler
            .init(cars, floors)
            .wrap_err("initializing scheduler")?;
    }

    let dt = cfg.simulation.dt_ms as f64 / 1000.0;
    tracing::info!(
        strategy = %scheduler.strategy(),
        floors = sim.floors,
        cars = sim.cars,
        ticks = cfg.simulation.ticks,
        scripted = script.is_some(),
        "run start"
    );

    let mut ticks = 0;
    let mut interrupted = false;
    while ticks < cfg.simulation.ticks {
        if shutdown.load(Ordering::Relaxed) {
            tracing::warn!(ticks, "interrupted; stopping run");
            interrupted = true;
            break;
        }
        let events = building.step(dt);
        let (cars, floors) = building.parts_mut();
        for event in events {
            scheduler
                .handle_event(event, cars, floors)
                .wrap_err_with(|| format!("tick {ticks}: handling {event:?}"))?;
        }
        let report = scheduler
            .update(dt, cars, floors)
            .wrap_err_with(|| format!("tick {ticks}: update"))?;
        for a in &report.assignments {
            tracing::debug!(tick = ticks, car = a.car, floor = a.floor, "assigned");
        }
        ticks += 1;

        if script.is_some() && !building.script_pending() && building.in_flight() == 0 {
            break;
        }
    }

    let summary = RunSummary {
        strategy: scheduler.strategy(),
        ticks,
        stats: building.stats(),
        pending_calls: scheduler.pending_calls(),
        interrupted,
    };
    tracing::info!(
        delivered = summary.stats.delivered,
        spawned = summary.stats.spawned,
        avg_wait_s = summary.stats.avg_wait_s,
        moves = summary.stats.moves,
        "run complete"
    );
    Ok(summary)
}

/// Trips that exercise both call directions on any building of two or more
/// floors.
pub fn self_check_script(floors: u32) -> Vec<ScenarioRow> {
    let top = floors as i32 - 1;
    [(0, 0, top), (0, top, 0), (4, top / 2, top), (8, 1, 0)]
        .into_iter()
        .map(|(tick, origin, destination)| ScenarioRow {
            tick,
            origin,
            destination,
        })
        .collect()
}

/// Deliver the built-in scenario with every strategy.
pub fn self_check(cfg: &Config, shutdown: &AtomicBool) -> Result<Vec<RunSummary>> {
    let script = self_check_script(cfg.building.floors);
    let mut out = Vec::new();
    for name in [StrategyName::RequestQueue, StrategyName::FloorScan] {
        let mut c = cfg.clone();
        c.dispatch.strategy = name;
        c.simulation.ticks = SELF_CHECK_TICKS;
        let summary = simulate(&c, Some(&script), shutdown)?;
        if !summary.all_delivered() {
            eyre::bail!(
                "self-check failed: {} delivered {}/{} passengers in {} ticks",
                summary.strategy,
                summary.stats.delivered,
                summary.stats.spawned,
                summary.ticks
            );
        }
        out.push(summary);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_check_script_fits_smallest_building() {
        let rows = self_check_script(2);
        assert!(
            rows.iter()
                .all(|r| r.origin != r.destination && (0..=1).contains(&r.origin))
        );
        let cfg = Config::default();
        assert!(cfg.check_scenario(&self_check_script(8)).is_ok());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, Some(10), Some(StrategyName::FloorScan), None);
        assert_eq!(cfg.simulation.ticks, 10);
        assert_eq!(cfg.dispatch.strategy, StrategyName::FloorScan);
        assert_eq!(cfg.simulation.seed, 7);
    }

    #[test]
    fn shutdown_flag_stops_before_first_tick() {
        let flag = AtomicBool::new(true);
        let s = simulate(&Config::default(), None, &flag).unwrap();
        assert!(s.interrupted);
        assert_eq!(s.ticks, 0);
    }

    #[test]
    fn scripted_run_ends_when_everyone_arrived() {
        let flag = AtomicBool::new(false);
        let mut cfg = Config::default();
        cfg.simulation.ticks = SELF_CHECK_TICKS;
        let rows = [ScenarioRow {
            tick: 0,
            origin: 0,
            destination: 5,
        }];
        let s = simulate(&cfg, Some(&rows), &flag).unwrap();
        assert!(s.all_delivered());
        assert_eq!(s.stats.spawned, 1);
        assert!(s.ticks < SELF_CHECK_TICKS);
        assert!(!s.interrupted);
    }
}
