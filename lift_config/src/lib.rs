#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and scenario parsing for the lift dispatcher.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The scenario CSV loader enforces headers and rejects passengers that could
//!   never be delivered (same origin and destination, negative floors).
use serde::Deserialize;

/// Scripted passenger row.
///
/// Expected headers:
/// tick,origin,destination
///
/// Example:
/// tick,origin,destination
/// 0,0,5
/// 12,7,1
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioRow {
    pub tick: u64,
    pub origin: i32,
    pub destination: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Building {
    pub floors: u32,
    pub cars: u32,
    /// Passengers per car
    pub capacity: u32,
    pub speed_floors_per_s: f64,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            floors: 8,
            cars: 3,
            capacity: 6,
            speed_floors_per_s: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    #[default]
    RequestQueue,
    FloorScan,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dispatch {
    pub strategy: StrategyName,
    /// How many of the oldest calls an idle car chooses from
    pub oldest_window: usize,
    /// Also stop for lit calls on floors that are not queued at all
    pub pickup_unqueued_floors: bool,
}

impl Default for Dispatch {
    fn default() -> Self {
        Self {
            strategy: StrategyName::RequestQueue,
            oldest_window: 2,
            pickup_unqueued_floors: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Capacity {
    /// Below this free-load fraction a car counts as full
    pub min_free_fraction: f64,
    /// Free space required to take a new call
    pub assign_min_space: f64,
    /// Free space required for an opportunistic pickup
    pub pickup_min_space: f64,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            min_free_fraction: 0.33,
            assign_min_space: 1.0,
            pickup_min_space: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub seed: u64,
    pub ticks: u64,
    pub dt_ms: u64,
    /// Mean random passenger arrivals per second (ignored with a scenario CSV)
    pub spawn_per_s: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: 7,
            ticks: 2000,
            dt_ms: 100,
            spawn_per_s: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub building: Building,
    #[serde(default)]
    pub dispatch: Dispatch,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub simulation: Simulation,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_scenario_csv(path: &std::path::Path) -> eyre::Result<Vec<ScenarioRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open scenario CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["tick", "origin", "destination"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "scenario CSV must have headers 'tick,origin,destination', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ScenarioRow>().enumerate() {
        let row = match rec {
            Ok(row) => row,
            Err(e) => eyre::bail!("invalid CSV row {}: {}", idx + 2, e),
        };
        if row.origin < 0 || row.destination < 0 {
            eyre::bail!("scenario row {} has a negative floor", idx + 2);
        }
        if row.origin == row.destination {
            eyre::bail!(
                "scenario row {} has identical origin and destination ({})",
                idx + 2,
                row.origin
            );
        }
        rows.push(row);
    }
    rows.sort_by_key(|r| r.tick);
    Ok(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Building
        if self.building.floors < 2 {
            eyre::bail!("building.floors must be >= 2");
        }
        if self.building.cars == 0 {
            eyre::bail!("building.cars must be >= 1");
        }
        if self.building.capacity == 0 {
            eyre::bail!("building.capacity must be >= 1");
        }
        if !(self.building.speed_floors_per_s.is_finite() && self.building.speed_floors_per_s > 0.0)
        {
            eyre::bail!("building.speed_floors_per_s must be > 0");
        }

        // Dispatch
        if self.dispatch.oldest_window == 0 {
            eyre::bail!("dispatch.oldest_window must be >= 1");
        }

        // Capacity
        let cap = &self.capacity;
        if !(0.0..=1.0).contains(&cap.min_free_fraction) {
            eyre::bail!("capacity.min_free_fraction must be in [0.0, 1.0]");
        }
        if !(cap.assign_min_space.is_finite() && cap.assign_min_space >= 0.0) {
            eyre::bail!("capacity.assign_min_space must be >= 0");
        }
        if !(cap.pickup_min_space.is_finite() && cap.pickup_min_space >= 0.0) {
            eyre::bail!("capacity.pickup_min_space must be >= 0");
        }

        // Simulation
        if self.simulation.dt_ms == 0 {
            eyre::bail!("simulation.dt_ms must be >= 1");
        }
        if self.simulation.dt_ms > 60_000 {
            eyre::bail!("simulation.dt_ms is unreasonably large (>1min)");
        }
        if !(self.simulation.spawn_per_s.is_finite() && self.simulation.spawn_per_s >= 0.0) {
            eyre::bail!("simulation.spawn_per_s must be >= 0");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }

    /// Reject scenario rows that reference floors outside the building.
    pub fn check_scenario(&self, rows: &[ScenarioRow]) -> eyre::Result<()> {
        let top = self.building.floors as i32 - 1;
        for (idx, row) in rows.iter().enumerate() {
            if row.origin > top || row.destination > top {
                eyre::bail!(
                    "scenario row {} references floor above top floor {}",
                    idx + 2,
                    top
                );
            }
        }
        Ok(())
    }
}
