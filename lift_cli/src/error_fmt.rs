//! Human-readable error descriptions, exit codes and structured JSON errors.

use lift_core::{BuildError, DispatchError};
use lift_sim::SimError;
use thiserror::Error;

/// Failures reading the user's inputs, classified for exit codes.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("config {path}: {reason}")]
    Config { path: String, reason: String },
    #[error("scenario {path}: {reason}")]
    Scenario { path: String, reason: String },
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(ie) = err.downcast_ref::<InputError>() {
        return match ie {
            InputError::Scenario { reason, .. }
                if reason.contains("scenario CSV must have headers") =>
            {
                "Invalid headers in scenario CSV. Expected 'tick,origin,destination'.".to_string()
            }
            InputError::Scenario { path, reason } => format!(
                "What happened: The scenario file {path} was rejected ({reason}).\nLikely causes: A malformed row, a passenger with identical origin and destination, or a floor the building does not have.\nHow to fix: Correct the CSV rows or raise building.floors in the config."
            ),
            InputError::Config { path, reason } => format!(
                "What happened: Invalid configuration in {path} ({reason}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/lift_config.toml for a sample."
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(msg) => format!(
                "What happened: The scheduler rejected its settings ({msg}).\nLikely causes: Out-of-range [dispatch] or [capacity] values.\nHow to fix: Edit the config file, then rerun."
            ),
            other => format!(
                "What happened: The scheduler could not be assembled ({other}).\nLikely causes: An internal wiring bug.\nHow to fix: Re-run with --log-level=debug and report the output."
            ),
        };
    }

    if let Some(de) = err.downcast_ref::<DispatchError>() {
        return match de {
            DispatchError::Config(msg) => format!(
                "What happened: The building does not match the configuration ({msg}).\nLikely causes: building.floors or building.cars disagree with the simulated host.\nHow to fix: Check the [building] section."
            ),
            DispatchError::State(msg) => format!(
                "What happened: The scheduler was driven out of order ({msg}).\nLikely causes: An internal host loop bug.\nHow to fix: Re-run with --log-level=debug and report the output."
            ),
            DispatchError::Host(msg) => format!(
                "What happened: A car rejected a command ({msg}).\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<SimError>() {
        return format!(
            "What happened: The simulated building could not be set up ({se}).\nLikely causes: Invalid [building] values or scripted trips outside the building.\nHow to fix: Check the config and the scenario CSV."
        );
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Short stable name for the error class, used in JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(ie) = err.downcast_ref::<InputError>() {
        return match ie {
            InputError::Config { .. } => "Config",
            InputError::Scenario { .. } => "Scenario",
        };
    }
    if err.downcast_ref::<BuildError>().is_some()
        || matches!(err.downcast_ref::<DispatchError>(), Some(DispatchError::Config(_)))
    {
        return "Config";
    }
    if matches!(err.downcast_ref::<SimError>(), Some(SimError::InvalidTrip { .. })) {
        return "Scenario";
    }
    "Error"
}

/// Config errors exit with 2, scenario errors with 3, anything else with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match reason_name(err) {
        "Config" => 2,
        "Scenario" => 3,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
