mod cli;
mod error_fmt;
mod run;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::Result;
use lift_config::{Config, ScenarioRow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::cli::{Cli, Commands, DEFAULT_CONFIG, JSON_MODE};
use crate::error_fmt::{InputError, exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    if !cli.json {
        // Pretty reports for `{:?}`; harmless if another handler is installed.
        let _ = color_eyre::install();
    }

    let (result, guard) = match load_config(cli.config.as_deref()) {
        Ok(cfg) => match init_tracing(cli.json, &cli.log_level, &cfg.logging) {
            Ok(guard) => (execute(&cli, cfg), guard),
            Err(e) => (Err(e), None),
        },
        Err(e) => (Err(e), None),
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            report(&cli, &e);
            exit_code_for_error(&e)
        }
    };
    // Flush the file sink before exiting.
    drop(guard);
    std::process::exit(code);
}

fn report(cli: &Cli, err: &eyre::Report) {
    if JSON_MODE.get().copied().unwrap_or(false) {
        println!("{}", format_error_json(err));
        return;
    }
    eprintln!("{}", humanize(err));
    if matches!(cli.log_level.as_str(), "debug" | "trace") {
        eprintln!("\n{err:?}");
    }
}

fn execute(cli: &Cli, mut cfg: Config) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
    }

    let script = match cli.scenario.as_deref() {
        Some(path) => Some(load_scenario(path, &cfg)?),
        None => None,
    };

    match &cli.cmd {
        Commands::Run {
            ticks,
            strategy,
            seed,
        } => {
            run::apply_overrides(&mut cfg, *ticks, strategy.map(Into::into), *seed);
            // Overrides are re-validated like file values.
            cfg.validate().map_err(|e| InputError::Config {
                path: "command line".into(),
                reason: e.to_string(),
            })?;
            let summary = run::simulate(&cfg, script.as_deref(), &shutdown)?;
            if cli.json {
                println!("{}", summary.to_json());
            } else {
                println!("{summary}");
            }
        }
        Commands::SelfCheck => {
            if script.is_some() {
                tracing::info!("self-check uses its built-in scenario; --scenario only validated");
            }
            let results = run::self_check(&cfg, &shutdown)?;
            if cli.json {
                let runs: Vec<_> = results.iter().map(run::RunSummary::to_json).collect();
                println!("{}", serde_json::json!({ "self_check": "ok", "runs": runs }));
            } else {
                for s in &results {
                    println!(
                        "self-check ok: {} delivered {}/{} in {} ticks",
                        s.strategy, s.stats.delivered, s.stats.spawned, s.ticks
                    );
                }
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => return Ok(Config::default()),
    };
    let shown = path.display().to_string();
    let bad = |reason: String| InputError::Config {
        path: shown.clone(),
        reason,
    };
    let text = std::fs::read_to_string(&path).map_err(|e| bad(format!("read failed: {e}")))?;
    let cfg = lift_config::load_toml(&text).map_err(|e: toml::de::Error| bad(e.message().to_string()))?;
    cfg.validate().map_err(|e| bad(e.to_string()))?;
    Ok(cfg)
}

fn load_scenario(path: &Path, cfg: &Config) -> Result<Vec<ScenarioRow>> {
    let bad = |e: eyre::Report| InputError::Scenario {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    let rows = lift_config::load_scenario_csv(path).map_err(bad)?;
    cfg.check_scenario(&rows).map_err(bad)?;
    Ok(rows)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Console logs go to stderr (JSON with `--json`); `[logging] file` adds a
/// JSON-lines file sink whose worker guard must outlive the run.
fn init_tracing(
    json: bool,
    level: &str,
    logging: &lift_config::Logging,
) -> Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let console: BoxedLayer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };
    let mut layers = vec![console];

    let mut guard = None;
    if let Some(file) = logging.file.as_deref() {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file}"))?;
        let appender = match logging.rotation.as_deref().unwrap_or("never") {
            "daily" => tracing_appender::rolling::daily(dir, name),
            "hourly" => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, g) = tracing_appender::non_blocking(appender);
        guard = Some(g);
        let file_filter = EnvFilter::try_new(logging.level.as_deref().unwrap_or(level))?;
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(guard)
}
