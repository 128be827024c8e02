//! autoharvest - headless runner for 3x3 crop harvesting scenarios
//!
//! Loads a TOML scenario, dispatches a single player interaction against an
//! in-memory farm and prints the resulting report as JSON.

mod config;
mod headless;

use anyhow::{Context, Result};
use config::Scenario;
use std::{env, fs, path::PathBuf};
use tracing::info;

const DEFAULT_SCENARIO_PATH: &str = "scenarios/wheat_3x3.toml";

fn main() -> Result<()> {
    // WARN by default; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting autoharvest v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut scenario = Scenario::load_from_path(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario = scenario.with_drop_seed(seed);
    }

    let report = headless::run_scenario(&scenario)
        .with_context(|| format!("scenario {} failed", cli.scenario.display()))?;
    let json = serde_json::to_string_pretty(&report)?;

    match cli.report {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, json + "\n")
                .with_context(|| format!("failed to write report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    scenario: PathBuf,
    seed: Option<u64>,
    report: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions {
            scenario: PathBuf::from(DEFAULT_SCENARIO_PATH),
            seed: None,
            report: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scenario" => {
                    opts.scenario = args
                        .next()
                        .map(PathBuf::from)
                        .context("--scenario requires a path")?;
                }
                "--seed" => {
                    let value = args.next().context("--seed requires a value")?;
                    opts.seed = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid --seed value `{value}`"))?,
                    );
                }
                "--report" => {
                    opts.report = Some(
                        args.next()
                            .map(PathBuf::from)
                            .context("--report requires a path")?,
                    );
                }
                other => tracing::warn!("Ignoring unknown argument {other}"),
            }
        }

        Ok(opts)
    }
}
