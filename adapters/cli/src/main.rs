#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Shadow Gate sessions headlessly.

mod logging;
mod scenario;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use shadow_gate_world::{query, World};

use crate::{
    scenario::Scenario,
    session::{run, Limits},
};

/// Plays Shadow Gate waves without a window and prints a session report.
#[derive(Debug, Parser)]
#[command(name = "shadow-gate", author, version, about, long_about = None)]
struct Args {
    /// TOML scenario describing layout, resources and build order.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(10..=240))]
    fps: u32,
    /// Number of waves to play; overrides the scenario.
    #[arg(long)]
    waves: Option<u32>,
    /// Upper bound on simulated time in seconds.
    #[arg(long, default_value_t = 900.0)]
    max_seconds: f32,
    /// Output format for the final report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Toml,
}

/// Entry point for the Shadow Gate command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let mut world = World::with_config(scenario.world_config()?);
    info!(
        "shadow gate: {} waypoints, {} slots",
        query::path(&world).len(),
        query::slot_view(&world).iter().count()
    );

    let limits = Limits {
        waves: args.waves.unwrap_or(scenario.waves),
        fps: args.fps,
        max_seconds: args.max_seconds,
    };
    let report = run(&mut world, scenario.build_orders(), limits);

    match args.format {
        ReportFormat::Text => println!("{report}"),
        ReportFormat::Toml => {
            let rendered = toml::to_string(&report).context("failed to render report as toml")?;
            print!("{rendered}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn frame_rate_is_bounded() {
        assert!(Args::try_parse_from(["shadow-gate", "--fps", "5"]).is_err());
        assert!(Args::try_parse_from(["shadow-gate", "--fps", "500"]).is_err());

        let args = Args::try_parse_from(["shadow-gate", "--fps", "30", "--waves", "2"])
            .expect("valid arguments");
        assert_eq!(args.fps, 30);
        assert_eq!(args.waves, Some(2));
        assert_eq!(args.format, ReportFormat::Text);
    }
}
