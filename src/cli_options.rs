/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Maze Demo.

Maze Demo is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Maze Demo is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Maze Demo. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers working on the renderer.
//! The command prints, in JSON format, the data that the renderer consumes.
//!
//! # Examples
//!
//! Print the walls and the path of the 10x10 maze for seed 42:
//!
//! ```text
//! $ maze-demo --seed 42
//! ```
//!
//! Print the same maze with its blockage:
//!
//! ```text
//! $ maze-demo --seed 42 --blockage
//! ```
//!
//! Play a session in agentic mode with the real timers, and print the final state:
//!
//! ```text
//! $ maze-demo --seed 42 --simulate agentic --debug
//! ```

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::config::{COPYRIGHT_NOTICE, DemoConfig};
use crate::game::{ClickOutcome, Mode, Session};
use crate::generator::grid::Position;
use crate::generator::layout::MazeLayout;
use crate::snapshot::SessionSnapshot;
use crate::timers::SessionRunner;

/// Delay between two simulated clicks, in ticks.
const CLICK_TICKS: u32 = 15;

/// Print maze and demo data for renderer developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// JSON file with the demo parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows (overrides the configuration file)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of columns (overrides the configuration file)
    #[arg(short = 'l', long)]
    cols: Option<usize>,

    /// Maze seed (overrides the configuration file)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Inject the blockage in the printed maze
    #[arg(short, long, default_value_t = false, conflicts_with = "simulate")]
    blockage: bool,

    /// Simulate a player session in the given mode and print the final state
    #[arg(value_enum, short = 'm', long)]
    simulate: Option<Mode>,

    /// Print the output on a single line
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    let config: DemoConfig = match build_config(&args) {
        Ok(c) => c,
        Err(msg) => {
            error!("{msg}");
            eprintln!("Error: {msg}");
            return 1;
        }
    };
    debug!("Configuration: {config:?}");

    let printed: Result<(), serde_json::Error> = match args.simulate {
        Some(mode) => print_json(&simulate(config, mode), args.compact),
        None => {
            let layout: MazeLayout = MazeLayout::build(&config, config.seed, args.blockage);
            print_json(&layout.snapshot(), args.compact)
        }
    };
    match printed {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Merge the configuration file and the command-line options.
fn build_config(args: &Args) -> Result<DemoConfig, String> {
    let mut config: DemoConfig = match &args.config {
        Some(path) => {
            DemoConfig::from_file(path).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => DemoConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    // Keep the destination in the bottom-right corner when only the size changes
    if args.rows.is_some() || args.cols.is_some() {
        config.destination = Position::new(
            config.rows.saturating_sub(1),
            config.cols.saturating_sub(1),
        );
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), serde_json::Error> {
    let s: String = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}

/// Play a session: deploy, then click the cells along the start-destination path until the
/// blockage is found.
///
/// In principal mode, the session is first played in no-agentic mode, and then replayed with
/// full visibility: the blockage is clicked directly.
fn simulate(config: DemoConfig, mode: Mode) -> SessionSnapshot {
    let think: Duration = config.tick_interval() * CLICK_TICKS;
    let candidates: Vec<Position> = MazeLayout::build(&config, config.seed, false)
        .path()
        .get()
        .clone();
    let mut runner: SessionRunner = SessionRunner::new(Session::new(config));

    let first_mode: Mode = if mode == Mode::Principal {
        Mode::NoAgentic
    } else {
        mode
    };
    runner.select_mode(first_mode);
    search(&mut runner, &candidates, think);

    if mode == Mode::Principal && runner.retry_as_principal() {
        search(&mut runner, &candidates, think);
    }
    runner.session().snapshot()
}

fn search(runner: &mut SessionRunner, candidates: &[Position], think: Duration) {
    runner.deploy();
    if !runner.wait_started() {
        return;
    }

    if runner.session().mode() == Mode::Principal {
        thread::sleep(think);
        if let Some(blockage) = runner.session().blockage_position() {
            runner.click(blockage);
        }
        info!("Principal: cost = {}", runner.session().incident_cost());
        return;
    }

    for position in candidates {
        thread::sleep(think);
        match runner.click(*position) {
            ClickOutcome::Hint(hint) => info!("{position}: {hint}"),
            ClickOutcome::Found => {
                info!(
                    "{position}: blockage found, cost = {}",
                    runner.session().incident_cost()
                );
                break;
            }
            outcome => debug!("{position}: {outcome:?}"),
        }
    }

    // The default blockage of a short path is not on that path
    if !runner.session().is_blockage_found() {
        if let Some(blockage) = runner.session().blockage_position() {
            warn!("Blockage {blockage} is not on the path: clicking it directly");
            runner.click(blockage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_override_moves_destination() {
        let args =
            Args::try_parse_from(["maze-demo", "--rows", "4", "--cols", "6", "-s", "9"]).unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.rows, 4);
        assert_eq!(config.cols, 6);
        assert_eq!(config.seed, 9);
        assert_eq!(config.destination, Position::new(3, 5));
    }

    #[test]
    fn test_invalid_size() {
        let args = Args::try_parse_from(["maze-demo", "--rows", "0"]).unwrap();
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_blockage_conflicts_with_simulate() {
        assert!(Args::try_parse_from(["maze-demo", "-b", "--simulate", "agentic"]).is_err());
        let args = Args::try_parse_from(["maze-demo", "--simulate", "no-agentic"]).unwrap();
        assert_eq!(args.simulate, Some(Mode::NoAgentic));
        assert!(Args::try_parse_from(["maze-demo", "--simulate", "initial"]).is_err());
    }

    #[test]
    fn test_simulated_session_finds_default_blockage() {
        let config = DemoConfig {
            destination: Position::new(0, 0),
            deploy_delay_ms: 5,
            tick_interval_ms: 1,
            ..DemoConfig::default()
        };
        let snapshot = simulate(config, Mode::NoAgentic);
        assert!(snapshot.blockage_found);
        assert!(snapshot.revealed.contains(&Position::new(5, 5)));
    }

    #[test]
    fn test_simulated_session_finds_blockage() {
        let config = DemoConfig {
            deploy_delay_ms: 5,
            tick_interval_ms: 1,
            ..DemoConfig::default()
        };
        let snapshot = simulate(config.clone(), Mode::Agentic);
        assert!(snapshot.blockage_found);
        assert!(snapshot.click_cost >= config.click_penalty);

        let snapshot = simulate(config, Mode::Principal);
        assert!(snapshot.blockage_found);
        assert_eq!(snapshot.mode, Mode::Principal);
        assert_eq!(snapshot.click_cost, 0);
    }
}
