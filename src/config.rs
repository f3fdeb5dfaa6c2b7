/*
config.rs

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

//! Demo parameters.
//!
//! The defaults reproduce the demo: a 10x10 maze from the top-left cell to the bottom-right cell,
//! a 3 second deploy, one cost unit every 10 milliseconds, and 500 per revealed cell.
//! The parameters can be overridden with a JSON file:
//!
//! ```json
//! { "rows": 12, "cols": 12, "destination": { "row": 11, "col": 11 }, "click_penalty": 250 }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::generator::grid::Position;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>";

/// Seeds drawn for a new session are below this value.
pub const SEED_RANGE: u32 = 10000;

/// Demo parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of rows in the maze.
    pub rows: usize,

    /// Number of columns in the maze.
    pub cols: usize,

    /// Cell where the generator starts and where the path to the destination starts.
    pub start: Position,

    /// Cell at the other end of the path.
    pub destination: Position,

    /// Seed of the first session.
    pub seed: u32,

    /// Cost of revealing a cell.
    pub click_penalty: u64,

    /// Cost added at each tick while the blockage is not found.
    pub time_cost_per_tick: u64,

    /// Milliseconds between two ticks.
    pub tick_interval_ms: u64,

    /// Milliseconds between the deploy action and the blockage injection.
    pub deploy_delay_ms: u64,

    /// Cells at this Manhattan distance or less from the blockage are revealed when the blockage
    /// is found.
    pub reveal_radius: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            start: Position::new(0, 0),
            destination: Position::new(9, 9),
            seed: 42,
            click_penalty: 500,
            time_cost_per_tick: 1,
            tick_interval_ms: 10,
            deploy_delay_ms: 3000,
            reveal_radius: 3,
        }
    }
}

/// Configuration errors.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The maze has no cells.
    EmptyGrid,

    /// A cell is outside the maze.
    OutOfGrid(&'static str, Position),

    /// Timers cannot tick every 0 ms.
    ZeroTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid => write!(f, "the maze must have at least one row and one column"),
            ConfigError::OutOfGrid(name, p) => write!(f, "the {name} cell {p} is outside the maze"),
            ConfigError::ZeroTickInterval => write!(f, "the tick interval must not be 0"),
        }
    }
}

impl Error for ConfigError {}

impl DemoConfig {
    /// Read the configuration from a JSON file. Missing parameters get their default value.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Configuration file: {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: DemoConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Verify that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !self.contains(self.start) {
            return Err(ConfigError::OutOfGrid("start", self.start));
        }
        if !self.contains(self.destination) {
            return Err(ConfigError::OutOfGrid("destination", self.destination));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Whether the position is inside the maze.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn deploy_delay(&self) -> Duration {
        Duration::from_millis(self.deploy_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = DemoConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.deploy_delay(), Duration::from_secs(3));
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DemoConfig =
            serde_json::from_str(r#"{ "rows": 4, "destination": { "row": 3, "col": 9 } }"#)
                .unwrap();
        assert_eq!(config.rows, 4);
        assert_eq!(config.cols, 10);
        assert_eq!(config.destination, Position::new(3, 9));
        assert_eq!(config.click_penalty, 500);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = DemoConfig {
            rows: 0,
            ..DemoConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        config.rows = 5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfGrid("destination", Position::new(9, 9)))
        );

        config.destination = Position::new(4, 4);
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("maze-demo-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(br#"{ "seed": 7, "reveal_radius": 1 }"#).unwrap();
        drop(file);

        let config = DemoConfig::from_file(&path).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.reveal_radius, 1);
        std::fs::remove_file(&path).unwrap();

        assert!(DemoConfig::from_file(&path).is_err());
    }
}
