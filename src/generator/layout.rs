/*
layout.rs

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

//! Maze of a demo session, rebuilt from its seed.
//!
//! A [`MazeLayout`] only depends on the configuration, the seed, and whether the blockage has been
//! injected. One [`SeededRandom`] drives the generation and then the blockage selection, so
//! rebuilding the layout always gives the same walls, the same blockage, and the same highlighted
//! segment.

use log::debug;

use super::blockage::{self, Blockage};
use super::grid::Position;
use super::maze::Maze;
use super::path::Path;
use super::random::SeededRandom;
use super::walls::MazeWalls;
use crate::config::DemoConfig;

/// Maze, walls, and blockage for a seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeLayout {
    pub seed: u32,

    /// Whether the blockage has been injected in the maze.
    pub injected: bool,

    pub start: Position,

    pub destination: Position,

    pub maze: Maze,

    /// Compacted walls, including the blockage wall when injected.
    pub walls: MazeWalls,

    /// Blockage, when injected.
    pub blockage: Option<Blockage>,
}

impl MazeLayout {
    /// Build the layout.
    pub fn build(config: &DemoConfig, seed: u32, injected: bool) -> Self {
        let mut rng: SeededRandom = SeededRandom::new(seed);
        let mut maze: Maze = Maze::new(config.rows, config.cols);
        maze.generate(config.start, &mut rng);

        let blockage: Option<Blockage> = if injected {
            Some(blockage::inject_blockage(
                &mut maze,
                config.start,
                config.destination,
                &mut rng,
            ))
        } else {
            None
        };
        debug!("Layout for seed {seed} (blockage injected: {injected}): {blockage:?}");
        maze.debug();

        let walls: MazeWalls = maze.walls();
        Self {
            seed,
            injected,
            start: config.start,
            destination: config.destination,
            maze,
            walls,
            blockage,
        }
    }

    /// Whether the given cell is the blockage cell.
    pub fn is_blockage(&self, position: Position) -> bool {
        self.blockage.is_some_and(|b| b.position == position)
    }

    /// Path between the start and the destination cells.
    ///
    /// Once the blockage is injected the path is empty.
    pub fn path(&self) -> Path {
        self.maze.find_path(self.start, self.destination)
    }
}
