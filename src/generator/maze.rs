/*
maze.rs

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

//! Generate a perfect maze.
//!
//! The generator walks the grid depth first from a starting cell. For each cell, the unvisited
//! neighbors are shuffled and visited in that order. The wall between the cell and each neighbor
//! it descends into is removed. Because every cell is entered exactly once, the open walls form a
//! spanning tree: there is exactly one simple path between any two cells.
//!
//! The walk uses an explicit stack instead of recursion so that large grids do not exhaust the
//! thread stack. The visiting order is the same as the recursive version.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid, Position};
use super::path::{self, Path};
use super::random::{AmbientRandom, RandomSource, SeededRandom};
use super::walls::MazeWalls;

/// Cell being explored and the neighbors left to try.
struct Frame {
    position: Position,
    neighbors: Vec<Position>,
    next: usize,
}

/// Maze object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
}

impl Maze {
    /// Create a [`Maze`] object with all the walls present.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols),
        }
    }

    /// Return the underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Return the cell at the given position, or None when it is out of range.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.grid.cell(position)
    }

    /// Carve the maze, starting from the given cell.
    ///
    /// Nothing happens when the starting cell is outside the grid.
    pub fn generate<R: RandomSource>(&mut self, start: Position, rng: &mut R) {
        if !self.grid.contains(start) {
            debug!("Starting cell {start} is outside the grid");
            return;
        }
        debug!(
            "Generating a {}x{} maze from {start}",
            self.grid.rows(),
            self.grid.cols()
        );

        let mut stack: Vec<Frame> = Vec::with_capacity(self.grid.len());
        stack.push(self.enter(start, rng));

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.neighbors.get(frame.next).copied() else {
                // No neighbor left: backtrack
                stack.pop();
                continue;
            };
            frame.next += 1;

            // The neighbor might have been reached from another branch in the meantime
            if self.grid.is_visited(next) {
                continue;
            }
            let current: Position = frame.position;
            if let Some(direction) = Direction::between(current, next) {
                self.grid.set_wall(current, direction, false);
            }
            let frame: Frame = self.enter(next, rng);
            stack.push(frame);
        }
        debug!("Maze generated: {} open edges", self.grid.open_edges());
    }

    /// Mark the cell visited and build its frame with the shuffled unvisited neighbors.
    fn enter<R: RandomSource>(&mut self, position: Position, rng: &mut R) -> Frame {
        self.grid.visit(position);
        let mut neighbors: Vec<Position> = Direction::ALL
            .iter()
            .filter_map(|d| self.grid.neighbor(position, *d))
            .filter(|p| !self.grid.is_visited(*p))
            .collect();
        rng.shuffle(&mut neighbors);
        Frame {
            position,
            neighbors,
            next: 0,
        }
    }

    /// Convert the cell walls to compacted segments for rendering.
    pub fn walls(&self) -> MazeWalls {
        MazeWalls::from_grid(&self.grid)
    }

    /// Find the shortest path between two cells.
    ///
    /// Return an empty path if a cell is out of range or if there is no path (after a blockage).
    pub fn find_path(&self, start: Position, end: Position) -> Path {
        path::find_path(&self.grid, start, end)
    }

    /// Put back the wall on the given side of the cell, and on the matching side of the neighbor.
    ///
    /// This might disconnect the maze.
    pub fn add_blockage(&mut self, position: Position, direction: Direction) {
        if !self.grid.contains(position) {
            debug!("Blockage ignored: {position} is outside the grid");
            return;
        }
        debug!("Blockage at {position} {direction}");
        self.grid.set_wall(position, direction, true);
    }

    /// Number of open edges between adjacent cells.
    pub fn open_edge_count(&self) -> usize {
        self.grid.open_edges()
    }

    /// Print the maze as ASCII art.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let mut s: String = String::new();
        for _ in 0..self.grid.cols() {
            s.push_str("+--");
        }
        s.push('+');
        debug!("{s}");

        for row in 0..self.grid.rows() {
            s.clear();
            let mut under: String = String::from("+");
            for col in 0..self.grid.cols() {
                let p: Position = Position::new(row, col);
                s.push(if self.grid.has_wall(p, Direction::West) {
                    '|'
                } else {
                    ' '
                });
                s.push_str("  ");
                under.push_str(if self.grid.has_wall(p, Direction::South) {
                    "--+"
                } else {
                    "  +"
                });
            }
            s.push('|');
            debug!("{s}");
            debug!("{under}");
        }
    }
}

/// Generate a maze of the given size from the top-left cell and return its walls.
///
/// With a seed, the maze is reproducible. Without a seed, the thread random generator is used.
pub fn generate_maze(rows: usize, cols: usize, seed: Option<u32>) -> MazeWalls {
    let mut maze: Maze = Maze::new(rows, cols);
    match seed {
        Some(s) => maze.generate(Position::new(0, 0), &mut SeededRandom::new(s)),
        None => maze.generate(Position::new(0, 0), &mut AmbientRandom),
    }
    maze.walls()
}
