/*
walls.rs

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

//! Compact the cell walls into line segments for rendering.
//!
//! A horizontal segment lies on a row boundary (`fixed`) and spans the columns `start..end`.
//! A vertical segment lies on a column boundary (`fixed`) and spans the rows `start..end`.
//! Boundaries are numbered from 0 to `rows` (or `cols`) included.

use serde::{Deserialize, Serialize};

use super::grid::{Direction, Grid, Position};

/// Orientation of a wall segment.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Straight run of adjacent wall edges.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WallSegment {
    pub axis: Axis,

    /// Row boundary for horizontal segments, column boundary for vertical segments.
    pub fixed: usize,

    /// First unit along the axis (included).
    pub start: usize,

    /// Last unit along the axis (excluded).
    pub end: usize,
}

impl WallSegment {
    /// Create a segment that covers one unit.
    fn unit(axis: Axis, fixed: usize, start: usize) -> Self {
        Self {
            axis,
            fixed,
            start,
            end: start + 1,
        }
    }

    /// Whether the segment lies on the given boundary and covers the given unit.
    pub fn covers(&self, axis: Axis, fixed: usize, unit: usize) -> bool {
        self.axis == axis && self.fixed == fixed && self.start <= unit && unit < self.end
    }

    /// Segment length in cells.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Compacted walls of a maze.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct MazeWalls {
    pub horizontal: Vec<WallSegment>,
    pub vertical: Vec<WallSegment>,
}

impl MazeWalls {
    /// Build the segments from the cell walls.
    ///
    /// The grid is scanned in row-major order. A wall extends the last segment of its list when
    /// that segment lies on the same boundary and ends where the wall starts. Otherwise the wall
    /// starts a new segment.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut walls: MazeWalls = MazeWalls::default();
        let last_row: usize = grid.rows().saturating_sub(1);
        let last_col: usize = grid.cols().saturating_sub(1);

        for cell in grid.cells() {
            let Position { row, col } = cell.position;

            if cell.walls.north {
                Self::extend_or_push(&mut walls.horizontal, Axis::Horizontal, row, col);
            }
            if cell.walls.west {
                Self::extend_or_push(&mut walls.vertical, Axis::Vertical, col, row);
            }
            // The south and east borders of the grid are not covered by the north and west
            // walls of any cell
            if row == last_row && cell.walls.south {
                Self::extend_or_push(&mut walls.horizontal, Axis::Horizontal, row + 1, col);
            }
            if col == last_col && cell.walls.east {
                Self::extend_or_push(&mut walls.vertical, Axis::Vertical, col + 1, row);
            }
        }
        walls
    }

    fn extend_or_push(segments: &mut Vec<WallSegment>, axis: Axis, fixed: usize, unit: usize) {
        match segments.last_mut() {
            Some(last) if last.fixed == fixed && last.end == unit => last.end = unit + 1,
            _ => segments.push(WallSegment::unit(axis, fixed, unit)),
        }
    }

    /// Return the segment that contains the wall on the given side of the cell.
    pub fn segment_for_edge(&self, position: Position, direction: Direction) -> Option<WallSegment> {
        let (segments, axis, fixed, unit) = match direction {
            Direction::East => (
                &self.vertical,
                Axis::Vertical,
                position.col.checked_add(1)?,
                position.row,
            ),
            Direction::West => (&self.vertical, Axis::Vertical, position.col, position.row),
            Direction::South => (
                &self.horizontal,
                Axis::Horizontal,
                position.row.checked_add(1)?,
                position.col,
            ),
            Direction::North => (&self.horizontal, Axis::Horizontal, position.row, position.col),
        };
        segments
            .iter()
            .find(|s| s.covers(axis, fixed, unit))
            .copied()
    }

    /// Total number of unit wall edges, border included.
    pub fn unit_count(&self) -> usize {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .map(WallSegment::len)
            .sum()
    }

    /// Iterate over all the segments, horizontal first.
    pub fn iter(&self) -> impl Iterator<Item = &WallSegment> {
        self.horizontal.iter().chain(self.vertical.iter())
    }
}
