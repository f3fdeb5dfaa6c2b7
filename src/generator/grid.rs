/*
grid.rs

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

//! Rectangular grid of maze cells.
//!
//! Every cell starts with its four walls. Walls are only removed by the maze generator and only
//! put back by a blockage. Both operations go through [`Grid::set_wall`], which updates the two
//! sides of an edge so that wall state stays symmetric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a cell in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a [`Position`] object.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side of a cell.
///
/// The order of [`Direction::ALL`] is the neighbor enumeration order used by the generator and
/// the path finder.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All the directions, in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Direction seen from the neighbor cell.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction to go from `from` to the adjacent cell `to`, or None if the cells are not
    /// adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        if from.col == to.col {
            if to.row.checked_add(1) == Some(from.row) {
                return Some(Direction::North);
            }
            if from.row.checked_add(1) == Some(to.row) {
                return Some(Direction::South);
            }
        } else if from.row == to.row {
            if from.col.checked_add(1) == Some(to.col) {
                return Some(Direction::East);
            }
            if to.col.checked_add(1) == Some(from.col) {
                return Some(Direction::West);
            }
        }
        None
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::East => write!(f, "east"),
            Direction::West => write!(f, "west"),
        }
    }
}

/// Wall flags of a cell. `true` means that the wall is present.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Walls {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }
}

impl Walls {
    /// Whether the wall on the given side is present.
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    fn set(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::North => self.north = present,
            Direction::South => self.south = present,
            Direction::East => self.east = present,
            Direction::West => self.west = present,
        }
    }
}

/// Maze cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,

    /// Whether the generator already went through the cell.
    pub visited: bool,

    pub walls: Walls,
}

/// Fixed-size grid of cells stored in row-major order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a [`Grid`] object with all the walls present.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells: Vec<Cell> = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    position: Position::new(row, col),
                    visited: false,
                    walls: Walls::default(),
                });
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the position is inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// Return the cell at the given position, or None when the position is out of range.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).map(|i| &self.cells[i])
    }

    /// Iterate over the cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Position of the neighbor in the given direction, or None when it falls outside the grid.
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let neighbor: Position = match direction {
            Direction::North => Position::new(position.row.checked_sub(1)?, position.col),
            Direction::South => Position::new(position.row.checked_add(1)?, position.col),
            Direction::East => Position::new(position.row, position.col.checked_add(1)?),
            Direction::West => Position::new(position.row, position.col.checked_sub(1)?),
        };
        if self.contains(neighbor) {
            Some(neighbor)
        } else {
            None
        }
    }

    /// Whether the wall on the given side of the cell is present.
    ///
    /// Positions outside the grid are surrounded by walls.
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_none_or(|cell| cell.walls.get(direction))
    }

    /// Set the wall on the given side of the cell and the mirrored wall on the neighbor.
    ///
    /// Nothing happens when the position is out of range. On the grid border, only the wall of
    /// the cell is updated.
    pub fn set_wall(&mut self, position: Position, direction: Direction, present: bool) {
        let Some(i) = self.index(position) else {
            return;
        };
        self.cells[i].walls.set(direction, present);

        if let Some(n) = self
            .neighbor(position, direction)
            .and_then(|p| self.index(p))
        {
            self.cells[n].walls.set(direction.opposite(), present);
        }
    }

    /// Whether the generator already went through the cell. Out of range positions are
    /// reported as visited so that they are never selected.
    pub fn is_visited(&self, position: Position) -> bool {
        self.cell(position).is_none_or(|cell| cell.visited)
    }

    /// Mark the cell as visited.
    pub fn visit(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i].visited = true;
        }
    }

    /// Number of open edges between adjacent cells. Border walls are not counted.
    pub fn open_edges(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.walls.south && cell.position.row + 1 < self.rows)
                    + usize::from(!cell.walls.east && cell.position.col + 1 < self.cols)
            })
            .sum()
    }
}
