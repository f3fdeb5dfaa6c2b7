/*
path.rs

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

//! Path in the maze and breadth-first path search.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use super::grid::{Direction, Grid, Position};

/// Path object: the ordered cells from the first cell to the last one.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Path {
    path: Vec<Position>,
}

impl Path {
    /// Create an empty [`Path`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Path`] object from a vector.
    pub fn from_vec(path: Vec<Position>) -> Self {
        Self { path }
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether no path was found.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of edges in the path.
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, position: Position) -> bool {
        self.path.contains(&position)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<Position> {
        &self.path
    }

    /// Return the position of the given cell in the path.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.path.iter().position(|p| *p == position)
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Position> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

/// Find the shortest path between two cells, going only through open walls.
///
/// The search is breadth-first. When several shortest paths exist, neighbors are explored in the
/// [`Direction::ALL`] order.
/// Return an empty path if a position is outside the grid or if `end` cannot be reached.
pub fn find_path(grid: &Grid, start: Position, end: Position) -> Path {
    if !grid.contains(start) || !grid.contains(end) {
        debug!("No path: {start} or {end} is outside the grid");
        return Path::new();
    }

    let mut previous: HashMap<Position, Position> = HashMap::with_capacity(grid.len());
    let mut visited: HashSet<Position> = HashSet::with_capacity(grid.len());
    let mut queue: VecDeque<Position> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            // Rebuild the path from the predecessors
            let mut reversed: Vec<Position> = vec![current];
            let mut p: Position = current;
            while let Some(prev) = previous.get(&p) {
                reversed.push(*prev);
                p = *prev;
            }
            reversed.reverse();
            return Path::from_vec(reversed);
        }

        for direction in Direction::ALL {
            if grid.has_wall(current, direction) {
                continue;
            }
            let Some(next) = grid.neighbor(current, direction) else {
                continue;
            };
            if visited.insert(next) {
                previous.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    debug!("No path from {start} to {end}");
    Path::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open every inner wall of the grid.
    fn open_grid(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                grid.set_wall(Position::new(row, col), Direction::South, false);
                grid.set_wall(Position::new(row, col), Direction::East, false);
            }
        }
        // The loop above also opened the outer south and east borders
        for col in 0..cols {
            grid.set_wall(Position::new(rows - 1, col), Direction::South, true);
        }
        for row in 0..rows {
            grid.set_wall(Position::new(row, cols - 1), Direction::East, true);
        }
        grid
    }

    #[test]
    fn test_path_object() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.edge_count(), 0);
        assert!(path.get_last().is_none());

        let path = Path::from_vec(vec![Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.edge_count(), 1);
        assert!(path.contains(Position::new(0, 1)));
        assert!(!path.contains(Position::new(1, 1)));
        assert_eq!(path.index_of(Position::new(0, 1)), Some(1));
        assert_eq!(path.get_first(), Some(Position::new(0, 0)));
        assert_eq!(path.get_last(), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_shortest_in_open_grid() {
        let grid = open_grid(4, 5);
        let path = find_path(&grid, Position::new(0, 0), Position::new(3, 4));
        assert_eq!(path.edge_count(), 7);

        // North, south, east, west order: south moves are explored first
        assert_eq!(path.get()[1], Position::new(1, 0));
    }

    #[test]
    fn test_consecutive_cells_are_connected() {
        let grid = open_grid(3, 3);
        let path = find_path(&grid, Position::new(2, 2), Position::new(0, 0));
        assert_eq!(path.edge_count(), 4);
        for pair in path.get().windows(2) {
            let d = Direction::between(pair[0], pair[1]).unwrap();
            assert!(!grid.has_wall(pair[0], d));
        }
    }

    #[test]
    fn test_same_cell() {
        let grid = Grid::new(2, 2);
        let path = find_path(&grid, Position::new(1, 1), Position::new(1, 1));
        assert_eq!(path.get(), &vec![Position::new(1, 1)]);
    }

    #[test]
    fn test_no_path() {
        let grid = Grid::new(3, 3);
        assert!(find_path(&grid, Position::new(0, 0), Position::new(2, 2)).is_empty());
        assert!(find_path(&grid, Position::new(0, 0), Position::new(3, 0)).is_empty());
        assert!(find_path(&grid, Position::new(0, 9), Position::new(0, 0)).is_empty());
    }
}
