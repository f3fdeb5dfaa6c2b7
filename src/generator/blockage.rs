/*
blockage.rs

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

//! Break the maze by closing one wall on the path between two cells.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};
use super::maze::Maze;
use super::path::Path;
use super::random::RandomSource;
use super::walls::WallSegment;

/// The blockage is chosen in the middle of the path, between these two ratios of its length.
const MIDDLE_START: f64 = 0.3;
const MIDDLE_END: f64 = 0.7;

/// Closed wall that breaks the maze.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Blockage {
    /// Cell on the start side of the closed wall.
    pub position: Position,

    /// Side of the cell where the wall has been closed.
    pub direction: Direction,

    /// Compacted wall segment that contains the closed wall, for highlighting.
    pub segment: Option<WallSegment>,

    /// Whether the path was too short and the default cell was used instead.
    pub fallback: bool,
}

impl Blockage {
    /// Default blockage for a grid: the center cell, east side.
    pub fn fallback(rows: usize, cols: usize) -> Self {
        Self {
            position: Position::new(rows / 2, cols / 2),
            direction: Direction::East,
            segment: None,
            fallback: true,
        }
    }
}

/// Select the blockage cell and direction on the given path.
///
/// Return None if the path has two cells or less.
pub fn select_on_path<R: RandomSource>(path: &Path, rng: &mut R) -> Option<(Position, Direction)> {
    let cells: &Vec<Position> = path.get();
    let len: usize = cells.len();
    if len <= 2 {
        return None;
    }

    let start: usize = (len as f64 * MIDDLE_START).floor() as usize;
    let end: usize = (len as f64 * MIDDLE_END).floor() as usize;
    let index: usize = rng.index_in(start, end);
    let position: Position = cells[index];
    let direction: Direction = cells
        .get(index + 1)
        .and_then(|next| Direction::between(position, *next))
        .unwrap_or(Direction::East);

    debug!("Blockage selected at index {index} of {len} ({start}..{end}): {position} {direction}");
    Some((position, direction))
}

/// Find the path between `start` and `destination`, close a wall in the middle of it, and return
/// the [`Blockage`].
///
/// When the path is too short, the wall on the east side of the grid center is closed instead.
pub fn inject_blockage<R: RandomSource>(
    maze: &mut Maze,
    start: Position,
    destination: Position,
    rng: &mut R,
) -> Blockage {
    let path: Path = maze.find_path(start, destination);
    let mut blockage: Blockage = match select_on_path(&path, rng) {
        Some((position, direction)) => Blockage {
            position,
            direction,
            segment: None,
            fallback: false,
        },
        None => {
            warn!(
                "Path from {start} to {destination} has {} cells: using the default blockage",
                path.len()
            );
            Blockage::fallback(maze.grid().rows(), maze.grid().cols())
        }
    };

    maze.add_blockage(blockage.position, blockage.direction);
    blockage.segment = maze
        .walls()
        .segment_for_edge(blockage.position, blockage.direction);
    blockage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::SeededRandom;
    use crate::generator::walls::Axis;

    #[test]
    fn test_blockage_in_middle_of_path() {
        for seed in [1, 42, 500, 8191] {
            let mut maze = Maze::new(10, 10);
            let mut rng = SeededRandom::new(seed);
            maze.generate(Position::new(0, 0), &mut rng);
            let path = maze.find_path(Position::new(0, 0), Position::new(9, 9));

            let blockage =
                inject_blockage(&mut maze, Position::new(0, 0), Position::new(9, 9), &mut rng);
            assert!(!blockage.fallback);

            let index = path.index_of(blockage.position).unwrap();
            let len = path.len() as f64;
            assert!(index >= (len * 0.3).floor() as usize);
            assert!(index < (len * 0.7).floor() as usize);

            // The path is now broken
            assert!(
                maze.find_path(Position::new(0, 0), Position::new(9, 9))
                    .is_empty()
            );

            // The next cell on the former path is behind the closed wall
            let next = path.get()[index + 1];
            assert_eq!(
                Direction::between(blockage.position, next),
                Some(blockage.direction)
            );
        }
    }

    #[test]
    fn test_segment_matches_direction() {
        let mut maze = Maze::new(10, 10);
        let mut rng = SeededRandom::new(42);
        maze.generate(Position::new(0, 0), &mut rng);
        let blockage =
            inject_blockage(&mut maze, Position::new(0, 0), Position::new(9, 9), &mut rng);
        let segment = blockage.segment.unwrap();
        let p = blockage.position;

        match blockage.direction {
            Direction::East => assert!(segment.covers(Axis::Vertical, p.col + 1, p.row)),
            Direction::West => assert!(segment.covers(Axis::Vertical, p.col, p.row)),
            Direction::South => assert!(segment.covers(Axis::Horizontal, p.row + 1, p.col)),
            Direction::North => assert!(segment.covers(Axis::Horizontal, p.row, p.col)),
        }
    }

    #[test]
    fn test_short_path_falls_back() {
        let mut maze = Maze::new(4, 4);
        let mut rng = SeededRandom::new(3);
        maze.generate(Position::new(0, 0), &mut rng);

        let blockage =
            inject_blockage(&mut maze, Position::new(1, 1), Position::new(1, 1), &mut rng);
        assert!(blockage.fallback);
        assert_eq!(blockage.position, Position::new(2, 2));
        assert_eq!(blockage.direction, Direction::East);
        assert!(maze.grid().has_wall(Position::new(2, 2), Direction::East));
        assert!(blockage.segment.is_some());
    }

    #[test]
    fn test_select_needs_three_cells() {
        let mut rng = SeededRandom::new(1);
        let two = Path::from_vec(vec![Position::new(0, 0), Position::new(0, 1)]);
        assert!(select_on_path(&two, &mut rng).is_none());

        let three = Path::from_vec(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ]);
        let (p, d) = select_on_path(&three, &mut rng).unwrap();
        assert!(p == Position::new(0, 0) || p == Position::new(0, 1));
        assert!(d == Direction::East || d == Direction::South);
    }
}
