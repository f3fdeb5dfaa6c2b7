/*
generator.rs

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

//! Generate mazes, find paths, and break mazes with a blockage.
//!
//! A maze is a [`maze::Maze`] object that wraps a [`grid::Grid`] of cells with four walls each.
//! [`maze::Maze::generate`] carves a perfect maze: there is exactly one path between any two
//! cells. The randomness comes from a [`random::RandomSource`] object given as a parameter, so
//! that a [`random::SeededRandom`] object always produces the same maze for the same seed.
//!
//! Once generated:
//!
//! * [`maze::Maze::walls`] compacts the walls into the [`walls::WallSegment`] line segments that
//!   a renderer draws.
//! * [`maze::Maze::find_path`] returns the shortest [`path::Path`] between two cells.
//! * [`blockage::inject_blockage`] closes a wall in the middle of the path between two cells,
//!   which disconnects the maze, and returns the [`blockage::Blockage`] details.
//!
//! [`layout::MazeLayout`] groups these steps for a demo session. It rebuilds the same maze and
//! the same blockage from a seed.

pub mod blockage;
pub mod grid;
pub mod layout;
pub mod maze;
pub mod path;
pub mod random;
pub mod walls;
