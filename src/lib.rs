/*
lib.rs

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

//! Maze subsystem of the "find the blockage" demo.
//!
//! * [`generator`] builds perfect mazes, compacts their walls, finds paths, and injects a
//!   blockage.
//! * [`game`] is the demo state machine: mode selection, deploy, cell reveal, hints, and incident
//!   cost.
//! * [`timers`] runs the deploy and tick timers of a session.
//! * [`snapshot`] exposes what a renderer needs to draw the maze and the demo.

pub mod cli_options;
pub mod config;
pub mod game;
pub mod generator;
pub mod hint;
pub mod snapshot;
pub mod timers;

pub use generator::maze::generate_maze;
