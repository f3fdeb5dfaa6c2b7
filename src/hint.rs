/*
hint.rs

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

//! Hints given to the player when they reveal a cell that is not the blockage.
//!
//! Hints only use the row and column offsets between the clicked cell and the blockage. They do
//! not follow the maze corridors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::grid::Position;

/// Compass direction is only given when the offset on that axis is larger than this value.
const COMPASS_THRESHOLD: usize = 1;

/// Compass direction toward the blockage.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Compass {
    North,
    South,
    East,
    West,
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Compass::North => write!(f, "North"),
            Compass::South => write!(f, "South"),
            Compass::East => write!(f, "East"),
            Compass::West => write!(f, "West"),
        }
    }
}

/// How far the blockage is, from the hottest to the coldest tier.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Proximity {
    VeryClose,
    Warmer,
    Far,
    Cold,
}

impl Proximity {
    /// Tier for the given Manhattan distance.
    pub fn from_distance(distance: usize) -> Self {
        match distance {
            0..=2 => Proximity::VeryClose,
            3..=4 => Proximity::Warmer,
            5..=6 => Proximity::Far,
            _ => Proximity::Cold,
        }
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Proximity::VeryClose => write!(f, "Very close!"),
            Proximity::Warmer => write!(f, "Getting warmer..."),
            Proximity::Far => write!(f, "Still far..."),
            Proximity::Cold => write!(f, "Cold..."),
        }
    }
}

/// Hint for a revealed cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hint {
    /// North or south, when the blockage is more than one row away.
    pub vertical: Option<Compass>,

    /// East or west, when the blockage is more than one column away.
    pub horizontal: Option<Compass>,

    pub distance: usize,

    pub proximity: Proximity,
}

impl Hint {
    /// Build the hint for the player who clicked `clicked`.
    pub fn between(clicked: Position, blockage: Position) -> Self {
        let vertical: Option<Compass> = if blockage.row.abs_diff(clicked.row) > COMPASS_THRESHOLD {
            if blockage.row > clicked.row {
                Some(Compass::South)
            } else {
                Some(Compass::North)
            }
        } else {
            None
        };
        let horizontal: Option<Compass> =
            if blockage.col.abs_diff(clicked.col) > COMPASS_THRESHOLD {
                if blockage.col > clicked.col {
                    Some(Compass::East)
                } else {
                    Some(Compass::West)
                }
            } else {
                None
            };
        let distance: usize = clicked.manhattan(blockage);

        Self {
            vertical,
            horizontal,
            distance,
            proximity: Proximity::from_distance(distance),
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(v) = self.vertical {
            write!(f, "{v} ")?;
        }
        if let Some(h) = self.horizontal {
            write!(f, "{h} ")?;
        }
        write!(f, "{}", self.proximity)
    }
}

/// Message displayed after a click.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum HintMessage {
    Search(Hint),
    Found,
}

impl fmt::Display for HintMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HintMessage::Search(hint) => write!(f, "{hint}"),
            HintMessage::Found => write!(f, "Blockage Found!"),
        }
    }
}
