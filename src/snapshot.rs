/*
snapshot.rs

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

//! Data that a renderer needs to draw the maze and the demo.
//!
//! The snapshots are serialized in JSON format by using [`serde`].

use serde::Serialize;

use crate::game::{Action, Mode, Session, Stage};
use crate::generator::blockage::Blockage;
use crate::generator::grid::Position;
use crate::generator::layout::MazeLayout;
use crate::generator::walls::{MazeWalls, WallSegment};

/// Text displayed when the incident starts.
pub const INCIDENT_ALERT: &str = "It's 3:00 AM - Find the blockage!";

/// Maze to draw.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MazeSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub seed: u32,
    pub start: Position,
    pub destination: Position,
    pub walls: MazeWalls,
    pub blockage: Option<Blockage>,

    /// Path from the start to the destination. Empty once the blockage is injected.
    pub path: Vec<Position>,
}

impl MazeSnapshot {
    /// Build the snapshot of the given layout.
    pub fn new(layout: &MazeLayout) -> Self {
        Self {
            rows: layout.maze.grid().rows(),
            cols: layout.maze.grid().cols(),
            seed: layout.seed,
            start: layout.start,
            destination: layout.destination,
            walls: layout.walls.clone(),
            blockage: layout.blockage,
            path: layout.path().get().clone(),
        }
    }
}

/// Demo state to draw.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub stage: Stage,
    pub seed: u32,
    pub title: &'static str,
    pub subtitle: &'static str,

    /// Whether the maze is drawn at all (not before a mode is chosen).
    pub maze_visible: bool,

    /// Whether the maze is hidden except for the revealed cells.
    pub cover_visible: bool,

    pub revealed: Vec<Position>,

    /// Incident alert, shown over the cover until the first cell is revealed.
    pub alert: Option<&'static str>,

    /// Message for the last click, shown over the cover once a cell is revealed.
    pub hint: Option<String>,

    pub cost_label: &'static str,
    pub time_cost: u64,
    pub click_cost: u64,
    pub incident_cost: u64,

    /// Incident cost formatted for display.
    pub incident_cost_text: String,

    pub blockage_found: bool,

    /// Segment to highlight, when the blockage is visible.
    pub blockage_segment: Option<WallSegment>,

    pub walls: MazeWalls,
    pub actions: Vec<Action>,
}

impl SessionSnapshot {
    /// Build the snapshot of the given session.
    pub fn new(session: &Session) -> Self {
        let layout: &MazeLayout = session.layout();
        let blockage_segment: Option<WallSegment> = if session.blockage_visible() {
            layout.blockage.and_then(|b| b.segment)
        } else {
            None
        };

        let searching: bool = session.cover_visible() && session.is_started();
        let alert: Option<&'static str> = if searching && session.revealed().is_empty() {
            Some(INCIDENT_ALERT)
        } else {
            None
        };
        let hint: Option<String> = if searching && !session.revealed().is_empty() {
            session.message().map(|m| m.to_string())
        } else {
            None
        };

        Self {
            mode: session.mode(),
            stage: session.stage(),
            seed: session.seed(),
            title: session.title(),
            subtitle: session.subtitle(),
            maze_visible: session.mode() != Mode::Initial,
            cover_visible: session.cover_visible(),
            revealed: session.revealed().iter().copied().collect(),
            alert,
            hint,
            cost_label: session.cost_label(),
            time_cost: session.time_cost(),
            click_cost: session.click_cost(),
            incident_cost: session.incident_cost(),
            incident_cost_text: format_cost(session.incident_cost()),
            blockage_found: session.is_blockage_found(),
            blockage_segment,
            walls: layout.walls.clone(),
            actions: session.available_actions(),
        }
    }
}

impl Session {
    /// Return the renderer view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self)
    }
}

impl MazeLayout {
    /// Return the renderer view of the maze.
    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot::new(self)
    }
}

/// Format a cost with a dollar sign and thousands separators.
pub fn format_cost(cost: u64) -> String {
    let digits: String = cost.to_string();
    let mut s: String = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    s.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            s.push(',');
        }
        s.push(c);
    }
    s
}
