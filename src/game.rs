/*
game.rs

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

//! Manage the status of a demo session.
//!
//! The player first chooses how production is handled (with or without agentic coding) and
//! deploys. After a delay, a blockage breaks the maze and an incident starts: its cost grows at
//! each tick, and each cell the player reveals to look for the blockage adds a click penalty.
//! Once the blockage is found, the player can replay the same maze in principal mode, where the
//! whole maze is visible, or start over with a new maze.
//!
//! The session never owns a timer. Operations that need one return a [`TimerRequest`] keyed to
//! the session epoch, and the timer events come back through [`Session::deploy_elapsed`] and
//! [`Session::tick`]. Each reset advances the epoch, so events from older timers are ignored.
//! See [`crate::timers`] for the driver that runs the timers.

use clap::ValueEnum;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::{DemoConfig, SEED_RANGE};
use crate::generator::grid::Position;
use crate::generator::layout::MazeLayout;
use crate::hint::{Hint, HintMessage};
use crate::timers::TimerRequest;

/// How the player handles production.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// No approach chosen yet.
    #[default]
    #[value(skip)]
    Initial,

    /// Search the blockage cell by cell, with the maze hidden.
    NoAgentic,

    /// Same as no-agentic, but the maze is hidden from the start.
    Agentic,

    /// The whole maze is visible, including the blockage.
    Principal,
}

/// Progress of the session.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Waiting for a mode or for the deploy action.
    #[default]
    Ready,

    /// Deploy in progress, the blockage is injected when the deploy timer fires.
    Deployed,

    /// The blockage is injected and the incident cost grows.
    Started,

    /// The blockage has been found.
    Resolved,
}

/// Actions that the player can perform in the current state.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ChooseNoAgentic,
    ChooseAgentic,
    Deploy,
    RevealCell,
    TryAgain,
    TryWithPrincipal,
}

/// Result of a click on a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click has no effect in the current state.
    Ignored,

    /// The cell was already revealed. Nothing is charged.
    AlreadyRevealed,

    /// The cell is revealed and is not the blockage.
    Hint(Hint),

    /// The cell is the blockage.
    Found,
}

/// Manage the status of the demo session.
#[derive(Debug, Clone)]
pub struct Session {
    config: DemoConfig,

    mode: Mode,

    stage: Stage,

    /// Seed of the current maze.
    seed: u32,

    /// Incremented by each reset and when the blockage is found. Timer events carry the epoch
    /// they were created for.
    epoch: u64,

    /// Cells revealed by the player (or around the blockage once it is found).
    revealed: BTreeSet<Position>,

    /// Cost accumulated by the ticks.
    time_cost: u64,

    /// Cost accumulated by the revealed cells.
    click_cost: u64,

    /// Message for the last click.
    message: Option<HintMessage>,

    /// Maze for the current seed, with or without the blockage.
    layout: MazeLayout,
}

impl Session {
    /// Create a [`Session`] object for the seed from the configuration.
    pub fn new(config: DemoConfig) -> Self {
        let seed: u32 = config.seed;
        Self::with_seed(config, seed)
    }

    /// Create a [`Session`] object for the given seed.
    pub fn with_seed(config: DemoConfig, seed: u32) -> Self {
        let layout: MazeLayout = MazeLayout::build(&config, seed, false);
        Self {
            config,
            mode: Mode::Initial,
            stage: Stage::Ready,
            seed,
            epoch: 0,
            revealed: BTreeSet::new(),
            time_cost: 0,
            click_cost: 0,
            message: None,
            layout,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn revealed(&self) -> &BTreeSet<Position> {
        &self.revealed
    }

    pub fn is_revealed(&self, position: Position) -> bool {
        self.revealed.contains(&position)
    }

    pub fn time_cost(&self) -> u64 {
        self.time_cost
    }

    pub fn click_cost(&self) -> u64 {
        self.click_cost
    }

    /// Total cost of the incident.
    pub fn incident_cost(&self) -> u64 {
        self.time_cost + self.click_cost
    }

    pub fn message(&self) -> Option<HintMessage> {
        self.message
    }

    /// Whether the deploy action has been performed.
    pub fn is_deployed(&self) -> bool {
        self.stage != Stage::Ready
    }

    /// Whether the incident has started (the blockage is injected).
    pub fn is_started(&self) -> bool {
        matches!(self.stage, Stage::Started | Stage::Resolved)
    }

    pub fn is_blockage_found(&self) -> bool {
        self.stage == Stage::Resolved
    }

    /// Position of the blockage, once injected.
    pub fn blockage_position(&self) -> Option<Position> {
        self.layout.blockage.map(|b| b.position)
    }

    /// Rebuild the maze if the seed or the blockage status changed.
    fn refresh_layout(&mut self, injected: bool) {
        if self.layout.seed != self.seed || self.layout.injected != injected {
            self.layout = MazeLayout::build(&self.config, self.seed, injected);
        }
    }

    /// Reset the counters and the revealed cells, and invalidate the pending timers.
    fn clear(&mut self) {
        self.revealed.clear();
        self.time_cost = 0;
        self.click_cost = 0;
        self.message = None;
        self.stage = Stage::Ready;
        self.epoch += 1;
    }

    /// Choose the no-agentic or the agentic mode.
    ///
    /// Return false if the mode cannot be chosen, because a mode is already selected or
    /// because the principal mode is only reachable after a first incident.
    pub fn select_mode(&mut self, mode: Mode) -> bool {
        if self.mode != Mode::Initial || !matches!(mode, Mode::NoAgentic | Mode::Agentic) {
            return false;
        }
        info!("Mode {mode:?} selected");
        self.mode = mode;
        true
    }

    /// Deploy. The blockage is injected when the returned timer fires.
    pub fn deploy(&mut self) -> Option<TimerRequest> {
        if self.stage != Stage::Ready || self.mode == Mode::Initial {
            return None;
        }
        info!("Deploying ({:?} mode, seed {})", self.mode, self.seed);
        self.stage = Stage::Deployed;
        Some(TimerRequest::Deploy {
            epoch: self.epoch,
            delay: self.config.deploy_delay(),
        })
    }

    /// Process the deploy timer: inject the blockage and start the incident.
    ///
    /// Return the request for the tick timer, or None if the event is stale.
    pub fn deploy_elapsed(&mut self, epoch: u64) -> Option<TimerRequest> {
        if epoch != self.epoch || self.stage != Stage::Deployed {
            debug!("Ignoring deploy event for epoch {epoch} (current {})", self.epoch);
            return None;
        }
        self.refresh_layout(true);
        self.stage = Stage::Started;
        info!("Incident started: blockage at {:?}", self.blockage_position());
        Some(TimerRequest::Tick {
            epoch: self.epoch,
            interval: self.config.tick_interval(),
        })
    }

    /// Process a tick: add the time cost.
    ///
    /// Return false when the tick timer must stop.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.stage != Stage::Started {
            return false;
        }
        self.time_cost += self.config.time_cost_per_tick;
        true
    }

    /// Process a click on a cell.
    pub fn click(&mut self, position: Position) -> ClickOutcome {
        if self.stage != Stage::Started || !self.config.contains(position) {
            return ClickOutcome::Ignored;
        }
        let Some(blockage) = self.blockage_position() else {
            return ClickOutcome::Ignored;
        };

        // In principal mode, the maze is visible and only the blockage cell reacts
        if self.mode == Mode::Principal {
            if position != blockage {
                return ClickOutcome::Ignored;
            }
            self.resolve();
            return ClickOutcome::Found;
        }

        if self.revealed.contains(&position) {
            return ClickOutcome::AlreadyRevealed;
        }
        self.click_cost += self.config.click_penalty;
        self.revealed.insert(position);
        debug!(
            "Cell {position} revealed: click cost = {}",
            self.click_cost
        );

        if position == blockage {
            self.resolve();
            self.reveal_around(blockage);
            return ClickOutcome::Found;
        }

        let hint: Hint = Hint::between(position, blockage);
        self.message = Some(HintMessage::Search(hint));
        ClickOutcome::Hint(hint)
    }

    /// Mark the blockage found and stop the tick timer.
    fn resolve(&mut self) {
        self.stage = Stage::Resolved;
        self.message = Some(HintMessage::Found);
        self.epoch += 1;
        info!(
            "Blockage found: incident cost = {} (time {} + clicks {})",
            self.incident_cost(),
            self.time_cost,
            self.click_cost
        );
    }

    /// Reveal the cells close to the blockage.
    fn reveal_around(&mut self, blockage: Position) {
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let p: Position = Position::new(row, col);
                if p.manhattan(blockage) <= self.config.reveal_radius {
                    self.revealed.insert(p);
                }
            }
        }
    }

    /// Replay the same maze in principal mode.
    ///
    /// Only available once the blockage is found in no-agentic or agentic mode.
    pub fn retry_as_principal(&mut self) -> bool {
        if self.stage != Stage::Resolved || !matches!(self.mode, Mode::NoAgentic | Mode::Agentic) {
            return false;
        }
        info!("Retrying seed {} in principal mode", self.seed);
        self.clear();
        self.mode = Mode::Principal;
        self.refresh_layout(false);
        true
    }

    /// Start over with a new random maze.
    pub fn try_again(&mut self) {
        let seed: u32 = rand::rng().random_range(0..SEED_RANGE);
        self.try_again_with_seed(seed);
    }

    /// Start over with the maze for the given seed.
    pub fn try_again_with_seed(&mut self, seed: u32) {
        info!("Starting over with seed {seed}");
        self.clear();
        self.mode = Mode::Initial;
        self.seed = seed;
        self.refresh_layout(false);
    }

    /// Actions available to the player.
    pub fn available_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = Vec::new();
        match (self.stage, self.mode) {
            (Stage::Ready, Mode::Initial) => {
                actions.push(Action::ChooseNoAgentic);
                actions.push(Action::ChooseAgentic);
            }
            (Stage::Ready, _) => actions.push(Action::Deploy),
            (Stage::Deployed, _) => (),
            (Stage::Started, _) => actions.push(Action::RevealCell),
            (Stage::Resolved, Mode::Principal) => actions.push(Action::TryAgain),
            (Stage::Resolved, _) => {
                actions.push(Action::TryAgain);
                actions.push(Action::TryWithPrincipal);
            }
        }
        actions
    }

    /// Title of the demo.
    pub fn title(&self) -> &'static str {
        match self.mode {
            Mode::Principal => "With Principal",
            Mode::Agentic => "With Agentic Coding",
            Mode::NoAgentic => "Without Agentic Coding",
            Mode::Initial => "Choose Your Approach",
        }
    }

    /// Subtitle of the demo.
    pub fn subtitle(&self) -> &'static str {
        if self.mode == Mode::Principal {
            "Full visibility - See everything"
        } else if self.is_started() {
            "Find the blockage"
        } else if self.is_deployed() {
            "Running smoothly..."
        } else {
            "How will you handle production?"
        }
    }

    /// Label displayed with the incident cost.
    pub fn cost_label(&self) -> &'static str {
        if self.is_blockage_found() {
            "Incident Resolved!"
        } else {
            "Incident Cost"
        }
    }

    /// Whether the maze is hidden, except for the revealed cells.
    pub fn cover_visible(&self) -> bool {
        self.mode == Mode::Agentic || (self.mode == Mode::NoAgentic && self.is_deployed())
    }

    /// Whether the blockage wall is highlighted.
    pub fn blockage_visible(&self) -> bool {
        self.mode == Mode::Principal || self.is_blockage_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Session in the given mode, with the incident started.
    fn started(mode: Mode) -> Session {
        let mut session = Session::new(DemoConfig::default());
        if mode == Mode::Principal {
            session.select_mode(Mode::NoAgentic);
            start_incident(&mut session);
            let b = session.blockage_position().unwrap();
            session.click(b);
            assert!(session.retry_as_principal());
        } else {
            assert!(session.select_mode(mode));
        }
        start_incident(&mut session);
        session
    }

    fn start_incident(session: &mut Session) {
        let epoch = session.epoch();
        assert!(matches!(session.deploy(), Some(TimerRequest::Deploy { .. })));
        assert!(matches!(
            session.deploy_elapsed(epoch),
            Some(TimerRequest::Tick { .. })
        ));
        assert_eq!(session.stage(), Stage::Started);
    }

    /// A cell far from the blockage.
    fn other_cell(session: &Session) -> Position {
        let b = session.blockage_position().unwrap();
        Position::new(if b.row > 4 { 0 } else { 9 }, if b.col > 4 { 0 } else { 9 })
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new(DemoConfig::default());
        assert_eq!(session.mode(), Mode::Initial);
        assert_eq!(session.stage(), Stage::Ready);
        assert_eq!(session.seed(), 42);
        assert_eq!(session.incident_cost(), 0);
        assert!(session.blockage_position().is_none());
        assert_eq!(session.title(), "Choose Your Approach");
        assert_eq!(session.subtitle(), "How will you handle production?");
        assert_eq!(
            session.available_actions(),
            vec![Action::ChooseNoAgentic, Action::ChooseAgentic]
        );
    }

    #[test]
    fn test_deploy_requires_a_mode() {
        let mut session = Session::new(DemoConfig::default());
        assert!(session.deploy().is_none());
        assert!(!session.select_mode(Mode::Principal));
        assert!(session.select_mode(Mode::Agentic));
        assert!(session.cover_visible());
        assert_eq!(session.available_actions(), vec![Action::Deploy]);

        let request = session.deploy();
        assert_eq!(
            request,
            Some(TimerRequest::Deploy {
                epoch: session.epoch(),
                delay: std::time::Duration::from_secs(3)
            })
        );
        assert_eq!(session.subtitle(), "Running smoothly...");
        assert!(session.deploy().is_none());
        assert!(!session.select_mode(Mode::NoAgentic));
    }

    #[test]
    fn test_no_agentic_cover_after_deploy() {
        let mut session = Session::new(DemoConfig::default());
        session.select_mode(Mode::NoAgentic);
        assert!(!session.cover_visible());
        session.deploy();
        assert!(session.cover_visible());
    }

    #[test]
    fn test_clicks_before_start_are_ignored() {
        let mut session = Session::new(DemoConfig::default());
        session.select_mode(Mode::NoAgentic);
        session.deploy();
        assert_eq!(session.click(Position::new(0, 0)), ClickOutcome::Ignored);
        assert_eq!(session.incident_cost(), 0);
    }

    #[test]
    fn test_click_cost_charged_once() {
        let mut session = started(Mode::NoAgentic);
        let cell = other_cell(&session);

        assert!(matches!(session.click(cell), ClickOutcome::Hint(_)));
        assert_eq!(session.click_cost(), 500);
        assert_eq!(session.click(cell), ClickOutcome::AlreadyRevealed);
        assert_eq!(session.click_cost(), 500);
        assert_eq!(session.revealed().len(), 1);
        assert!(session.message().is_some());
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let mut session = started(Mode::Agentic);
        assert_eq!(session.click(Position::new(10, 0)), ClickOutcome::Ignored);
        assert_eq!(session.click_cost(), 0);
    }

    #[test]
    fn test_ticks_until_found() {
        let mut session = started(Mode::Agentic);
        let epoch = session.epoch();
        for _ in 0..25 {
            assert!(session.tick(epoch));
        }
        assert_eq!(session.time_cost(), 25);

        let blockage = session.blockage_position().unwrap();
        assert_eq!(session.click(blockage), ClickOutcome::Found);
        assert_eq!(session.incident_cost(), 25 + 500);
        assert_eq!(session.cost_label(), "Incident Resolved!");

        // The tick timer stops and the cost is frozen
        assert!(!session.tick(epoch));
        assert!(!session.tick(session.epoch()));
        assert_eq!(session.incident_cost(), 525);
        assert_eq!(session.click(Position::new(0, 0)), ClickOutcome::Ignored);
        assert_eq!(session.incident_cost(), 525);
    }

    #[test]
    fn test_found_reveals_neighborhood() {
        let mut session = started(Mode::NoAgentic);
        let blockage = session.blockage_position().unwrap();
        session.click(blockage);

        assert!(session.is_blockage_found());
        assert!(session.blockage_visible());
        assert_eq!(session.message(), Some(HintMessage::Found));
        for row in 0..10 {
            for col in 0..10 {
                let p = Position::new(row, col);
                assert_eq!(session.is_revealed(p), p.manhattan(blockage) <= 3);
            }
        }
        assert_eq!(
            session.available_actions(),
            vec![Action::TryAgain, Action::TryWithPrincipal]
        );
    }

    #[test]
    fn test_principal_mode() {
        let mut session = started(Mode::Principal);
        assert_eq!(session.seed(), 42);
        assert_eq!(session.title(), "With Principal");
        assert_eq!(session.subtitle(), "Full visibility - See everything");
        assert!(!session.cover_visible());
        assert!(session.blockage_visible());
        assert_eq!(session.incident_cost(), 0);

        // Other cells do nothing
        let cell = other_cell(&session);
        assert_eq!(session.click(cell), ClickOutcome::Ignored);
        assert!(session.revealed().is_empty());
        assert!(session.message().is_none());
        assert_eq!(session.click_cost(), 0);

        let blockage = session.blockage_position().unwrap();
        assert_eq!(session.click(blockage), ClickOutcome::Found);
        assert_eq!(session.click_cost(), 0);
        assert!(session.revealed().is_empty());
        assert!(!session.retry_as_principal());
        assert_eq!(session.available_actions(), vec![Action::TryAgain]);
    }

    #[test]
    fn test_principal_keeps_the_maze() {
        let mut session = started(Mode::NoAgentic);
        let first = session.layout().clone();
        let blockage = session.blockage_position().unwrap();

        assert!(!session.retry_as_principal());
        session.click(blockage);
        assert!(session.retry_as_principal());
        assert_eq!(session.stage(), Stage::Ready);
        assert_eq!(session.incident_cost(), 0);
        assert!(session.revealed().is_empty());
        assert!(session.blockage_position().is_none());

        start_incident(&mut session);
        assert_eq!(session.layout(), &first);
    }

    #[test]
    fn test_try_again_resets() {
        let mut session = started(Mode::NoAgentic);
        let epoch = session.epoch();
        session.tick(epoch);
        let cell = other_cell(&session);
        session.click(cell);
        let blockage = session.blockage_position().unwrap();
        session.click(blockage);

        let seed = session.seed();
        let mut changed = false;
        for _ in 0..5 {
            session.try_again();
            assert_eq!(session.mode(), Mode::Initial);
            assert_eq!(session.stage(), Stage::Ready);
            assert_eq!(session.time_cost(), 0);
            assert_eq!(session.click_cost(), 0);
            assert!(session.revealed().is_empty());
            assert!(session.message().is_none());
            assert!(session.seed() < SEED_RANGE);
            changed |= session.seed() != seed;
        }
        assert!(changed);
    }

    #[test]
    fn test_stale_deploy_is_ignored() {
        let mut session = Session::new(DemoConfig::default());
        session.select_mode(Mode::Agentic);
        let Some(TimerRequest::Deploy { epoch, .. }) = session.deploy() else {
            panic!("no deploy timer");
        };
        session.try_again_with_seed(7);
        assert!(session.deploy_elapsed(epoch).is_none());
        assert_eq!(session.stage(), Stage::Ready);
        assert_eq!(session.mode(), Mode::Initial);
        assert!(session.blockage_position().is_none());
        assert!(!session.tick(epoch));
    }
}
