/*
timers.rs

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

//! Run the session timers.
//!
//! Each timer runs in its own thread and sends [`TimerEvent`] messages through a channel. The
//! events carry the session epoch of the request. [`SessionRunner`] publishes the current epoch
//! after each operation: a tick thread stops as soon as the epoch changes, and the session
//! ignores any event for an older epoch.

use async_channel::{Receiver, Sender, TryRecvError};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::game::{ClickOutcome, Mode, Session, Stage};
use crate::generator::grid::Position;

/// Timer that a session operation needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerRequest {
    /// Fire once after `delay`.
    Deploy { epoch: u64, delay: Duration },

    /// Fire every `interval` until the epoch changes.
    Tick { epoch: u64, interval: Duration },
}

/// Message sent by a timer thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    DeployElapsed { epoch: u64 },
    Tick { epoch: u64 },
}

/// Spawn the timer threads.
pub struct Timers {
    sender: Sender<TimerEvent>,
    receiver: Receiver<TimerEvent>,

    /// Epoch of the session, shared with the tick threads.
    epoch: Arc<AtomicU64>,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    /// Create a [`Timers`] object.
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::unbounded::<TimerEvent>();
        Self {
            sender,
            receiver,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish the session epoch. Tick threads for other epochs stop.
    pub fn set_epoch(&self, epoch: u64) {
        self.epoch.store(epoch, Ordering::SeqCst);
    }

    /// Start the timer.
    pub fn schedule(&self, request: TimerRequest) {
        let sender: Sender<TimerEvent> = self.sender.clone();
        match request {
            TimerRequest::Deploy { epoch, delay } => {
                debug!("Deploy timer for epoch {epoch}: {delay:?}");
                thread::spawn(move || {
                    thread::sleep(delay);
                    // The receiver is gone when the runner has been dropped
                    let _ = sender.send_blocking(TimerEvent::DeployElapsed { epoch });
                });
            }
            TimerRequest::Tick { epoch, interval } => {
                debug!("Tick timer for epoch {epoch}: every {interval:?}");
                let current: Arc<AtomicU64> = Arc::clone(&self.epoch);
                thread::spawn(move || {
                    loop {
                        thread::sleep(interval);
                        if current.load(Ordering::SeqCst) != epoch {
                            break;
                        }
                        if sender.send_blocking(TimerEvent::Tick { epoch }).is_err() {
                            break;
                        }
                    }
                    debug!("Tick timer for epoch {epoch} stopped");
                });
            }
        }
    }

    /// Return the next pending event, if any.
    pub fn try_next(&self) -> Option<TimerEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }

    /// Wait for the next event.
    pub fn next(&self) -> Option<TimerEvent> {
        self.receiver.recv_blocking().ok()
    }
}

/// Session driven by real timers.
pub struct SessionRunner {
    session: Session,
    timers: Timers,
}

impl SessionRunner {
    /// Create a [`SessionRunner`] object.
    pub fn new(session: Session) -> Self {
        let timers: Timers = Timers::new();
        timers.set_epoch(session.epoch());
        Self { session, timers }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start the requested timer, if any, and publish the session epoch.
    fn apply(&mut self, request: Option<TimerRequest>) {
        self.timers.set_epoch(self.session.epoch());
        if let Some(r) = request {
            self.timers.schedule(r);
        }
    }

    /// Process a timer event.
    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::DeployElapsed { epoch } => {
                let request: Option<TimerRequest> = self.session.deploy_elapsed(epoch);
                self.apply(request);
            }
            TimerEvent::Tick { epoch } => {
                if !self.session.tick(epoch) {
                    self.timers.set_epoch(self.session.epoch());
                }
            }
        }
    }

    /// Process the pending timer events without waiting.
    pub fn pump(&mut self) {
        while let Some(event) = self.timers.try_next() {
            self.dispatch(event);
        }
    }

    /// Wait until the incident starts. Return false if the session is not deploying.
    pub fn wait_started(&mut self) -> bool {
        self.pump();
        while self.session.stage() == Stage::Deployed {
            match self.timers.next() {
                Some(event) => self.dispatch(event),
                None => return false,
            }
        }
        self.session.is_started()
    }

    pub fn select_mode(&mut self, mode: Mode) -> bool {
        self.session.select_mode(mode)
    }

    pub fn deploy(&mut self) -> bool {
        let request: Option<TimerRequest> = self.session.deploy();
        let deployed: bool = request.is_some();
        self.apply(request);
        deployed
    }

    pub fn click(&mut self, position: Position) -> ClickOutcome {
        self.pump();
        let outcome: ClickOutcome = self.session.click(position);
        self.apply(None);
        outcome
    }

    pub fn retry_as_principal(&mut self) -> bool {
        let done: bool = self.session.retry_as_principal();
        self.apply(None);
        done
    }

    pub fn try_again(&mut self) {
        self.session.try_again();
        self.apply(None);
    }

    pub fn try_again_with_seed(&mut self, seed: u32) {
        self.session.try_again_with_seed(seed);
        self.apply(None);
    }
}
