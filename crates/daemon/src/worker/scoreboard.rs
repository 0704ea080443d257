// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared admission counter for the worker pool.

use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Board {
    active: usize,
    terminated: bool,
}

/// Counts running pool members against a ceiling and carries the
/// termination flag. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    board: Arc<RwLock<Board>>,
    ceiling: usize,
}

impl Scoreboard {
    pub fn new(ceiling: usize) -> Self {
        Self { board: Arc::new(RwLock::new(Board::default())), ceiling }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn active(&self) -> usize {
        self.board.read().active
    }

    /// Claim one slot. Refused when full or terminated.
    pub fn try_admit(&self) -> Option<Slot> {
        let mut board = self.board.write();
        if board.terminated || board.active >= self.ceiling {
            return None;
        }
        board.active += 1;
        Some(Slot { board: self.clone() })
    }

    fn release(&self) {
        let mut board = self.board.write();
        board.active = board.active.saturating_sub(1);
    }

    /// Stop admitting. Running members see this on their next check.
    pub fn terminate(&self) {
        self.board.write().terminated = true;
    }

    pub fn is_terminated(&self) -> bool {
        self.board.read().terminated
    }
}

/// An admitted slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct Slot {
    board: Scoreboard,
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.board.release();
    }
}

#[cfg(test)]
#[path = "scoreboard_tests.rs"]
mod tests;
