use serde::{Deserialize, Serialize};

use crate::common::{enums::Direction, time::Time};
use crate::marker::marker::Marker;

/// Per-direction scan state, threaded through the setup loop
#[derive(Debug, Clone)]
pub struct SetupState {
    pub dir: Direction,
    pub count: usize,
    pub active: bool,
    /// markers of the current run, flushed on completion when partials are hidden
    pub history: Vec<Marker>,
}

impl SetupState {
    pub fn new(dir: Direction) -> Self {
        Self {
            dir,
            count: 0,
            active: false,
            history: Vec::new(),
        }
    }

    /// Begin a fresh run at count 1
    pub fn start(&mut self, marker: Marker) {
        self.count = 1;
        self.active = true;
        self.history.clear();
        self.history.push(marker);
    }

    pub fn advance(&mut self, marker: Marker) {
        self.count += 1;
        self.history.push(marker);
    }

    pub fn clear(&mut self) {
        self.count = 0;
        self.active = false;
        self.history.clear();
    }

    /// Holding at the full count (freeze / extend policies)
    pub fn is_latched(&self, setup_len: usize) -> bool {
        self.active && self.count >= setup_len
    }

    /// Started but not yet complete
    pub fn is_pending(&self, setup_len: usize) -> bool {
        self.active && self.count > 0 && self.count < setup_len
    }
}

/// A setup that reached its full count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSetup {
    pub direction: Direction,
    pub index: usize,
    pub time: Time,
    pub perfected_at: Option<usize>,
}

impl CompletedSetup {
    pub fn new(direction: Direction, index: usize, time: Time) -> Self {
        Self {
            direction,
            index,
            time,
            perfected_at: None,
        }
    }

    /// Bar the countdown starts from
    pub fn countdown_start(&self, require_perfection: bool) -> Option<usize> {
        if require_perfection {
            self.perfected_at
        } else {
            Some(self.index)
        }
    }
}

/// Setup counts of both directions after processing one bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSnapshot {
    pub buy: usize,
    pub sell: usize,
}
