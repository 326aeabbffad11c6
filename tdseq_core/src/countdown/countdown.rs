use crate::common::enums::{Direction, PendingDisplay};
use crate::countdown::countdown_config::CountdownConfig;
use crate::marker::marker::Marker;

/// One countdown run, started by one completed setup
#[derive(Debug, Clone)]
pub struct CountdownState {
    pub direction: Direction,
    pub setup_index: usize,
    pub count: usize,
    pub cancelled: bool,
    pub markers: Vec<Marker>,
}

impl CountdownState {
    pub fn new(direction: Direction, setup_index: usize) -> Self {
        Self {
            direction,
            setup_index,
            count: 0,
            cancelled: false,
            markers: Vec::new(),
        }
    }

    pub fn is_complete(&self, max_countdown: usize) -> bool {
        self.count >= max_countdown
    }

    /// Neither finished nor cancelled, and counted at least once
    pub fn is_open(&self, max_countdown: usize) -> bool {
        !self.cancelled && !self.is_complete(max_countdown) && !self.markers.is_empty()
    }

    /// Markers that survive the display options
    pub fn retained(&self, conf: &CountdownConfig) -> &[Marker] {
        if !conf.only_emit_complete || self.is_complete(conf.max_countdown) {
            return &self.markers;
        }
        if !self.is_open(conf.max_countdown) {
            return &[];
        }
        match conf.pending_display {
            PendingDisplay::Full => &self.markers,
            PendingDisplay::Last => &self.markers[self.markers.len() - 1..],
        }
    }
}
