use serde::{Deserialize, Serialize};

use crate::common::{
    enums::{Direction, MarkerKind, MarkerPosition, Phase},
    time::Time,
};

/// A labelled point annotation on one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub time: Time,
    pub index: usize,
    pub kind: MarkerKind,
    pub count: usize,
    pub label: String,
    pub is_terminal: bool,
    #[serde(default)]
    pub perfected: bool,
}

impl Marker {
    pub fn new(
        phase: Phase,
        dir: Direction,
        index: usize,
        time: Time,
        count: usize,
        is_terminal: bool,
    ) -> Self {
        Self {
            time,
            index,
            kind: MarkerKind::new(phase, dir),
            count,
            label: count.to_string(),
            is_terminal,
            perfected: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.kind.direction()
    }

    pub fn phase(&self) -> Phase {
        self.kind.phase()
    }

    pub fn is_setup(&self) -> bool {
        self.phase() == Phase::Setup
    }

    /// Buy markers sit under the bar, sell markers above it
    pub fn position(&self) -> MarkerPosition {
        match self.direction() {
            Direction::Buy => MarkerPosition::BelowBar,
            Direction::Sell => MarkerPosition::AboveBar,
        }
    }
}

/// Stable sort by time; markers on the same bar keep their merge order
pub fn sort_markers(markers: &mut [Marker]) {
    markers.sort_by_key(|m| m.time);
}
