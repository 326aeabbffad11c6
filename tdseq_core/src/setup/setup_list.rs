use tracing::{debug, trace};

use crate::bar::bar_list::BarList;
use crate::common::enums::{Direction, Phase, SetupExtension};
use crate::marker::marker::{sort_markers, Marker};
use crate::setup::{
    setup::{CompletedSetup, SetupSnapshot, SetupState},
    setup_config::SetupConfig,
};

/// TD Setup detector.
///
/// A single pass over the bars with one `SetupState` per direction. A bearish
/// flip (`close[i] < close[i-4]` after `close[i-1] > close[i-5]`) starts a buy
/// setup and wipes the sell side; a bullish flip does the opposite. While a run
/// is active each bar must keep the comparison or the run breaks.
#[derive(Debug, Clone)]
pub struct SetupList {
    conf: SetupConfig,
    pub markers: Vec<Marker>,
    pub completed: Vec<CompletedSetup>,
    pub trace: Vec<SetupSnapshot>,
}

impl SetupList {
    pub fn new(conf: SetupConfig) -> Self {
        Self {
            conf,
            markers: Vec::new(),
            completed: Vec::new(),
            trace: Vec::new(),
        }
    }

    /// Recompute everything from `bars`
    pub fn cal(&mut self, bars: &BarList) {
        self.markers.clear();
        self.completed.clear();
        self.trace.clear();
        self.trace.resize(bars.len(), SetupSnapshot::default());

        let mut buy = SetupState::new(Direction::Buy);
        let mut sell = SetupState::new(Direction::Sell);
        // completed setups (indices into self.completed) not yet perfected
        let mut pending: Vec<usize> = Vec::new();

        for i in self.conf.first_flip_index()..bars.len() {
            let flip = self.flip_at(bars, i);
            if let Some(dir) = flip {
                let completed = &self.completed;
                pending.retain(|&k| completed[k].direction == dir);
            }
            self.check_perfection(bars, i, &mut pending);

            let (buy_cnt, sell_cnt) = match flip {
                Some(Direction::Buy) => {
                    self.on_flip(bars, i, &mut buy, &mut sell);
                    (buy.count, sell.count)
                }
                Some(Direction::Sell) => {
                    self.on_flip(bars, i, &mut sell, &mut buy);
                    (buy.count, sell.count)
                }
                None => {
                    let close = bars[i].close;
                    let ref_close = bars[i - self.conf.setup_bias].close;
                    let b = self.step(bars, i, &mut buy, close < ref_close, &mut pending);
                    let s = self.step(bars, i, &mut sell, close > ref_close, &mut pending);
                    (b.unwrap_or(buy.count), s.unwrap_or(sell.count))
                }
            };
            self.trace[i] = SetupSnapshot {
                buy: buy_cnt,
                sell: sell_cnt,
            };
        }

        if !self.conf.emit_partial {
            // the run still forming at the end shows its latest count only
            for state in [&buy, &sell] {
                if state.is_pending(self.conf.setup_len) {
                    if let Some(last) = state.history.last() {
                        self.markers.push(last.clone());
                    }
                }
            }
        }
        sort_markers(&mut self.markers);
    }

    /// Direction of the setup a flip at bar `i` would start
    fn flip_at(&self, bars: &BarList, i: usize) -> Option<Direction> {
        let bias = self.conf.setup_bias;
        let close = bars[i].close;
        let ref_close = bars[i - bias].close;
        let prev_close = bars[i - 1].close;
        let prev_ref_close = bars[i - 1 - bias].close;

        if close < ref_close && prev_close > prev_ref_close {
            Some(Direction::Buy)
        } else if close > ref_close && prev_close < prev_ref_close {
            Some(Direction::Sell)
        } else {
            None
        }
    }

    fn on_flip(&mut self, bars: &BarList, i: usize, own: &mut SetupState, other: &mut SetupState) {
        if self.conf.extension == SetupExtension::Freeze && own.is_latched(self.conf.setup_len) {
            return;
        }
        other.clear();
        let marker = self.make_marker(bars, i, own.dir, 1, false);
        if self.conf.emit_partial {
            self.markers.push(marker.clone());
        }
        trace!(dir = %own.dir, index = i, "setup flip");
        own.start(marker);
    }

    /// Advance an active run by one bar; returns the count shown on this bar
    fn step(
        &mut self,
        bars: &BarList,
        i: usize,
        state: &mut SetupState,
        holds: bool,
        pending: &mut Vec<usize>,
    ) -> Option<usize> {
        if !state.active {
            return None;
        }
        let setup_len = self.conf.setup_len;

        if state.is_latched(setup_len) {
            match self.conf.extension {
                SetupExtension::Extend if holds => {
                    let marker = self.make_marker(bars, i, state.dir, setup_len, false);
                    self.markers.push(marker);
                    return Some(setup_len);
                }
                SetupExtension::Extend => state.clear(),
                // freeze waits for the opposite flip, reset never latches
                SetupExtension::Freeze | SetupExtension::Reset => {}
            }
            return None;
        }

        if !holds {
            state.clear();
            return None;
        }

        let count = state.count + 1;
        let terminal = count == setup_len;
        let mut marker = self.make_marker(bars, i, state.dir, count, terminal);
        if terminal {
            marker.perfected = perfection_hit(bars, i, state.dir);
        }
        if self.conf.emit_partial {
            self.markers.push(marker.clone());
        }
        let perfected = marker.perfected;
        state.advance(marker);

        if terminal {
            let mut setup = CompletedSetup::new(state.dir, i, bars[i].time);
            if perfected {
                setup.perfected_at = Some(i);
            } else {
                pending.push(self.completed.len());
            }
            debug!(dir = %state.dir, index = i, time = %bars[i].time, perfected, "setup completed");
            self.completed.push(setup);

            if !self.conf.emit_partial {
                self.markers.append(&mut state.history);
            }
            match self.conf.extension {
                SetupExtension::Reset => state.clear(),
                SetupExtension::Freeze | SetupExtension::Extend => state.history.clear(),
            }
        }
        Some(count)
    }

    fn check_perfection(&mut self, bars: &BarList, i: usize, pending: &mut Vec<usize>) {
        let completed = &mut self.completed;
        pending.retain(|&k| {
            let setup = &mut completed[k];
            if perfection_hit(bars, i, setup.direction) {
                debug!(dir = %setup.direction, setup = setup.index, index = i, "setup perfected");
                setup.perfected_at = Some(i);
                false
            } else {
                true
            }
        });
    }

    fn make_marker(
        &self,
        bars: &BarList,
        i: usize,
        dir: Direction,
        count: usize,
        terminal: bool,
    ) -> Marker {
        Marker::new(Phase::Setup, dir, i, bars[i].time, count, terminal)
    }
}

/// Buy: low at or under the low two bars back. Sell: high at or over the high two bars back.
fn perfection_hit(bars: &BarList, i: usize, dir: Direction) -> bool {
    if i < 2 {
        return false;
    }
    match dir {
        Direction::Buy => bars[i].low <= bars[i - 2].low,
        Direction::Sell => bars[i].high >= bars[i - 2].high,
    }
}
