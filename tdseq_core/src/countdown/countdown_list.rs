use tracing::debug;

use crate::bar::bar_list::BarList;
use crate::common::enums::{Direction, Phase};
use crate::countdown::{countdown::CountdownState, countdown_config::CountdownConfig};
use crate::marker::marker::{sort_markers, Marker};
use crate::setup::setup::CompletedSetup;

/// TD Countdown detector.
///
/// Every completed setup starts its own run. A buy run counts bars whose close
/// is at or under the low two bars earlier, a sell run bars whose close is at or
/// over the high two bars earlier. Counts need not be consecutive. A run ends at
/// `max_countdown`, or is cancelled once the scan reaches an opposite setup
/// completed after its own.
#[derive(Debug, Clone)]
pub struct CountdownList {
    conf: CountdownConfig,
    pub runs: Vec<CountdownState>,
    pub markers: Vec<Marker>,
}

impl CountdownList {
    pub fn new(conf: CountdownConfig) -> Self {
        Self {
            conf,
            runs: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// `setups` must be in bar order, as produced by `SetupList::cal`
    pub fn cal(&mut self, bars: &BarList, setups: &[CompletedSetup]) {
        self.runs.clear();
        self.markers.clear();
        for dir in [Direction::Buy, Direction::Sell] {
            let runs = self.cal_direction(bars, setups, dir);
            for run in &runs {
                self.markers.extend_from_slice(run.retained(&self.conf));
            }
            self.runs.extend(runs);
        }
        sort_markers(&mut self.markers);
    }

    pub fn cal_direction(
        &self,
        bars: &BarList,
        setups: &[CompletedSetup],
        dir: Direction,
    ) -> Vec<CountdownState> {
        setups
            .iter()
            .filter(|s| s.direction == dir)
            .filter_map(|setup| {
                let start = setup.countdown_start(self.conf.require_perfection)?;
                let cancel_at = setups
                    .iter()
                    .filter(|o| o.direction == dir.opposite() && o.index > setup.index)
                    .map(|o| o.index)
                    .min();
                Some(self.run_one(bars, setup, start, cancel_at))
            })
            .collect()
    }

    fn run_one(
        &self,
        bars: &BarList,
        setup: &CompletedSetup,
        start: usize,
        cancel_at: Option<usize>,
    ) -> CountdownState {
        let bias = self.conf.countdown_bias;
        let mut state = CountdownState::new(setup.direction, setup.index);

        for i in start..bars.len() {
            if matches!(cancel_at, Some(c) if i >= c) {
                debug!(
                    dir = %setup.direction,
                    setup = setup.index,
                    index = i,
                    count = state.count,
                    "countdown cancelled"
                );
                state.cancelled = true;
                break;
            }
            if i < bias {
                continue;
            }
            let hit = match setup.direction {
                Direction::Buy => bars[i].close <= bars[i - bias].low,
                Direction::Sell => bars[i].close >= bars[i - bias].high,
            };
            if !hit {
                continue;
            }

            state.count += 1;
            let terminal = state.count == self.conf.max_countdown;
            state.markers.push(Marker::new(
                Phase::Countdown,
                setup.direction,
                i,
                bars[i].time,
                state.count,
                terminal,
            ));
            if terminal {
                debug!(
                    dir = %setup.direction,
                    setup = setup.index,
                    index = i,
                    "countdown completed"
                );
                break;
            }
        }
        state
    }
}
