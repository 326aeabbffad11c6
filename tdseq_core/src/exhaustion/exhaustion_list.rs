use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::bar_list::BarList;
use crate::common::{
    enums::Direction,
    time::Time,
    utils::{back_fill, rolling_mean},
};
use crate::exhaustion::exhaustion_config::ExhaustionConfig;
use crate::math::rsi::Rsi;

/// Possible end of a run: stretched RSI on a volume spike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhaustionSignal {
    pub index: usize,
    pub time: Time,
    /// `sell` after a bullish run, `buy` after a bearish one
    pub direction: Direction,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct ExhaustionList {
    conf: ExhaustionConfig,
    pub signals: Vec<ExhaustionSignal>,
}

impl ExhaustionList {
    pub fn new(conf: ExhaustionConfig) -> Self {
        Self {
            conf,
            signals: Vec::new(),
        }
    }

    pub fn cal(&mut self, bars: &BarList) {
        self.signals.clear();
        let conf = &self.conf;
        let rsi = Rsi::series(conf.rsi_period, &bars.closes());
        let vol_ma = back_fill(&rolling_mean(&bars.volumes(), conf.vol_ma_period));

        let mut bullish = 0;
        let mut bearish = 0;
        for i in conf.lookback..bars.len() {
            let close = bars[i].close;
            let ref_close = bars[i - conf.lookback].close;
            if close > ref_close {
                bullish += 1;
                bearish = 0;
            } else if close < ref_close {
                bearish += 1;
                bullish = 0;
            }

            let spike = match vol_ma[i] {
                Some(ma) => ma > 0.0 && bars[i].volume >= conf.vol_spike_factor * ma,
                None => false,
            };

            if bullish == conf.consecutive {
                bullish = 0;
                if spike && matches!(rsi[i], Some(r) if r >= conf.rsi_overbought) {
                    self.signals.push(ExhaustionSignal {
                        index: i,
                        time: bars[i].time,
                        direction: Direction::Sell,
                        price: bars[i].high,
                    });
                }
            }
            if bearish == conf.consecutive {
                bearish = 0;
                if spike && matches!(rsi[i], Some(r) if r <= conf.rsi_oversold) {
                    self.signals.push(ExhaustionSignal {
                        index: i,
                        time: bars[i].time,
                        direction: Direction::Buy,
                        price: bars[i].low,
                    });
                }
            }
        }
        debug!(signals = self.signals.len(), "exhaustion scan done");
    }
}
