use crate::common::td_exception::{ErrCode, TdException};

/// TD momentum exhaustion settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExhaustionConfig {
    pub lookback: usize,
    pub consecutive: usize,
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub vol_ma_period: usize,
    pub vol_spike_factor: f64,
}

impl Default for ExhaustionConfig {
    fn default() -> Self {
        Self {
            lookback: 4,
            consecutive: 9,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            vol_ma_period: 20,
            vol_spike_factor: 1.5,
        }
    }
}

impl ExhaustionConfig {
    pub fn check(&self) -> Result<(), TdException> {
        if self.lookback == 0
            || self.consecutive == 0
            || self.rsi_period == 0
            || self.vol_ma_period == 0
        {
            return Err(TdException::new(
                "exhaustion lookback/consecutive/rsi_period/vol_ma_period must be positive",
                ErrCode::ParaError,
            ));
        }
        if self.rsi_oversold > self.rsi_overbought {
            return Err(TdException::new(
                format!(
                    "rsi_oversold={} is above rsi_overbought={}",
                    self.rsi_oversold, self.rsi_overbought
                ),
                ErrCode::ParaError,
            ));
        }
        Ok(())
    }
}
