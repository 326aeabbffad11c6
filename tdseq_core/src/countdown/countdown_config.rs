use crate::common::{
    enums::PendingDisplay,
    td_exception::{ErrCode, TdException},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CountdownConfig {
    /// close is compared with the low/high this many bars back
    pub countdown_bias: usize,
    pub max_countdown: usize,
    /// drop cancelled runs; keep finished and still-open ones
    pub only_emit_complete: bool,
    /// how an open run is shown when `only_emit_complete` is set
    pub pending_display: PendingDisplay,
    /// start counting at the perfection bar, skip unperfected setups
    pub require_perfection: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            countdown_bias: 2,
            max_countdown: 13,
            only_emit_complete: false,
            pending_display: PendingDisplay::Full,
            require_perfection: false,
        }
    }
}

impl CountdownConfig {
    pub fn new(
        countdown_bias: Option<usize>,
        max_countdown: Option<usize>,
        only_emit_complete: Option<bool>,
        pending_display: Option<PendingDisplay>,
        require_perfection: Option<bool>,
    ) -> Result<Self, TdException> {
        let default = Self::default();
        let conf = Self {
            countdown_bias: countdown_bias.unwrap_or(default.countdown_bias),
            max_countdown: max_countdown.unwrap_or(default.max_countdown),
            only_emit_complete: only_emit_complete.unwrap_or(default.only_emit_complete),
            pending_display: pending_display.unwrap_or(default.pending_display),
            require_perfection: require_perfection.unwrap_or(default.require_perfection),
        };
        if conf.max_countdown == 0 {
            return Err(TdException::new("max_countdown must be positive", ErrCode::ParaError));
        }
        if conf.countdown_bias == 0 {
            return Err(TdException::new("countdown_bias must be positive", ErrCode::ParaError));
        }
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let conf = CountdownConfig::new(None, Some(8), Some(true), None, None).unwrap();
        assert_eq!(conf.max_countdown, 8);
        assert_eq!(conf.countdown_bias, 2);
        assert!(conf.only_emit_complete);
        assert_eq!(conf.pending_display, PendingDisplay::Full);
        assert!(CountdownConfig::new(Some(0), None, None, None, None).is_err());
    }
}
