use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::{
    enums::DataField,
    td_exception::{ErrCode, TdException},
    time::Time,
};

/// One OHLCV bar of the input series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PriceBar {
    pub fn new(time: Time, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Build a bar from a field -> value row.
    ///
    /// `close` is always required; any other field listed in `required` must be
    /// present too. Missing optional prices fall back to `close`, missing volume to 0.
    pub fn from_dict(
        time: Time,
        kl_dict: &HashMap<DataField, f64>,
        required: &[DataField],
    ) -> Result<Self, TdException> {
        let fetch = |field: DataField| -> Result<Option<f64>, TdException> {
            match kl_dict.get(&field) {
                Some(v) => Ok(Some(*v)),
                None if field == DataField::Close || required.contains(&field) => Err(
                    TdException::new(
                        format!("missing required series: {}", field),
                        ErrCode::SrcDataNotFound,
                    ),
                ),
                None => Ok(None),
            }
        };

        let close = fetch(DataField::Close)?.unwrap_or(f64::NAN);
        Ok(Self {
            time,
            open: fetch(DataField::Open)?.unwrap_or(close),
            high: fetch(DataField::High)?.unwrap_or(close),
            low: fetch(DataField::Low)?.unwrap_or(close),
            close,
            volume: fetch(DataField::Volume)?.unwrap_or(0.0),
        })
    }

    /// Verify low/high bound open and close, optionally widening them instead of failing
    pub fn check(&mut self, autofix: bool) -> Result<(), TdException> {
        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                warn!(time = %self.time, low = self.low, fixed = min_price, "autofix low price");
                self.low = min_price;
            } else {
                return Err(TdException::new(
                    format!(
                        "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.time, self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                warn!(time = %self.time, high = self.high, fixed = max_price, "autofix high price");
                self.high = max_price;
            } else {
                return Err(TdException::new(
                    format!(
                        "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.time, self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(DataField, f64)]) -> HashMap<DataField, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_from_dict_missing_close() {
        let dict = row(&[(DataField::High, 2.0), (DataField::Low, 1.0)]);
        let err = PriceBar::from_dict(Time::new(0), &dict, &[]).unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataNotFound);
        assert!(err.msg.contains("close"));
    }

    #[test]
    fn test_from_dict_missing_required_low() {
        let dict = row(&[(DataField::Close, 1.5), (DataField::High, 2.0)]);
        let required = [DataField::High, DataField::Low];
        let err = PriceBar::from_dict(Time::new(0), &dict, &required).unwrap_err();
        assert!(err.msg.contains("low"));
    }

    #[test]
    fn test_from_dict_fallbacks() {
        let dict = row(&[(DataField::Close, 1.5)]);
        let bar = PriceBar::from_dict(Time::new(0), &dict, &[]).unwrap();
        assert_eq!(bar.open, 1.5);
        assert_eq!(bar.high, 1.5);
        assert_eq!(bar.low, 1.5);
        assert_eq!(bar.volume, 0.0);
    }

    #[test]
    fn test_check() {
        let mut bar = PriceBar::new(Time::new(0), 10.0, 9.0, 8.0, 9.5);
        assert_eq!(bar.check(false).unwrap_err().errcode, ErrCode::KlDataInvalid);
        bar.check(true).unwrap();
        assert_eq!(bar.high, 10.0);
        assert_eq!(bar.low, 8.0);

        let mut ok = PriceBar::new(Time::new(0), 9.0, 10.0, 8.0, 9.5);
        assert!(ok.check(false).is_ok());
    }
}
