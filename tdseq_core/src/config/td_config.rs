use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::common::{
    enums::{MarkerKind, ShowMode},
    td_exception::{ErrCode, TdException},
};
use crate::countdown::countdown_config::CountdownConfig;
use crate::exhaustion::exhaustion_config::ExhaustionConfig;
use crate::marker::marker_style::MarkerStyles;
use crate::setup::setup_config::SetupConfig;

/// TD Sequential analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TdConfig {
    pub setup_conf: SetupConfig,
    pub countdown_conf: CountdownConfig,
    pub exhaustion_conf: ExhaustionConfig,
    pub setup_show: ShowMode,
    pub countdown_show: ShowMode,
    pub kl_data_check: bool,
    pub autofix: bool,
    pub cal_demarker: bool,
    pub demarker_period: usize,
    pub cal_exhaustion: bool,
    pub styles: MarkerStyles,
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            setup_conf: SetupConfig::default(),
            countdown_conf: CountdownConfig::default(),
            exhaustion_conf: ExhaustionConfig::default(),
            setup_show: ShowMode::All,
            countdown_show: ShowMode::All,
            kl_data_check: false,
            autofix: false,
            cal_demarker: false,
            demarker_period: 14,
            cal_exhaustion: false,
            styles: MarkerStyles::default(),
        }
    }
}

impl TdConfig {
    pub fn new(conf: Option<HashMap<String, Value>>) -> Result<Self, TdException> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let setup_conf = SetupConfig::new(
            conf.get("setup_len")?,
            conf.get("setup_bias")?,
            conf.get("setup_emit_partial")?,
            conf.get_enum("setup_extension")?,
        )?;

        let countdown_conf = CountdownConfig::new(
            conf.get("countdown_bias")?,
            conf.get("max_countdown")?,
            conf.get("countdown_only_complete")?,
            conf.get_enum("countdown_pending")?,
            conf.get("require_perfection")?,
        )?;

        let exhaustion_conf = match conf.get::<HashMap<String, Value>>("exhaustion")? {
            Some(sub) => Self::exhaustion_config(sub)?,
            None => default.exhaustion_conf,
        };

        let mut styles = default.styles;
        for kind in MarkerKind::iter() {
            let style = styles.get_mut(kind);
            if let Some(color) = conf.get::<String>(&MarkerStyles::style_key(kind, "color"))? {
                style.color = color;
            }
            if let Some(shape) = conf.get::<String>(&MarkerStyles::style_key(kind, "shape"))? {
                style.terminal_shape = Some(shape);
            }
            if let Some(size) = conf.get::<u32>(&MarkerStyles::style_key(kind, "size"))? {
                style.terminal_size = Some(size);
            }
        }
        if let Some(circled) = conf.get("circled_setup_labels")? {
            styles.circled_setup_labels = circled;
        }

        let config = Self {
            setup_conf,
            countdown_conf,
            exhaustion_conf,
            setup_show: conf.get_enum("setup_show")?.unwrap_or(default.setup_show),
            countdown_show: conf.get_enum("countdown_show")?.unwrap_or(default.countdown_show),
            kl_data_check: conf.get("kl_data_check")?.unwrap_or(default.kl_data_check),
            autofix: conf.get("autofix")?.unwrap_or(default.autofix),
            cal_demarker: conf.get("cal_demarker")?.unwrap_or(default.cal_demarker),
            demarker_period: conf.get("demarker_period")?.unwrap_or(default.demarker_period),
            cal_exhaustion: conf.get("cal_exhaustion")?.unwrap_or(default.cal_exhaustion),
            styles,
        };
        conf.check()?;

        if config.demarker_period == 0 {
            return Err(TdException::new("demarker_period must be positive", ErrCode::ParaError));
        }
        Ok(config)
    }

    fn exhaustion_config(sub: HashMap<String, Value>) -> Result<ExhaustionConfig, TdException> {
        let mut conf = ConfigWithCheck::new(sub);
        let default = ExhaustionConfig::default();
        let res = ExhaustionConfig {
            lookback: conf.get("lookback")?.unwrap_or(default.lookback),
            consecutive: conf.get("consecutive")?.unwrap_or(default.consecutive),
            rsi_period: conf.get("rsi_period")?.unwrap_or(default.rsi_period),
            rsi_overbought: conf.get("rsi_overbought")?.unwrap_or(default.rsi_overbought),
            rsi_oversold: conf.get("rsi_oversold")?.unwrap_or(default.rsi_oversold),
            vol_ma_period: conf.get("vol_ma_period")?.unwrap_or(default.vol_ma_period),
            vol_spike_factor: conf.get("vol_spike_factor")?.unwrap_or(default.vol_spike_factor),
        };
        conf.check()?;
        res.check()?;
        Ok(res)
    }
}

/// Key/value reader that consumes keys as they are read, so leftovers can be reported
#[derive(Debug, Clone, Default)]
pub struct ConfigWithCheck {
    conf: HashMap<String, Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, Value>) -> Self {
        Self { conf }
    }

    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, TdException> {
        match self.conf.remove(key) {
            None => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                let msg = format!("para {} has wrong type: {}", key, e);
                TdException::new(msg, ErrCode::ConfigError)
            }),
        }
    }

    /// String-valued key parsed through `FromStr`
    pub fn get_enum<T: FromStr>(&mut self, key: &str) -> Result<Option<T>, TdException> {
        let raw: Option<String> = self.get(key)?;
        raw.map(|s| {
            s.parse::<T>().map_err(|_| {
                let msg = format!("invalid value {} for para {}", s, key);
                TdException::new(msg, ErrCode::ConfigError)
            })
        })
        .transpose()
    }

    /// Fails on the first key nobody asked for
    pub fn check(&self) -> Result<(), TdException> {
        match self.conf.keys().min() {
            Some(k) => Err(TdException::new(format!("unknown para = {}", k), ErrCode::ParaError)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::enums::{PendingDisplay, SetupExtension};
    use serde_json::json;

    fn conf_of(v: Value) -> Option<HashMap<String, Value>> {
        Some(serde_json::from_value(v).unwrap())
    }

    #[test]
    fn test_default() {
        let conf = TdConfig::new(None).unwrap();
        assert_eq!(conf, TdConfig::default());
        assert!(conf.setup_conf.emit_partial);
        assert!(!conf.countdown_conf.only_emit_complete);
    }

    #[test]
    fn test_keys() {
        let conf = TdConfig::new(conf_of(json!({
            "setup_emit_partial": false,
            "setup_extension": "freeze",
            "countdown_only_complete": true,
            "countdown_pending": "last",
            "require_perfection": true,
            "setup_show": "terminal",
            "countdown_show": "none",
            "buy_setup_color": "#123456",
            "sell_countdown_shape": "pin",
            "sell_countdown_size": 2,
            "buy_setup_shape": "square",
            "circled_setup_labels": true,
            "exhaustion": {"rsi_period": 7, "vol_spike_factor": 2.0},
        })))
        .unwrap();
        assert!(!conf.setup_conf.emit_partial);
        assert_eq!(conf.setup_conf.extension, SetupExtension::Freeze);
        assert_eq!(conf.countdown_conf.pending_display, PendingDisplay::Last);
        assert!(conf.countdown_conf.require_perfection);
        assert_eq!(conf.setup_show, ShowMode::TerminalOnly);
        assert_eq!(conf.countdown_show, ShowMode::Hidden);
        assert_eq!(conf.styles.setup_buy.color, "#123456");
        assert_eq!(conf.styles.setup_sell.color, "#AA0000");
        assert_eq!(conf.styles.setup_buy.terminal_shape.as_deref(), Some("square"));
        assert_eq!(conf.styles.countdown_sell.terminal_shape.as_deref(), Some("pin"));
        assert_eq!(conf.styles.countdown_sell.terminal_size, Some(2));
        assert_eq!(conf.styles.countdown_buy.terminal_shape.as_deref(), Some("arrowUp"));
        assert!(conf.styles.circled_setup_labels);
        assert_eq!(conf.exhaustion_conf.rsi_period, 7);
        assert_eq!(conf.exhaustion_conf.lookback, 4);
    }

    #[test]
    fn test_unknown_key() {
        let err = TdConfig::new(conf_of(json!({"bi_algo": "normal"}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
        assert!(err.msg.contains("bi_algo"));

        let err = TdConfig::new(conf_of(json!({"exhaustion": {"period": 3}}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
    }

    #[test]
    fn test_wrong_type() {
        let err = TdConfig::new(conf_of(json!({"setup_emit_partial": "yes"}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
        let err = TdConfig::new(conf_of(json!({"setup_extension": "sideways"}))).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }
}
