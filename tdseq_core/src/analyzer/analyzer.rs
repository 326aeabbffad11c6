use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::bar_list::BarList;
use crate::common::{
    enums::{DataField, ShowMode},
    td_exception::TdException,
    time::Time,
};
use crate::config::td_config::TdConfig;
use crate::countdown::countdown_list::CountdownList;
use crate::exhaustion::exhaustion_list::{ExhaustionList, ExhaustionSignal};
use crate::marker::{
    marker::{sort_markers, Marker},
    marker_style::OverlayMarker,
};
use crate::math::demarker::DeMarker;
use crate::setup::{
    setup::{CompletedSetup, SetupSnapshot},
    setup_list::SetupList,
};

/// Everything one run produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// setup and countdown markers, ordered by time
    pub markers: Vec<Marker>,
    pub completed_setups: Vec<CompletedSetup>,
    pub setup_trace: Vec<SetupSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub demarker: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exhaustion: Vec<ExhaustionSignal>,
}

/// Runs setup, countdown and the optional indicators over a bar series.
///
/// Holds configuration only; every call recomputes from scratch, so one
/// analyzer can serve any number of series, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: TdConfig,
}

impl Analyzer {
    pub fn new(config: TdConfig) -> Self {
        Self { config }
    }

    /// Series the configured run cannot do without
    pub fn required_fields(&self) -> Vec<DataField> {
        let mut res = vec![DataField::Close];
        let needs_range = self.config.countdown_show != ShowMode::Hidden
            || self.config.cal_demarker
            || self.config.cal_exhaustion;
        if needs_range {
            res.push(DataField::High);
            res.push(DataField::Low);
        }
        if self.config.cal_exhaustion {
            res.push(DataField::Volume);
        }
        res
    }

    /// Build the bar list from columns, then run
    pub fn run_columns(
        &self,
        times: &[Time],
        columns: &HashMap<DataField, Vec<f64>>,
    ) -> Result<AnalysisResult, TdException> {
        let bars = BarList::from_columns(times, columns, &self.required_fields())?;
        self.run_checked(bars)
    }

    /// Apply the optional OHLC check, then run
    pub fn run_checked(&self, mut bars: BarList) -> Result<AnalysisResult, TdException> {
        if self.config.kl_data_check {
            bars.check(self.config.autofix)?;
        }
        Ok(self.run(&bars))
    }

    pub fn run(&self, bars: &BarList) -> AnalysisResult {
        let mut setup_list = SetupList::new(self.config.setup_conf.clone());
        setup_list.cal(bars);

        let setup_len = self.config.setup_conf.setup_len;
        let mut markers = filter_show(setup_list.markers, self.config.setup_show, setup_len);
        if self.config.countdown_show != ShowMode::Hidden {
            let mut countdown_list = CountdownList::new(self.config.countdown_conf.clone());
            countdown_list.cal(bars, &setup_list.completed);
            let max_countdown = self.config.countdown_conf.max_countdown;
            let shown =
                filter_show(countdown_list.markers, self.config.countdown_show, max_countdown);
            markers.extend(shown);
        }
        sort_markers(&mut markers);

        let demarker = if self.config.cal_demarker {
            let mut dem = DeMarker::new(self.config.demarker_period);
            bars.iter().map(|b| dem.add(b.high, b.low)).collect()
        } else {
            Vec::new()
        };

        let exhaustion = if self.config.cal_exhaustion {
            let mut exhaustion_list = ExhaustionList::new(self.config.exhaustion_conf.clone());
            exhaustion_list.cal(bars);
            exhaustion_list.signals
        } else {
            Vec::new()
        };

        debug!(
            bars = bars.len(),
            markers = markers.len(),
            setups = setup_list.completed.len(),
            "td sequential done"
        );
        AnalysisResult {
            markers,
            completed_setups: setup_list.completed,
            setup_trace: setup_list.trace,
            demarker,
            exhaustion,
        }
    }

    /// Chart-ready records for `result`, styled per this config
    pub fn overlay(&self, result: &AnalysisResult) -> Vec<OverlayMarker> {
        self.config.styles.overlay_all(&result.markers)
    }
}

/// `TerminalOnly` keeps every marker at the full count, extended setup 9s included
fn filter_show(markers: Vec<Marker>, mode: ShowMode, full_count: usize) -> Vec<Marker> {
    match mode {
        ShowMode::All => markers,
        ShowMode::TerminalOnly => markers.into_iter().filter(|m| m.count == full_count).collect(),
        ShowMode::Hidden => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{enums::SetupExtension, td_exception::ErrCode};
    use crate::setup::setup_config::SetupConfig;

    fn declining_columns(n: usize) -> (Vec<Time>, HashMap<DataField, Vec<f64>>) {
        let closes: Vec<f64> = (0..n)
            .map(|i| if i <= 4 { 100.0 + i as f64 } else { 104.0 - 4.0 * (i - 4) as f64 })
            .collect();
        let times = (0..n).map(|i| Time::new(i as i64 * 60)).collect();
        let mut columns = HashMap::new();
        columns.insert(DataField::High, closes.iter().map(|c| c + 1.0).collect());
        columns.insert(DataField::Low, closes.iter().map(|c| c - 1.0).collect());
        columns.insert(DataField::Close, closes);
        (times, columns)
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }

    #[test]
    fn test_run_columns() {
        let (times, columns) = declining_columns(30);
        let analyzer = Analyzer::default();
        let res = analyzer.run_columns(&times, &columns).unwrap();
        assert_eq!(res.completed_setups.len(), 1);
        assert_eq!(res.markers.len(), 9 + 13);
        assert_eq!(res.setup_trace.len(), 30);
        assert!(res.demarker.is_empty());
        // setup 9 and countdown 1 share bar 13, setup first
        let at_13: Vec<&Marker> = res.markers.iter().filter(|m| m.index == 13).collect();
        assert!(at_13[0].is_setup());
        assert!(!at_13[1].is_setup());
    }

    #[test]
    fn test_missing_high_low() {
        let (times, mut columns) = declining_columns(30);
        columns.remove(&DataField::Low);
        let err = Analyzer::default().run_columns(&times, &columns).unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataNotFound);

        // setup alone only needs closes
        let config = TdConfig {
            countdown_show: ShowMode::Hidden,
            ..TdConfig::default()
        };
        let res = Analyzer::new(config).run_columns(&times, &columns).unwrap();
        assert!(res.markers.iter().all(Marker::is_setup));
        assert_eq!(res.markers.len(), 9);
    }

    #[test]
    fn test_show_modes() {
        let (times, columns) = declining_columns(30);
        let config = TdConfig {
            setup_show: ShowMode::TerminalOnly,
            countdown_show: ShowMode::TerminalOnly,
            ..TdConfig::default()
        };
        let res = Analyzer::new(config).run_columns(&times, &columns).unwrap();
        let labels: Vec<&str> = res.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["9", "13"]);

        let config = TdConfig {
            setup_show: ShowMode::Hidden,
            ..TdConfig::default()
        };
        let res = Analyzer::new(config).run_columns(&times, &columns).unwrap();
        // hidden setups still feed the countdown
        assert_eq!(res.markers.len(), 13);
        assert_eq!(res.completed_setups.len(), 1);
    }

    #[test]
    fn test_terminal_mode_keeps_extended_nines() {
        let (times, columns) = declining_columns(16);
        let config = TdConfig {
            setup_conf: SetupConfig {
                extension: SetupExtension::Extend,
                ..SetupConfig::default()
            },
            setup_show: ShowMode::TerminalOnly,
            countdown_show: ShowMode::Hidden,
            ..TdConfig::default()
        };
        let res = Analyzer::new(config).run_columns(&times, &columns).unwrap();
        let nines: Vec<(usize, &str)> =
            res.markers.iter().map(|m| (m.index, m.label.as_str())).collect();
        assert_eq!(nines, vec![(13, "9"), (14, "9"), (15, "9")]);
        assert_eq!(res.markers.iter().filter(|m| m.is_terminal).count(), 1);
    }

    #[test]
    fn test_kl_data_check() {
        let (times, mut columns) = declining_columns(10);
        columns.get_mut(&DataField::High).unwrap()[3] = 0.0;
        let config = TdConfig {
            kl_data_check: true,
            ..TdConfig::default()
        };
        let err = Analyzer::new(config.clone()).run_columns(&times, &columns).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlDataInvalid);

        let fixed = TdConfig { autofix: true, ..config };
        assert!(Analyzer::new(fixed).run_columns(&times, &columns).is_ok());
    }

    #[test]
    fn test_optional_indicators() {
        let (times, columns) = declining_columns(30);
        let config = TdConfig {
            cal_demarker: true,
            ..TdConfig::default()
        };
        let analyzer = Analyzer::new(config);
        let res = analyzer.run_columns(&times, &columns).unwrap();
        assert_eq!(res.demarker.len(), 30);
        assert_eq!(res.demarker[0], None);
        assert_eq!(res.demarker[29], Some(0.0));

        let overlay = analyzer.overlay(&res);
        assert_eq!(overlay.len(), res.markers.len());
        assert_eq!(overlay[0].time, res.markers[0].time.timestamp);
    }

    #[test]
    fn test_exhaustion_needs_volume() {
        let (times, columns) = declining_columns(30);
        let config = TdConfig {
            cal_exhaustion: true,
            ..TdConfig::default()
        };
        let err = Analyzer::new(config).run_columns(&times, &columns).unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataNotFound);
    }
}
