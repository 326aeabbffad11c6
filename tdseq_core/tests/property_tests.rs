//! Property tests for the setup/countdown invariants over random walks.

mod common;

use common::walk_bars;
use proptest::prelude::*;
use tdseq_core::common::enums::Phase;
use tdseq_core::countdown::{countdown_config::CountdownConfig, countdown_list::CountdownList};
use tdseq_core::setup::{setup_config::SetupConfig, setup_list::SetupList};
use tdseq_core::{Analyzer, BarList};

fn arb_bars() -> impl Strategy<Value = BarList> {
    (0usize..160).prop_flat_map(|n| {
        (
            prop::collection::vec(-3.0..3.0_f64, n),
            prop::collection::vec((0.0..2.0_f64, 0.0..2.0_f64), n),
        )
            .prop_map(|(steps, wicks)| walk_bars(&steps, &wicks))
    })
}

proptest! {
    #[test]
    fn deterministic(bars in arb_bars()) {
        let analyzer = Analyzer::default();
        prop_assert_eq!(analyzer.run(&bars), analyzer.run(&bars));
    }

    /// Never a buy and a sell count on the same bar
    #[test]
    fn setup_counts_are_exclusive(bars in arb_bars()) {
        let mut setups = SetupList::new(SetupConfig::default());
        setups.cal(&bars);
        prop_assert_eq!(setups.trace.len(), bars.len());
        for snap in &setups.trace {
            prop_assert!(snap.buy == 0 || snap.sell == 0, "{:?}", snap);
        }
    }

    #[test]
    fn labels_are_bounded(bars in arb_bars()) {
        let res = Analyzer::default().run(&bars);
        for m in &res.markers {
            let max = match m.phase() {
                Phase::Setup => 9,
                Phase::Countdown => 13,
            };
            prop_assert!(m.count >= 1 && m.count <= max);
            prop_assert_eq!(m.label.clone(), m.count.to_string());
            prop_assert_eq!(m.is_terminal, m.count == max);
        }
        for pair in res.markers.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
        }
    }

    /// No countdown marker at or after the first later opposite setup
    #[test]
    fn countdowns_stop_at_opposite_setup(bars in arb_bars()) {
        let mut setups = SetupList::new(SetupConfig::default());
        setups.cal(&bars);
        let mut countdowns = CountdownList::new(CountdownConfig::default());
        countdowns.cal(&bars, &setups.completed);

        for run in &countdowns.runs {
            let cancel_at = setups
                .completed
                .iter()
                .filter(|s| s.direction == run.direction.opposite() && s.index > run.setup_index)
                .map(|s| s.index)
                .min();
            if let Some(c) = cancel_at {
                prop_assert!(run.markers.iter().all(|m| m.index < c));
            }
            prop_assert!(run.markers.iter().all(|m| m.index >= run.setup_index));
        }
    }

    /// Appending bars never rewrites markers already emitted
    #[test]
    fn no_lookahead(bars in arb_bars(), cut in 0.0..1.0_f64) {
        let k = (bars.len() as f64 * cut) as usize;
        let analyzer = Analyzer::default();
        let full = analyzer.run(&bars);
        let prefix = analyzer.run(&bars.prefix(k));

        let settled: Vec<_> = full.markers.iter().filter(|m| m.index < k).cloned().collect();
        prop_assert_eq!(prefix.markers, settled);
        prop_assert_eq!(&prefix.setup_trace[..], &full.setup_trace[..k]);
    }
}
