#![allow(dead_code)]

use tdseq_core::common::time::Time;
use tdseq_core::{BarList, PriceBar};

pub const DAY: i64 = 86_400;

/// Daily bars with high/low one point around the close
pub fn make_bars(closes: &[f64]) -> BarList {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(Time::new(i as i64 * DAY), c, c + 1.0, c - 1.0, c))
        .collect();
    BarList::from_bars(bars).expect("increasing timestamps")
}

/// Bars from a random walk: `steps` are close-to-close moves, `wicks` the high/low offsets
pub fn walk_bars(steps: &[f64], wicks: &[(f64, f64)]) -> BarList {
    let mut close = 100.0;
    let bars = steps
        .iter()
        .zip(wicks)
        .enumerate()
        .map(|(i, (step, (up, down)))| {
            close = ((close + step) * 100.0_f64).round() / 100.0;
            PriceBar::new(Time::new(i as i64 * DAY), close, close + up, close - down, close)
        })
        .collect();
    BarList::from_bars(bars).expect("increasing timestamps")
}

/// Five rising closes then a steady decline of 4 per bar
pub fn rise_then_fall(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| if i <= 4 { 100.0 + i as f64 } else { 104.0 - 4.0 * (i - 4) as f64 })
        .collect()
}
