use std::collections::VecDeque;

/// DeMarker oscillator, fed one bar at a time.
///
/// `DeMax = max(high - prev_high, 0)`, `DeMin = max(prev_low - low, 0)`, summed
/// over the last `period` bars (shorter while warming up).
#[derive(Debug, Clone)]
pub struct DeMarker {
    period: usize,
    prev: Option<(f64, f64)>,
    window: VecDeque<(f64, f64)>,
}

impl DeMarker {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev: None,
            window: VecDeque::with_capacity(period),
        }
    }

    pub fn add(&mut self, high: f64, low: f64) -> Option<f64> {
        let (prev_high, prev_low) = self.prev.replace((high, low))?;
        if self.period == 0 {
            return None;
        }
        let de_max = (high - prev_high).max(0.0);
        let de_min = (prev_low - low).max(0.0);
        self.window.push_back((de_max, de_min));
        if self.window.len() > self.period {
            self.window.pop_front();
        }

        let (sum_max, sum_min) = self
            .window
            .iter()
            .fold((0.0, 0.0), |(a, b), (m, n)| (a + m, b + n));
        let denom = sum_max + sum_min;
        if denom == 0.0 || !denom.is_finite() {
            None
        } else {
            Some(sum_max / denom)
        }
    }

    pub fn series(period: usize, highs: &[f64], lows: &[f64]) -> Vec<Option<f64>> {
        let mut dem = Self::new(period);
        highs.iter().zip(lows).map(|(h, l)| dem.add(*h, *l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_bar_undefined() {
        let mut dem = DeMarker::new(14);
        assert_eq!(dem.add(10.0, 9.0), None);
        assert_eq!(dem.add(11.0, 10.0), Some(1.0));
    }

    #[test]
    fn test_flat_is_undefined() {
        let res = DeMarker::series(3, &[5.0; 4], &[4.0; 4]);
        assert!(res.iter().all(Option::is_none));
    }

    #[test]
    fn test_window_rolls() {
        // up 1, down 1, down 1, with period 2 the first move drops out
        let highs = [10.0, 11.0, 11.0, 11.0];
        let lows = [9.0, 10.0, 9.0, 8.0];
        let res = DeMarker::series(2, &highs, &lows);
        assert_eq!(res[1], Some(1.0));
        assert_eq!(res[2], Some(0.5));
        assert_eq!(res[3], Some(0.0));
    }
}
