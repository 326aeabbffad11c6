/// Wilder-smoothed RSI, fed one price at a time
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    last_price: Option<f64>,
    seen: usize,
    avg_gain: f64,
    avg_loss: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_price: None,
            seen: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }

    /// RSI after `price`; `None` until `period` changes have been seen
    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = self.last_price.replace(price)?;
        if self.period == 0 {
            return None;
        }
        let change = price - last_price;
        let (gain, loss) = if change >= 0.0 { (change, 0.0) } else { (0.0, -change) };

        self.seen += 1;
        let period = self.period as f64;
        if self.seen <= self.period {
            // simple average over the seed window
            self.avg_gain += gain / period;
            self.avg_loss += loss / period;
            if self.seen < self.period {
                return None;
            }
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        let rsi = if self.avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
        };
        Some(rsi.clamp(0.0, 100.0))
    }

    /// RSI of a whole series, aligned with the input
    pub fn series(period: usize, prices: &[f64]) -> Vec<Option<f64>> {
        let mut rsi = Self::new(period);
        prices.iter().map(|p| rsi.add(*p)).collect()
    }
}
