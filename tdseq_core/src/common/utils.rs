/// Simple moving average; `None` until the window is full
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let mut res = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            res.push(Some(sum / window as f64));
        } else {
            res.push(None);
        }
    }
    res
}

/// Fill leading gaps with the first available value
pub fn back_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let first = values.iter().flatten().next().copied();
    let mut seen = false;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                seen = true;
            }
            if seen { *v } else { first }
        })
        .collect()
}

/// Render 1..=20 as circled digits, anything else as plain text
pub fn circled_digit(n: usize) -> String {
    match n {
        1..=20 => char::from_u32(0x2460 + (n as u32 - 1))
            .map(String::from)
            .unwrap_or_else(|| n.to_string()),
        _ => n.to_string(),
    }
}
