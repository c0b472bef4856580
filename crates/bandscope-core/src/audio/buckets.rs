//! Log-scale partitioning of a magnitude spectrum into display bars.

/// Boundary indices splitting a spectrum of `spectrum_len` bins into `bars` ranges.
///
/// Boundaries are log-spaced (`floor(len^(k/bars))`), forced to start at 0
/// and end at `spectrum_len`, bumped so each exceeds its predecessor, then
/// clamped into `[0, spectrum_len]`. The result has `bars + 1` entries and is
/// strictly increasing whenever `spectrum_len >= bars`; shorter spectra
/// produce repeated boundaries at the end, i.e. empty ranges.
pub fn bucket_boundaries(spectrum_len: usize, bars: usize) -> Vec<usize> {
    let log_max = (spectrum_len.max(1) as f64).ln();
    let mut idx: Vec<usize> = (0..=bars)
        .map(|k| {
            let exponent = if bars == 0 {
                0.0
            } else {
                log_max * k as f64 / bars as f64
            };
            exponent.exp().floor() as usize
        })
        .collect();

    idx[0] = 0;
    idx[bars] = spectrum_len;
    for j in 1..idx.len() {
        if idx[j] <= idx[j - 1] {
            idx[j] = idx[j - 1] + 1;
        }
    }
    for boundary in &mut idx {
        *boundary = (*boundary).min(spectrum_len);
    }
    idx
}

/// Mean magnitude of each range delimited by `boundaries`.
///
/// Empty or out-of-range buckets take the average of the neighbouring bins
/// just outside them, so no index is ever read out of bounds.
pub fn bucket_means(magnitudes: &[f32], boundaries: &[usize]) -> Vec<f32> {
    let len = magnitudes.len();
    boundaries
        .windows(2)
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            if start >= end || start >= len {
                let left = start
                    .checked_sub(1)
                    .and_then(|i| magnitudes.get(i))
                    .copied()
                    .unwrap_or(0.0);
                let right = magnitudes.get(end).copied().unwrap_or(left);
                (left + right) / 2.0
            } else {
                let chunk = &magnitudes[start..end.min(len)];
                chunk.iter().sum::<f32>() / chunk.len() as f32
            }
        })
        .collect()
}
