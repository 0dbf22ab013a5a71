//! Descriptive statistics over winning bids.
//!
//! Every helper returns 0 on an empty input instead of dividing by zero.

/// Sum of bids as a wide integer.
pub fn total(bids: &[u32]) -> u64 {
    bids.iter().map(|&b| u64::from(b)).sum()
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// `part` as a percentage of `whole`, or 0 when `whole` is 0.
pub fn percent(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

/// Arithmetic mean.
pub fn mean(bids: &[u32]) -> f64 {
    ratio(total(bids) as f64, bids.len() as f64)
}

/// Middle value, or the mean of the middle pair for even counts.
pub fn median(bids: &[u32]) -> f64 {
    if bids.is_empty() {
        return 0.0;
    }

    let mut sorted = bids.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator); 0 below two observations.
pub fn sample_std_dev(bids: &[u32]) -> f64 {
    if bids.len() < 2 {
        return 0.0;
    }

    let avg = mean(bids);
    let variance = bids
        .iter()
        .map(|&b| (f64::from(b) - avg).powi(2))
        .sum::<f64>()
        / (bids.len() - 1) as f64;

    variance.sqrt()
}
