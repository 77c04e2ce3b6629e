//! Descriptive statistics of a single column
//!
//! Min, max, mean and population standard deviation come from the statrs
//! reductions. Median and percentiles are computed on a sorted copy using
//! linear interpolation between closest ranks.

use statrs::statistics::Statistics;

use crate::errors::{StatsError, StatsResult};
use crate::types::{ColumnStats, QuartileConvention};

/// Compute descriptive statistics for one column (unrounded).
///
/// # Arguments
/// * `values` - Column values, must be non-empty and finite
/// * `quartiles` - Which percentiles to report as `first` and `third`
/// * `field` - Column name used in error messages
pub fn describe(
    values: &[f64],
    quartiles: QuartileConvention,
    field: &str,
) -> StatsResult<ColumnStats> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput { field: "column" });
    }
    if let Some(row) = values.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::NonFiniteValue {
            field: field.to_string(),
            row,
        });
    }

    let min: f64 = Statistics::min(values);
    let max: f64 = Statistics::max(values);
    let mean: f64 = Statistics::mean(values);
    let std: f64 = Statistics::population_std_dev(values);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (first_rank, third_rank) = quartiles.percentiles();

    Ok(ColumnStats {
        min,
        max,
        mean,
        median: median_sorted(&sorted),
        std,
        first: percentile_sorted(&sorted, first_rank),
        third: percentile_sorted(&sorted, third_rank),
    })
}

/// Percentile `p` (in `[0, 100]`) of unsorted data using linear interpolation.
///
/// # Errors
/// * `EmptyInput` for empty data
/// * `InvalidConfig` when `p` lies outside `[0, 100]`
pub fn percentile(values: &[f64], p: f64) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput { field: "values" });
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(StatsError::InvalidConfig(format!(
            "percentile must be in [0, 100], got {p}"
        )));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(percentile_sorted(&sorted, p))
}

/// Percentile of already sorted, non-empty data.
///
/// Rank `h = (n - 1) * p / 100`; the result interpolates between
/// `sorted[floor(h)]` and `sorted[ceil(h)]`.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * (p / 100.0);
    let lower = h.floor() as usize;
    let upper = (h.ceil() as usize).min(n - 1);
    let t = h - lower as f64;

    lerp(sorted[lower], sorted[upper], t)
}

/// Linear interpolation that is exact at both ends
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Median of already sorted, non-empty data
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Round to `decimals` places, nearest decimal with ties to even.
///
/// Goes through the exact decimal formatting of the float so that e.g.
/// `2.675` (stored as 2.67499999...) rounds to `2.67`. Scale-and-rint
/// rounding can differ from this in the last digit for such values.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = format!("{:.*}", decimals as usize, value)
        .parse::<f64>()
        .unwrap_or(value);
    // "-0.00" parses to -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl ColumnStats {
    /// Copy with every field rounded to `decimals` places
    pub fn rounded(&self, decimals: u32) -> ColumnStats {
        ColumnStats {
            min: round_to(self.min, decimals),
            max: round_to(self.max, decimals),
            mean: round_to(self.mean, decimals),
            median: round_to(self.median, decimals),
            std: round_to(self.std, decimals),
            first: round_to(self.first, decimals),
            third: round_to(self.third, decimals),
        }
    }
}
