use std::fmt;
use std::str::FromStr;

use super::model::Cell;
use super::numeric::NumericPolicy;

// ---------------------------------------------------------------------------
// Aggregates over a one-dimensional dataset
// ---------------------------------------------------------------------------
//
// Only strictly numeric cells take part. When none do, every aggregate is 0,
// which callers cannot tell apart from a genuine zero without checking the
// input themselves.

fn valid_values(dataset: &[Cell]) -> impl Iterator<Item = f64> + '_ {
    dataset
        .iter()
        .filter_map(|cell| NumericPolicy::Strict.coerce(cell))
}

/// Sum of the valid numbers.
pub fn find_total(dataset: &[Cell]) -> f64 {
    valid_values(dataset).sum()
}

/// Arithmetic mean of the valid numbers, `0` when there are none.
pub fn calculate_mean(dataset: &[Cell]) -> f64 {
    let (total, count) = valid_values(dataset).fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

/// Median of the valid numbers, `0` when there are none.
pub fn calculate_median(dataset: &[Cell]) -> f64 {
    let mut values: Vec<f64> = valid_values(dataset).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Aggregate selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Total,
    Mean,
    Median,
}

impl Aggregate {
    pub const ALL: [Aggregate; 3] = [Aggregate::Total, Aggregate::Mean, Aggregate::Median];

    pub fn apply(&self, dataset: &[Cell]) -> f64 {
        match self {
            Aggregate::Total => find_total(dataset),
            Aggregate::Mean => calculate_mean(dataset),
            Aggregate::Median => calculate_median(dataset),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Aggregate::Total => "total",
            Aggregate::Mean => "mean",
            Aggregate::Median => "median",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Aggregate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "total" | "sum" => Ok(Aggregate::Total),
            "mean" | "average" => Ok(Aggregate::Mean),
            "median" => Ok(Aggregate::Median),
            other => Err(format!("unknown aggregate: {other}")),
        }
    }
}
