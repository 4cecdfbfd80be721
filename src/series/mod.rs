//! Dense daily series from sparse per-day totals, and two smoothing kernels.
//!
//! Both kernels deliberately keep their boundary behaviour: the box filter
//! divides by the full window width even when part of the window falls off
//! the series, and the mollifier weights out-of-range days as literal zeros.
//! Outputs near either end are therefore pulled towards zero.

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DailyAmount<A = Decimal> {
    pub(crate) date: NaiveDate,
    pub(crate) amount: A,
}

impl<A> DailyAmount<A> {
    pub(crate) fn new(date: NaiveDate, amount: A) -> Self {
        Self { date, amount }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum SeriesError {
    #[error("Daily totals out of order: {date} is not after {cursor}")]
    Unordered { date: NaiveDate, cursor: NaiveDate },

    #[error("Daily total for {date} falls outside {start}..={end}")]
    OutOfRange {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Smoothing window must not be negative (got {0})")]
    InvalidWindow(i64),
}

/// Fill every day from `start` to `end` inclusive, taking amounts from
/// `sparse` where present and zero elsewhere.
///
/// `sparse` must be strictly increasing by date and lie within the bounds.
pub(crate) fn reconstruct(
    sparse: &[DailyAmount],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyAmount>, SeriesError> {
    let mut dense = Vec::new();
    let mut next = sparse.iter().peekable();
    let mut cursor = start;

    while cursor <= end {
        match next.peek() {
            Some(entry) if entry.date == cursor => {
                dense.push(**entry);
                next.next();
            }
            Some(entry) if entry.date < cursor => {
                return Err(if entry.date < start {
                    SeriesError::OutOfRange {
                        date: entry.date,
                        start,
                        end,
                    }
                } else {
                    SeriesError::Unordered {
                        date: entry.date,
                        cursor,
                    }
                });
            }
            _ => dense.push(DailyAmount::new(cursor, Decimal::ZERO)),
        }
        cursor = match cursor.checked_add_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }

    if let Some(entry) = next.next() {
        return Err(SeriesError::OutOfRange {
            date: entry.date,
            start,
            end,
        });
    }

    Ok(dense)
}

/// [`reconstruct`] with missing bounds taken from the first and last entry.
pub(crate) fn daily_series(
    sparse: &[DailyAmount],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<DailyAmount>, SeriesError> {
    let start = start.or_else(|| sparse.first().map(|e| e.date));
    let end = end.or_else(|| sparse.last().map(|e| e.date));
    match (start, end) {
        (Some(start), Some(end)) => reconstruct(sparse, start, end),
        _ => Ok(Vec::new()),
    }
}

/// Box filter of half-width `window`.
///
/// Each day scatters `amount / (2w + 1)` onto every day within `w` of it.
/// Contributions that would land outside the series are dropped.
pub(crate) fn moving_average(
    series: &[DailyAmount],
    window: i64,
) -> Result<Vec<DailyAmount<f64>>, SeriesError> {
    let w = half_width(window)?;
    let amounts = as_f64(series);
    let n = amounts.len();
    let divisor = (2 * w + 1) as f64;

    let mut averaged = vec![0.0; n];
    for (i, amount) in amounts.iter().enumerate() {
        let share = amount / divisor;
        let lo = i.saturating_sub(w);
        let hi = (i + w).min(n.saturating_sub(1));
        for slot in &mut averaged[lo..=hi] {
            *slot += share;
        }
    }

    Ok(zip_dates(series, averaged))
}

/// Mollifier smoothing of half-width `window`.
///
/// Every output is a bump-weighted average over exactly `2w + 1` days
/// centred on it; days before the first or after the last entry count as
/// zero but still take their weight.
pub(crate) fn mollify(
    series: &[DailyAmount],
    window: i64,
) -> Result<Vec<DailyAmount<f64>>, SeriesError> {
    let w = half_width(window)?;
    let amounts = as_f64(series);
    let n = amounts.len();

    let weights = bump_weights(2 * w + 1);
    let total: f64 = weights.iter().sum();

    let smoothed = (0..n)
        .map(|i| {
            // window position k covers day i - w + k
            let samples = (0..weights.len()).map(|k| {
                (i + k)
                    .checked_sub(w)
                    .and_then(|j| amounts.get(j))
                    .copied()
                    .unwrap_or(0.0)
            });
            weighted_average(samples, &weights, total)
        })
        .collect();

    Ok(zip_dates(series, smoothed))
}

/// Bump-weighted average of one window, its samples spread evenly over
/// `[-1, 1]`.
///
/// A constant window averages to that constant, except with exactly two
/// samples: both sit on the endpoints, where the kernel is zero, and the
/// result is 0. `mollify` only builds odd-length windows.
pub(crate) fn bump_average(window: &[f64]) -> f64 {
    let weights = bump_weights(window.len());
    let total: f64 = weights.iter().sum();
    weighted_average(window.iter().copied(), &weights, total)
}

fn weighted_average(samples: impl Iterator<Item = f64>, weights: &[f64], total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    samples.zip(weights).map(|(x, w)| x * w).sum::<f64>() / total
}

/// `exp(-1 / (1 - y²))` on `(-1, 1)`, zero outside.
pub(crate) fn bump(y: f64) -> f64 {
    if y.abs() >= 1.0 {
        0.0
    } else {
        (-1.0 / (1.0 - y * y)).exp()
    }
}

/// Kernel weights for `n` positions evenly spaced on `[-1, 1]`,
/// endpoints included. A single position sits at the centre.
fn bump_weights(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![bump(0.0)],
        _ => {
            let step = 2.0 / (n - 1) as f64;
            (0..n).map(|k| bump(-1.0 + step * k as f64)).collect()
        }
    }
}

fn half_width(window: i64) -> Result<usize, SeriesError> {
    usize::try_from(window).map_err(|_| SeriesError::InvalidWindow(window))
}

fn as_f64(series: &[DailyAmount]) -> Vec<f64> {
    series
        .iter()
        .map(|e| e.amount.to_f64().unwrap_or_default())
        .collect()
}

fn zip_dates(series: &[DailyAmount], amounts: Vec<f64>) -> Vec<DailyAmount<f64>> {
    series
        .iter()
        .zip(amounts)
        .map(|(e, amount)| DailyAmount::new(e.date, amount))
        .collect()
}

/// How a queried series is smoothed before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Smoothing {
    #[default]
    None,
    Averaged,
    Smoothed,
}

impl Smoothing {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Averaged => "averaged",
            Self::Smoothed => "smoothed",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "raw" => Some(Self::None),
            "averaged" | "average" | "box" => Some(Self::Averaged),
            "smoothed" | "smooth" | "mollify" => Some(Self::Smoothed),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Smoothing] {
        &[Self::None, Self::Averaged, Self::Smoothed]
    }

    pub(crate) fn apply(
        &self,
        series: &[DailyAmount],
        window: i64,
    ) -> Result<Vec<DailyAmount<f64>>, SeriesError> {
        match self {
            Self::None => Ok(zip_dates(series, as_f64(series))),
            Self::Averaged => moving_average(series, window),
            Self::Smoothed => mollify(series, window),
        }
    }
}

impl std::fmt::Display for Smoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
