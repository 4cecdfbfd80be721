use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::check_window;
use crate::db::Database;
use crate::models::Category;
use crate::series::{daily_series, DailyAmount, Smoothing};

/// One request for a daily series, as the command line and chart ask it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeriesQuery {
    pub(crate) category: Option<String>,
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
    pub(crate) smoothing: Smoothing,
    pub(crate) window: i64,
}

impl SeriesQuery {
    pub(crate) fn from_args(args: &[String], default_window: i64) -> Result<Self> {
        let category = flag_value(args, "--category")?.map(|c| {
            Category::parse(c)
                .map(|cat| cat.as_str().to_string())
                .unwrap_or_else(|| c.trim().to_lowercase())
        });
        let start = flag_value(args, "--from")?.map(parse_day).transpose()?;
        let end = flag_value(args, "--to")?.map(parse_day).transpose()?;
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                anyhow::bail!("--from {s} is after --to {e}");
            }
        }

        let smoothing = match flag_value(args, "--smoothing")? {
            Some(s) => Smoothing::parse(s).ok_or_else(|| {
                let known: Vec<&str> = Smoothing::all().iter().map(|s| s.as_str()).collect();
                anyhow::anyhow!("Unknown smoothing '{s}' (expected one of: {})", known.join(", "))
            })?,
            None => Smoothing::None,
        };
        let window = match flag_value(args, "--window")? {
            Some(w) => {
                let window: i64 = w
                    .parse()
                    .with_context(|| format!("--window must be a whole number, got '{w}'"))?;
                check_window(window, "--window")?
            }
            None => default_window,
        };

        Ok(Self {
            category,
            start,
            end,
            smoothing,
            window,
        })
    }

    /// Reject a category the store does not know.
    pub(crate) fn validate(&self, categories: &[String]) -> Result<()> {
        if let Some(c) = &self.category {
            if !categories.contains(c) {
                anyhow::bail!(
                    "Unknown category '{c}' (known: {})",
                    categories.join(", ")
                );
            }
        }
        Ok(())
    }

    pub(crate) fn run(&self, db: &Database) -> Result<Vec<DailyAmount<f64>>> {
        let sparse = db.get_daily_amounts(self.category.as_deref(), self.start, self.end)?;
        let dense = daily_series(&sparse, self.start, self.end)?;
        let series = self.smoothing.apply(&dense, self.window)?;
        tracing::info!(
            category = self.category.as_deref().unwrap_or("all"),
            days = series.len(),
            smoothing = %self.smoothing,
            window = self.window,
            "Built daily series"
        );
        Ok(series)
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == name) {
        Some(i) => match args.get(i + 1) {
            Some(v) if !v.starts_with("--") => Ok(Some(v.as_str())),
            _ => anyhow::bail!("{name} needs a value"),
        },
        None => Ok(None),
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
