use anyhow::Result;

use crate::config::MAX_WINDOW;
use crate::db::Database;
use crate::run::SeriesQuery;
use crate::series::{DailyAmount, Smoothing};

/// State behind the interactive series chart.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) query: SeriesQuery,
    /// Category ids the store knows; `None` in the query means all of them.
    pub(crate) categories: Vec<String>,
    pub(crate) series: Vec<DailyAmount<f64>>,
    pub(crate) status_message: String,
}

impl App {
    pub(crate) fn new(query: SeriesQuery, categories: Vec<String>) -> Self {
        Self {
            running: true,
            query,
            categories,
            series: Vec::new(),
            status_message: String::new(),
        }
    }

    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.series = self.query.run(db)?;
        self.status_message = format!(
            "{} days · {} · window {}",
            self.series.len(),
            self.query.smoothing,
            self.query.window
        );
        Ok(())
    }

    pub(crate) fn cycle_smoothing(&mut self) {
        let all = Smoothing::all();
        let idx = all
            .iter()
            .position(|s| *s == self.query.smoothing)
            .unwrap_or(0);
        self.query.smoothing = all[(idx + 1) % all.len()];
    }

    pub(crate) fn widen_window(&mut self) {
        self.query.window = (self.query.window + 1).min(MAX_WINDOW);
    }

    pub(crate) fn narrow_window(&mut self) {
        self.query.window = (self.query.window - 1).max(0);
    }

    /// All categories, then each known category in turn.
    pub(crate) fn cycle_category(&mut self) {
        let next = match &self.query.category {
            None => self.categories.first().cloned(),
            Some(current) => self
                .categories
                .iter()
                .position(|c| c == current)
                .and_then(|i| self.categories.get(i + 1))
                .cloned(),
        };
        self.query.category = next;
    }

    pub(crate) fn category_label(&self) -> &str {
        self.query.category.as_deref().unwrap_or("all categories")
    }

    /// Series as chart points, x counting days from the first entry.
    pub(crate) fn points(&self) -> Vec<(f64, f64)> {
        self.series
            .iter()
            .enumerate()
            .map(|(i, d)| (i as f64, d.amount))
            .collect()
    }

    /// Y range covering the series and zero, never degenerate.
    pub(crate) fn y_bounds(&self) -> [f64; 2] {
        let (lo, hi) = self
            .series
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), d| (lo.min(d.amount), hi.max(d.amount)));
        if lo == hi {
            [lo - 1.0, hi + 1.0]
        } else {
            [lo, hi]
        }
    }

    pub(crate) fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.series.len().saturating_sub(1).max(1) as f64]
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
