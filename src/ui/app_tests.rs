#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;

fn app() -> App {
    let query = SeriesQuery {
        category: None,
        start: None,
        end: None,
        smoothing: Smoothing::None,
        window: 1,
    };
    App::new(query, vec!["fuel".into(), "groceries".into()])
}

fn day(d: u32, amount: f64) -> DailyAmount<f64> {
    DailyAmount::new(NaiveDate::from_ymd_opt(2023, 5, d).unwrap(), amount)
}

#[test]
fn test_cycle_smoothing_wraps() {
    let mut app = app();
    app.cycle_smoothing();
    assert_eq!(app.query.smoothing, Smoothing::Averaged);
    app.cycle_smoothing();
    assert_eq!(app.query.smoothing, Smoothing::Smoothed);
    app.cycle_smoothing();
    assert_eq!(app.query.smoothing, Smoothing::None);
}

#[test]
fn test_window_clamped() {
    let mut app = app();
    app.narrow_window();
    app.narrow_window();
    assert_eq!(app.query.window, 0);
    app.query.window = MAX_WINDOW;
    app.widen_window();
    assert_eq!(app.query.window, MAX_WINDOW);
}

#[test]
fn test_cycle_category_returns_to_all() {
    let mut app = app();
    assert_eq!(app.category_label(), "all categories");
    app.cycle_category();
    assert_eq!(app.category_label(), "fuel");
    app.cycle_category();
    assert_eq!(app.category_label(), "groceries");
    app.cycle_category();
    assert_eq!(app.query.category, None);
}

#[test]
fn test_cycle_category_unknown_resets() {
    let mut app = app();
    app.query.category = Some("rent".into());
    app.cycle_category();
    assert_eq!(app.query.category, None);
}

#[test]
fn test_points_and_bounds() {
    let mut app = app();
    app.series = vec![day(1, -5.0), day(2, 0.0), day(3, 12.5)];
    assert_eq!(app.points(), vec![(0.0, -5.0), (1.0, 0.0), (2.0, 12.5)]);
    assert_eq!(app.x_bounds(), [0.0, 2.0]);
    assert_eq!(app.y_bounds(), [-5.0, 12.5]);
}

#[test]
fn test_bounds_never_degenerate() {
    let mut app = app();
    assert_eq!(app.x_bounds(), [0.0, 1.0]);
    assert_eq!(app.y_bounds(), [-1.0, 1.0]);
    app.series = vec![day(1, -4.0)];
    assert_eq!(app.y_bounds(), [-4.0, 0.0]);
}

#[test]
fn test_refresh_sets_status() {
    let db = crate::db::Database::open_in_memory().unwrap();
    let mut app = app();
    app.refresh(&db).unwrap();
    assert!(app.series.is_empty());
    assert!(app.status_message.starts_with("0 days"));
}
