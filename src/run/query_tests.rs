#![allow(clippy::unwrap_used)]

use super::*;
use crate::import::ImportedRow;
use crate::models::{Description, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn row(date: NaiveDate, amount: Decimal, name: &str, category: Category) -> ImportedRow {
    ImportedRow {
        transaction: Transaction {
            date,
            value_date: None,
            amount,
            balance: Decimal::ZERO,
            location: None,
            description: name.to_string(),
            description_original: format!("{name} {date}"),
            import_hash: format!("{name}{date}"),
        },
        description: Description {
            id: name.to_string(),
            processed: true,
            category: Some(category),
        },
    }
}

fn db() -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_rows(&[
        row(ymd(2023, 3, 1), dec!(-30), "Coles", Category::Groceries),
        row(ymd(2023, 3, 4), dec!(-60), "Caltex", Category::Fuel),
        row(ymd(2023, 3, 5), dec!(-9), "Coles", Category::Groceries),
    ])
    .unwrap();
    db
}

// ── from_args ─────────────────────────────────────────────────

#[test]
fn test_from_args_defaults() {
    let q = SeriesQuery::from_args(&args("series"), 7).unwrap();
    assert_eq!(q.category, None);
    assert_eq!(q.start, None);
    assert_eq!(q.end, None);
    assert_eq!(q.smoothing, Smoothing::None);
    assert_eq!(q.window, 7);
}

#[test]
fn test_from_args_all_flags() {
    let q = SeriesQuery::from_args(
        &args("series --category grocery --from 2023-03-01 --to 2023-03-31 --smoothing smoothed --window 2"),
        7,
    )
    .unwrap();
    assert_eq!(q.category.as_deref(), Some("groceries"));
    assert_eq!(q.start, Some(ymd(2023, 3, 1)));
    assert_eq!(q.end, Some(ymd(2023, 3, 31)));
    assert_eq!(q.smoothing, Smoothing::Smoothed);
    assert_eq!(q.window, 2);
}

#[test]
fn test_from_args_rejects_bad_input() {
    assert!(SeriesQuery::from_args(&args("series --from 03/01/2023"), 7).is_err());
    assert!(SeriesQuery::from_args(&args("series --smoothing gaussian"), 7).is_err());
    assert!(SeriesQuery::from_args(&args("series --window -1"), 7).is_err());
    assert!(SeriesQuery::from_args(&args("series --window"), 7).is_err());
    assert!(SeriesQuery::from_args(&args("series --from 2023-03-05 --to 2023-03-01"), 7).is_err());
}

#[test]
fn test_from_args_window_limit() {
    let q = SeriesQuery::from_args(&args("series --smoothing smoothed --window 90"), 7).unwrap();
    assert_eq!(q.window, 90);
    let err = SeriesQuery::from_args(&args("series --smoothing smoothed --window 1000000000"), 7)
        .err()
        .unwrap();
    assert!(err.to_string().contains("--window must be at most 90"));
}

// ── validate ──────────────────────────────────────────────────

#[test]
fn test_validate_category() {
    let known = vec!["fuel".to_string(), "groceries".to_string()];
    let q = SeriesQuery::from_args(&args("series --category fuel"), 0).unwrap();
    assert!(q.validate(&known).is_ok());
    let q = SeriesQuery::from_args(&args("series --category takeaway"), 0).unwrap();
    let err = q.validate(&known).err().unwrap();
    assert!(err.to_string().contains("Unknown category 'takeaway'"));
}

// ── run ───────────────────────────────────────────────────────

#[test]
fn test_run_raw_series_is_dense() {
    let q = SeriesQuery::from_args(&args("series"), 0).unwrap();
    let series = q.run(&db()).unwrap();
    let amounts: Vec<f64> = series.iter().map(|d| d.amount).collect();
    assert_eq!(amounts, vec![-30.0, 0.0, 0.0, -60.0, -9.0]);
    assert_eq!(series[0].date, ymd(2023, 3, 1));
}

#[test]
fn test_run_category_and_bounds() {
    let q = SeriesQuery::from_args(
        &args("series --category groceries --from 2023-02-27 --to 2023-03-06"),
        0,
    )
    .unwrap();
    let series = q.run(&db()).unwrap();
    assert_eq!(series.len(), 8);
    assert_eq!(series[0].amount, 0.0);
    assert_eq!(series[2].amount, -30.0);
    assert_eq!(series[6].amount, -9.0);
    assert_eq!(series[7].amount, 0.0);
}

#[test]
fn test_run_averaged() {
    let q = SeriesQuery::from_args(&args("series --smoothing averaged --window 1"), 0).unwrap();
    let series = q.run(&db()).unwrap();
    assert_eq!(series.len(), 5);
    assert!((series[0].amount - (-10.0)).abs() < 1e-9);
    assert!((series[4].amount - (-23.0)).abs() < 1e-9);
}

#[test]
fn test_run_empty_store() {
    let db = Database::open_in_memory().unwrap();
    let q = SeriesQuery::from_args(&args("series --smoothing smoothed"), 3).unwrap();
    assert!(q.run(&db).unwrap().is_empty());
}
