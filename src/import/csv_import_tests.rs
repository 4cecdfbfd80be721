#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fields(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_signed() {
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
    assert_eq!(parse_decimal("+2500.00").unwrap(), dec!(2500.00));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty() {
    assert_eq!(parse_decimal("  ").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("twelve").is_err());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_statement_format() {
    assert_eq!(parse_date("03/02/2023", DATE_FORMAT).unwrap(), ymd(2023, 2, 3));
}

#[test]
fn test_parse_date_fallback_iso() {
    assert_eq!(parse_date("2023-02-03", DATE_FORMAT).unwrap(), ymd(2023, 2, 3));
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("31/02/2023", DATE_FORMAT).is_err());
    assert!(parse_date("", DATE_FORMAT).is_err());
}

// ── split_description ─────────────────────────────────────────

#[test]
fn test_split_description_value_date() {
    let (text, value_date) =
        split_description("7-ELEVEN 2214 CRONULLA NS AUS Value Date: 28/01/2023").unwrap();
    assert_eq!(text, "7-ELEVEN 2214 CRONULLA NS AUS");
    assert_eq!(value_date, Some(ymd(2023, 1, 28)));
}

#[test]
fn test_split_description_card_suffix() {
    let (text, value_date) =
        split_description("WOOLWORTHS 1234 ULTIMO NS AUS Card xx1234 Value Date: 01/02/2023")
            .unwrap();
    assert_eq!(text, "WOOLWORTHS 1234 ULTIMO NS AUS");
    assert_eq!(value_date, Some(ymd(2023, 2, 1)));
}

#[test]
fn test_split_description_card_without_value_date() {
    let (text, value_date) = split_description("COLES 0456 EPPING Card xx9876").unwrap();
    assert_eq!(text, "COLES 0456 EPPING");
    assert_eq!(value_date, None);
}

#[test]
fn test_split_description_plain() {
    let (text, value_date) = split_description("  Salary ACME PTY LTD  ").unwrap();
    assert_eq!(text, "Salary ACME PTY LTD");
    assert_eq!(value_date, None);
}

#[test]
fn test_split_description_bad_value_date() {
    let err = split_description("SHOP Value Date: 2023-13-45").err().unwrap();
    assert!(err.to_string().contains("Invalid value date"));
}

#[test]
fn test_split_description_only_card() {
    let (text, _) = split_description("Card xx1111").unwrap();
    assert_eq!(text, "");
}

// ── parse_row ─────────────────────────────────────────────────

#[test]
fn test_parse_row_default_layout() {
    let row = StatementImporter::parse_row(
        4,
        &fields(&["05/03/2023", "-12.40", "OPAL TRANSPORT SYDNEY", "+1032.17"]),
        &StatementLayout::default(),
    )
    .unwrap();
    assert_eq!(row.line, 4);
    assert_eq!(row.date, ymd(2023, 3, 5));
    assert_eq!(row.amount, dec!(-12.40));
    assert_eq!(row.description, "OPAL TRANSPORT SYDNEY");
    assert_eq!(row.balance, dec!(1032.17));
}

#[test]
fn test_parse_row_bad_amount_names_line() {
    let err = StatementImporter::parse_row(
        9,
        &fields(&["05/03/2023", "abc", "SHOP", "0"]),
        &StatementLayout::default(),
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("Row 9"));
}

#[test]
fn test_parse_row_missing_columns() {
    let row = StatementImporter::parse_row(
        1,
        &fields(&["05/03/2023", "-1.00"]),
        &StatementLayout::default(),
    )
    .unwrap();
    assert_eq!(row.description, "");
    assert_eq!(row.balance, Decimal::ZERO);
}

// ── read ──────────────────────────────────────────────────────

#[test]
fn test_read_statement() {
    let file = make_csv_file(
        "27/01/2023,-5.50,\"7-ELEVEN 2214 CRONULLA NS AUS Card xx1234 Value Date: 25/01/2023\",+994.50\n\
         28/01/2023,+2500.00,\"Salary ACME PTY LTD\",+3494.50\n",
    );
    let rows = StatementImporter::read(file.path(), &StatementLayout::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 1);
    assert_eq!(rows[0].amount, dec!(-5.50));
    assert!(rows[0].description.contains("Value Date"));
    assert_eq!(rows[1].line, 2);
    assert_eq!(rows[1].balance, dec!(3494.50));
}

#[test]
fn test_read_skips_blank_rows() {
    let file = make_csv_file("27/01/2023,-5.50,SHOP,+994.50\n,,,\n28/01/2023,-1.00,SHOP,+993.50\n");
    let rows = StatementImporter::read(file.path(), &StatementLayout::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].line, 3);
}

/// Collects formatted log output so tests can assert on it.
#[derive(Clone, Default)]
struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_read_logs_skipped_blank_rows() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    let file = make_csv_file("27/01/2023,-5.50,SHOP,+994.50\n , ,,\n");
    let rows = tracing::subscriber::with_default(subscriber, || {
        StatementImporter::read(file.path(), &StatementLayout::default()).unwrap()
    });
    assert_eq!(rows.len(), 1);

    let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("Skipping blank statement row"));
    assert!(logged.contains("line=2"));
}

#[test]
fn test_read_with_header() {
    let file = make_csv_file("Date,Amount,Description,Balance\n27/01/2023,-5.50,SHOP,+994.50\n");
    let layout = StatementLayout {
        has_header: true,
        ..StatementLayout::default()
    };
    let rows = StatementImporter::read(file.path(), &layout).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, 2);
}

#[test]
fn test_read_bad_date_reports_row() {
    let file = make_csv_file("27/01/2023,-5.50,SHOP,+994.50\nyesterday,-1.00,SHOP,+993.50\n");
    let err = StatementImporter::read(file.path(), &StatementLayout::default())
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("Row 2"));
}

#[test]
fn test_read_missing_file() {
    let path = std::path::Path::new("/nonexistent/statement.csv");
    let err = StatementImporter::read(path, &StatementLayout::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("Failed to open CSV file"));
}

// ── compute_hash ──────────────────────────────────────────────

#[test]
fn test_compute_hash_stable() {
    let a = compute_hash(ymd(2023, 1, 27), &dec!(-5.50), &dec!(994.50), "SHOP");
    let b = compute_hash(ymd(2023, 1, 27), &dec!(-5.50), &dec!(994.50), "SHOP");
    assert_eq!(a, b);
    assert_eq!(a.len(), 16);
}

#[test]
fn test_compute_hash_distinguishes_fields() {
    let base = compute_hash(ymd(2023, 1, 27), &dec!(-5.50), &dec!(994.50), "SHOP");
    assert_ne!(
        base,
        compute_hash(ymd(2023, 1, 28), &dec!(-5.50), &dec!(994.50), "SHOP")
    );
    assert_ne!(
        base,
        compute_hash(ymd(2023, 1, 27), &dec!(-5.50), &dec!(989.00), "SHOP")
    );
    assert_ne!(
        base,
        compute_hash(ymd(2023, 1, 27), &dec!(-5.50), &dec!(994.50), "SHOP 2")
    );
}
