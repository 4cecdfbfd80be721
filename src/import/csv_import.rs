use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

const DATE_FORMAT: &str = "%d/%m/%Y";
const VALUE_DATE_MARKER: &str = "Value Date: ";
const CARD_MARKER: &str = "Card xx";

/// Column positions of a bank statement export.
#[derive(Debug, Clone)]
pub(crate) struct StatementLayout {
    pub(crate) date_column: usize,
    pub(crate) amount_column: usize,
    pub(crate) description_column: usize,
    pub(crate) balance_column: usize,
    pub(crate) date_format: String,
    pub(crate) has_header: bool,
}

impl Default for StatementLayout {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 1,
            description_column: 2,
            balance_column: 3,
            date_format: DATE_FORMAT.into(),
            has_header: false,
        }
    }
}

/// One parsed statement line, description still raw.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatementRow {
    /// 1-based line in the source file.
    pub(crate) line: usize,
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) balance: Decimal,
}

pub(crate) struct StatementImporter;

impl StatementImporter {
    pub(crate) fn read(path: &Path, layout: &StatementLayout) -> Result<Vec<StatementRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(layout.has_header)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let line = i + 1 + usize::from(layout.has_header);
            let record = result.with_context(|| format!("Row {line}: failed to read CSV record"))?;
            let fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if fields.iter().all(|f| f.trim().is_empty()) {
                tracing::debug!(line, "Skipping blank statement row");
                continue;
            }
            rows.push(Self::parse_row(line, &fields, layout)?);
        }
        Ok(rows)
    }

    pub(crate) fn parse_row(
        line: usize,
        fields: &[String],
        layout: &StatementLayout,
    ) -> Result<StatementRow> {
        let field = |col: usize| fields.get(col).map(|s| s.trim()).unwrap_or("");

        let date_str = field(layout.date_column);
        let date = parse_date(date_str, &layout.date_format)
            .with_context(|| format!("Row {line}: failed to parse date '{date_str}'"))?;
        let amount = parse_decimal(field(layout.amount_column))
            .with_context(|| format!("Row {line}: failed to parse amount"))?;
        let balance = parse_decimal(field(layout.balance_column))
            .with_context(|| format!("Row {line}: failed to parse balance"))?;

        Ok(StatementRow {
            line,
            date,
            amount,
            description: field(layout.description_column).to_string(),
            balance,
        })
    }
}

/// Cut a raw description down to merchant text: the value date marker
/// and everything after it is split off, as is a card number suffix.
pub(crate) fn split_description(raw: &str) -> Result<(String, Option<NaiveDate>)> {
    let (text, value_date) = match raw.split_once(VALUE_DATE_MARKER) {
        Some((text, date)) => {
            let date = date.trim();
            let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
                .with_context(|| format!("Invalid value date '{date}'"))?;
            (text, Some(parsed))
        }
        None => (raw, None),
    };
    let text = text.split(CARD_MARKER).next().unwrap_or("");
    Ok((text.trim().to_string(), value_date))
}

fn parse_date(s: &str, fmt: &str) -> Result<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Ok(d);
    }
    for fallback in &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d/%m/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .replace('"', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).context(format!("Failed to parse '{}' as decimal", s))
}

/// Stable hash of the fields that identify a statement line, so
/// re-importing an overlapping export skips lines already stored.
pub(crate) fn compute_hash(
    date: NaiveDate,
    amount: &Decimal,
    balance: &Decimal,
    description: &str,
) -> String {
    let input = format!("{date}|{amount}|{balance}|{description}");
    let hash = fnv1a(input.as_bytes());
    format!("{hash:016x}")
}

fn fnv1a(data: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
