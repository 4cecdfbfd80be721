mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::import::ImportedRow;
use crate::models::Category;
use crate::series::DailyAmount;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_categories()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "Created database schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(from = current, to = schema::CURRENT_VERSION, "Migrated database");
        }

        Ok(())
    }

    /// Categories are fixed in code; new ones appear on the next open.
    fn seed_categories(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for category in Category::all() {
            tx.execute(
                "INSERT OR IGNORE INTO categories (id) VALUES (?1)",
                params![category.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Ingestion ─────────────────────────────────────────────

    /// Store imported rows in one transaction. Descriptions already known
    /// keep their stored category; rows already present are skipped.
    /// Returns how many transactions were inserted.
    pub(crate) fn insert_rows(&mut self, rows: &[ImportedRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut count = 0;
        for row in rows {
            let desc = &row.description;
            tx.execute(
                "INSERT OR IGNORE INTO descriptions (id, processed, category_id) VALUES (?1, ?2, ?3)",
                params![desc.id, desc.processed, desc.category.map(|c| c.as_str())],
            )?;

            let txn = &row.transaction;
            if !txn.import_hash.is_empty() {
                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM transactions WHERE import_hash = ?1)",
                    params![txn.import_hash],
                    |row| row.get(0),
                )?;
                if exists {
                    continue;
                }
            }
            count += tx.execute(
                "INSERT OR IGNORE INTO transactions (date, value_date, amount, balance, location, description_id, description_original, import_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    format_date(txn.date),
                    txn.value_date.map(format_date),
                    txn.amount.to_string(),
                    txn.balance.to_string(),
                    txn.location,
                    txn.description,
                    txn.description_original,
                    txn.import_hash,
                ],
            )?;
        }
        tx.commit()?;
        Ok(count)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Names the rules fell through on, busiest first.
    pub(crate) fn get_unmatched_descriptions(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT d.id, COUNT(t.id)
             FROM descriptions d
             LEFT JOIN transactions t ON t.description_id = d.id
             WHERE d.processed = 0
             GROUP BY d.id
             ORDER BY COUNT(t.id) DESC, d.id ASC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Series ────────────────────────────────────────────────

    /// Signed total per effective day (value date when present), ascending.
    /// Days with no transactions are absent.
    pub(crate) fn get_daily_amounts(
        &self,
        category: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyAmount>> {
        let mut sql = String::from(
            "SELECT COALESCE(t.value_date, t.date) AS day, t.amount
             FROM transactions t
             JOIN descriptions d ON t.description_id = d.id
             WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(c) = category {
            sql.push_str(&format!(" AND d.category_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(c.to_string()));
        }
        if let Some(s) = start {
            sql.push_str(&format!(" AND COALESCE(t.value_date, t.date) >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(format_date(s)));
        }
        if let Some(e) = end {
            sql.push_str(&format!(" AND COALESCE(t.value_date, t.date) <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(format_date(e)));
        }
        sql.push_str(" ORDER BY day ASC, t.id ASC");

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut totals: Vec<DailyAmount> = Vec::new();
        for (day, amount) in rows {
            let date = NaiveDate::parse_from_str(&day, DATE_FORMAT)
                .with_context(|| format!("Corrupt date in store: {day}"))?;
            let amount = Decimal::from_str(&amount)
                .with_context(|| format!("Corrupt amount in store: {amount}"))?;
            match totals.last_mut() {
                Some(last) if last.date == date => last.amount += amount,
                _ => totals.push(DailyAmount::new(date, amount)),
            }
        }
        Ok(totals)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
