use anyhow::{Context, Result};
use std::sync::Arc;

use super::csv_import::{compute_hash, split_description, StatementRow};
use crate::location::LocationExtractor;
use crate::models::{Description, Transaction};
use crate::normalize::{CategoryMap, Normalizer};

/// A statement row after extraction, normalization and category lookup.
#[derive(Debug, Clone)]
pub(crate) struct ImportedRow {
    pub(crate) transaction: Transaction,
    pub(crate) description: Description,
}

/// What the pipeline made of a single description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Described {
    pub(crate) merchant_text: String,
    pub(crate) location: Option<String>,
    pub(crate) description: Description,
}

/// extract → normalize → resolve, run once per row at import time.
pub(crate) struct Pipeline {
    extractor: LocationExtractor,
    normalizer: Normalizer,
    categories: Arc<CategoryMap>,
}

impl Pipeline {
    pub(crate) fn new(
        extractor: LocationExtractor,
        normalizer: Normalizer,
        categories: Arc<CategoryMap>,
    ) -> Self {
        Self {
            extractor,
            normalizer,
            categories,
        }
    }

    /// `text` is the description with value date and card suffix removed.
    pub(crate) fn describe(&self, text: &str) -> Described {
        let (merchant_text, location) = self.extractor.extract(text);
        let (name, processed) = self.normalizer.normalize(&merchant_text);
        let category = self.categories.resolve(&name);
        Described {
            merchant_text,
            location,
            description: Description {
                id: name,
                processed,
                category,
            },
        }
    }

    pub(crate) fn process(&self, row: &StatementRow) -> Result<ImportedRow> {
        let (text, value_date) =
            split_description(&row.description).with_context(|| format!("Row {}", row.line))?;
        let described = self.describe(&text);

        let transaction = Transaction {
            date: row.date,
            value_date,
            amount: row.amount,
            balance: row.balance,
            location: described.location,
            description: described.description.id.clone(),
            description_original: row.description.clone(),
            import_hash: compute_hash(row.date, &row.amount, &row.balance, &row.description),
        };

        tracing::debug!(
            line = row.line,
            day = %transaction.effective_date(),
            name = %described.description.id,
            processed = described.description.processed,
            category = ?described.description.category,
            "Processed statement row"
        );

        Ok(ImportedRow {
            transaction,
            description: described.description,
        })
    }

    pub(crate) fn process_all(&self, rows: &[StatementRow]) -> Result<Vec<ImportedRow>> {
        rows.iter().map(|row| self.process(row)).collect()
    }
}
