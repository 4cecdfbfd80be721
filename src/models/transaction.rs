use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;

/// One statement row after description cleanup.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Date the bank says the money actually moved, when it differs.
    pub value_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub balance: Decimal,
    pub location: Option<String>,
    /// Canonical merchant name, also the key into the description table.
    pub description: String,
    pub description_original: String,
    pub import_hash: String,
}

impl Transaction {
    /// The day this transaction counts towards in a daily series.
    pub fn effective_date(&self) -> NaiveDate {
        self.value_date.unwrap_or(self.date)
    }
}

/// A canonical merchant name and what the rules made of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub id: String,
    /// False when the name is a title-cased fallback rather than a known rule.
    pub processed: bool,
    pub category: Option<Category>,
}
