use std::collections::{BTreeSet, HashMap};

use crate::models::Category;

/// Canonical merchant name → category. `None` entries are known merchants
/// that deliberately stay uncategorized.
const BUILTIN: &[(&str, Option<Category>)] = &[
    ("Youtube Premium", Some(Category::Shopping)),
    ("Star Discount Chemist", Some(Category::Health)),
    ("Fortune Paradise", Some(Category::Restaurant)),
    ("Unisuper Voluntary Contribution", Some(Category::Investment)),
    ("Caltex", Some(Category::Fuel)),
    ("Usyd Salary", Some(Category::Income)),
    ("Xiangyao Asian Supermarket", Some(Category::Groceries)),
    ("Sydney Motorcycle Wizard", Some(Category::Motorbike)),
    ("Decathlon", Some(Category::Sports)),
    ("Macquarie Oral and Maxillofacial", Some(Category::Health)),
    ("Opal Card", Some(Category::PublicTransport)),
    ("Beem", None),
    ("Duoway Restaurant", Some(Category::Restaurant)),
    ("Usyd Union", Some(Category::Restaurant)),
    ("7-Eleven", Some(Category::Fuel)),
    ("Woolworths", Some(Category::Groceries)),
    ("Coles", Some(Category::Groceries)),
    ("EG Group", Some(Category::Fuel)),
    ("Cash Deposit", None),
    ("Mobil", Some(Category::Fuel)),
    ("Speedway", Some(Category::Fuel)),
    ("Rent", Some(Category::Rent)),
    ("St Peters Fruitworld", Some(Category::Groceries)),
    ("BWS", Some(Category::Shopping)),
    ("Pharmacy 4 Less", Some(Category::Health)),
    ("Ikea", Some(Category::Shopping)),
    ("Youtube Music", Some(Category::Shopping)),
    ("Amazon Marketplace", Some(Category::Shopping)),
    ("Aldi", Some(Category::Groceries)),
    ("Kmart", Some(Category::Shopping)),
    ("Bikebiz", Some(Category::Motorbike)),
    ("Big W", Some(Category::Shopping)),
    ("JB Hi Fi", Some(Category::Shopping)),
    ("Tonyon", Some(Category::Groceries)),
    ("AMX", Some(Category::Motorbike)),
    ("BP", Some(Category::Fuel)),
    ("Metro Petroleum", Some(Category::Fuel)),
    ("Bunnings", Some(Category::Shopping)),
    ("Apex", Some(Category::Fuel)),
    ("Live Group", Some(Category::Groceries)),
    ("Priceline Pharmacy", Some(Category::Health)),
    ("Ampol", Some(Category::Fuel)),
    ("Paypal", Some(Category::Shopping)),
    ("Youth Allowance", Some(Category::Income)),
    ("Usyd Scholarship", Some(Category::Income)),
    ("Medicare Rebate", Some(Category::Health)),
    ("Ebay", Some(Category::Shopping)),
    ("ISG Salary", Some(Category::Income)),
    ("Hmart", Some(Category::Groceries)),
    ("Aliexpress", Some(Category::Shopping)),
];

pub(crate) struct CategoryMap {
    map: HashMap<String, Option<Category>>,
}

impl CategoryMap {
    pub(crate) fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<Category>)>,
        S: Into<String>,
    {
        Self {
            map: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub(crate) fn builtin() -> Self {
        Self::new(BUILTIN.iter().copied())
    }

    /// Category for a canonical display name. Unknown names are uncategorized.
    pub(crate) fn resolve(&self, display_name: &str) -> Option<Category> {
        self.map.get(display_name).copied().flatten()
    }

    /// Categories some merchant maps onto.
    pub(crate) fn categories(&self) -> BTreeSet<Category> {
        self.map.values().filter_map(|c| *c).collect()
    }
}
