pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS descriptions (
    id          TEXT PRIMARY KEY,
    processed   BOOLEAN NOT NULL DEFAULT 0,
    category_id TEXT REFERENCES categories(id)
);

CREATE TABLE IF NOT EXISTS transactions (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    date                  TEXT NOT NULL,
    value_date            TEXT,
    amount                TEXT NOT NULL,
    balance               TEXT NOT NULL,
    location              TEXT,
    description_id        TEXT NOT NULL REFERENCES descriptions(id),
    description_original  TEXT NOT NULL,
    import_hash           TEXT NOT NULL DEFAULT '',
    UNIQUE(date, amount, balance, description_original)
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_description ON transactions(description_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_transactions_hash_unique ON transactions(import_hash) WHERE import_hash != '';
CREATE INDEX IF NOT EXISTS idx_descriptions_category ON descriptions(category_id);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
