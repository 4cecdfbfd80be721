mod csv_import;
mod pipeline;

pub(crate) use csv_import::{split_description, StatementImporter, StatementLayout};
pub(crate) use pipeline::{ImportedRow, Pipeline};
