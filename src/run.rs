mod cli;
mod query;
mod tui;

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::import::Pipeline;
use crate::location::{LocationExtractor, SuburbVocabulary};
use crate::normalize::{CategoryMap, Normalizer, RuleSet};

pub(crate) use cli::{as_cli, print_usage};
pub(crate) use query::SeriesQuery;

/// Build the ingestion pipeline. A missing gazetteer leaves locations
/// unextracted rather than failing the import.
pub(crate) fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let vocabulary = if config.gazetteer_path.exists() {
        SuburbVocabulary::load(&config.gazetteer_path)?
    } else {
        tracing::warn!(
            path = %config.gazetteer_path.display(),
            "Suburb gazetteer not found, locations will not be extracted"
        );
        SuburbVocabulary::empty()
    };

    let rules = RuleSet::builtin()?;
    tracing::debug!(
        suburbs = vocabulary.len(),
        rules = rules.len(),
        "Loaded normalization tables"
    );

    let extractor = LocationExtractor::new(Arc::new(vocabulary))?;
    let normalizer = Normalizer::new(Arc::new(rules));
    Ok(Pipeline::new(
        extractor,
        normalizer,
        Arc::new(CategoryMap::builtin()),
    ))
}
