use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// State abbreviations, full and truncated to two letters.
const STATE_TOKENS: &[&str] = &[
    "nsw", "ns", "vic", "vi", "qld", "ql", "act", "ac", "nt", "wa", "tas", "ta", "sa",
];

const COUNTRY_TOKENS: &[&str] = &["au", "aus", "us", "usa"];

const COMPASS_WORDS: &[&str] = &["north", "south", "east", "west"];

const MAX_TRUNCATION: usize = 5;

/// Gazetteer column holding the suburb name.
const SUBURB_COLUMN: &str = "Official Name Suburb";

/// A national gazetteer joins into an alternation of ~15k names, well past
/// the default compiled size limit.
const REGEX_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// Suburb names and the two alternations built from them.
///
/// Built once at startup and shared read-only between extractors.
pub(crate) struct SuburbVocabulary {
    names: Vec<String>,
    exact: Option<Regex>,
    truncated: Option<Regex>,
}

impl SuburbVocabulary {
    pub(crate) fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = names
            .into_iter()
            .map(|n| strip_qualifier(n.as_ref()).to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let mut names: Vec<String> = unique.into_iter().collect();
        sort_longest_first(&mut names);

        let lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        let exact = build_alternation(&lowered, "")?;

        let mut truncated: Vec<String> = names
            .iter()
            .flat_map(|n| truncations(n))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        sort_longest_first(&mut truncated);
        let truncated = build_alternation(&truncated, "$")?;

        tracing::debug!(suburbs = names.len(), "Built suburb vocabulary");

        Ok(Self {
            names,
            exact,
            truncated,
        })
    }

    /// Load a `;`-delimited gazetteer with an `Official Name Suburb` column.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open gazetteer: {}", path.display()))?;

        let column = rdr
            .headers()
            .context("Failed to read gazetteer header")?
            .iter()
            .position(|h| h.trim() == SUBURB_COLUMN)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Gazetteer {} has no '{SUBURB_COLUMN}' column",
                    path.display()
                )
            })?;

        let mut names = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Gazetteer row {}", i + 2))?;
            if let Some(name) = record.get(column) {
                names.push(name.to_string());
            }
        }

        Self::from_names(names)
    }

    pub(crate) fn empty() -> Self {
        Self {
            names: Vec::new(),
            exact: None,
            truncated: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}

/// Drop a trailing parenthetical qualifier, e.g. `"Epping (NSW)"` → `"Epping"`.
fn strip_qualifier(name: &str) -> &str {
    name.split(['(', ')']).next().unwrap_or("").trim()
}

fn sort_longest_first(names: &mut [String]) {
    names.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
}

/// Lower-cased prefixes of `name` with 1 to 5 characters cut off.
///
/// Stops at the first prefix that is 3 characters or shorter, ends on a
/// space, or is a bare compass word.
pub(crate) fn truncations(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut out = Vec::new();
    for cut in 1..=MAX_TRUNCATION.min(chars.len()) {
        let prefix: String = chars[..chars.len() - cut].iter().collect();
        let lower = prefix.to_lowercase();
        if prefix.chars().count() <= 3
            || prefix.ends_with(' ')
            || COMPASS_WORDS.contains(&lower.as_str())
        {
            break;
        }
        out.push(lower);
    }
    out
}

fn build_alternation(names: &[String], suffix: &str) -> Result<Option<Regex>> {
    if names.is_empty() {
        return Ok(None);
    }
    let body = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    let regex = RegexBuilder::new(&format!("(?:{body}){suffix}"))
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_SIZE_LIMIT)
        .build()
        .context("Failed to compile suburb alternation")?;
    Ok(Some(regex))
}

/// Splits a statement description into merchant text and a trailing
/// `<suburb> [state] [state] <country>` location.
pub(crate) struct LocationExtractor {
    vocabulary: Arc<SuburbVocabulary>,
    trailing: Regex,
    trailing_search: Regex,
}

impl LocationExtractor {
    pub(crate) fn new(vocabulary: Arc<SuburbVocabulary>) -> Result<Self> {
        let states = STATE_TOKENS.join("|");
        let countries = COUNTRY_TOKENS.join("|");
        let context = format!(
            r"\s*(?:{states})?\s*(?:{states})?\s*(?:{countries})?\s*(?:{countries})\s*$"
        );
        Ok(Self {
            vocabulary,
            trailing: Regex::new(&format!("^{context}"))?,
            trailing_search: Regex::new(&context)?,
        })
    }

    /// Returns `(description, None)` unchanged when no location is found.
    pub(crate) fn extract(&self, description: &str) -> (String, Option<String>) {
        let lower = lower_aligned(description);

        let start = self
            .find_suburb(&lower)
            .or_else(|| self.find_truncated_suburb(&lower));

        match start {
            Some(start) => {
                let core = description[..start].trim().to_string();
                let location = description[start..].trim().to_string();
                tracing::debug!(%description, %core, %location, "Extracted location");
                (core, Some(location))
            }
            None => (description.to_string(), None),
        }
    }

    /// Scan for a whole suburb name followed by state/country context.
    ///
    /// A candidate without that context is a false positive (a merchant name
    /// containing a suburb, or an overlap of two suburbs); the scan resumes
    /// right after it. Every candidate is non-empty, so the offset strictly
    /// advances.
    fn find_suburb(&self, lower: &str) -> Option<usize> {
        let exact = self.vocabulary.exact.as_ref()?;
        let mut offset = 0;
        loop {
            let m = exact.find(&lower[offset..])?;
            let start = offset + m.start();
            let end = offset + m.end();
            if self.trailing.is_match(&lower[end..]) {
                return Some(start);
            }
            tracing::trace!(candidate = &lower[start..end], "Skipping suburb without context");
            offset = end;
        }
    }

    /// Statements truncate long suburb names, so look for state/country
    /// context first and then for a cut-off suburb right before it.
    fn find_truncated_suburb(&self, lower: &str) -> Option<usize> {
        let truncated = self.vocabulary.truncated.as_ref()?;
        let context = self.trailing_search.find(lower)?;
        let before = lower[..context.start()].trim_end();
        truncated.find(before).map(|m| m.start())
    }
}

/// Lower-case without moving byte offsets, so spans found in the result
/// apply to the original text.
fn lower_aligned(s: &str) -> String {
    s.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}
