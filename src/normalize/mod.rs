mod categories;
mod rules;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

pub(crate) use categories::CategoryMap;

/// Rule tiers in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Tier {
    Exact,
    CanonicalPrefix,
    Prefix,
    Pattern,
}

/// A merchant rule as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Whole description equals `text`.
    Exact { text: String, name: String },
    /// Description starts with the canonical name itself.
    CanonicalPrefix { name: String },
    /// Description starts with `prefix`.
    Prefix { prefix: String, name: String },
    /// Regex found anywhere in the description.
    Pattern { pattern: String, name: String },
}

impl Rule {
    pub(crate) fn exact(text: &str, name: &str) -> Self {
        Self::Exact {
            text: text.into(),
            name: name.into(),
        }
    }

    pub(crate) fn canonical_prefix(name: &str) -> Self {
        Self::CanonicalPrefix { name: name.into() }
    }

    pub(crate) fn prefix(prefix: &str, name: &str) -> Self {
        Self::Prefix {
            prefix: prefix.into(),
            name: name.into(),
        }
    }

    pub(crate) fn pattern(pattern: &str, name: &str) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    pub(crate) fn tier(&self) -> Tier {
        match self {
            Self::Exact { .. } => Tier::Exact,
            Self::CanonicalPrefix { .. } => Tier::CanonicalPrefix,
            Self::Prefix { .. } => Tier::Prefix,
            Self::Pattern { .. } => Tier::Pattern,
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Exact { name, .. }
            | Self::CanonicalPrefix { name }
            | Self::Prefix { name, .. }
            | Self::Pattern { name, .. } => name,
        }
    }
}

enum Matcher {
    Exact(String),
    Prefix(String),
    Pattern(Regex),
}

struct CompiledRule {
    matcher: Matcher,
    name: String,
    tier: Tier,
}

impl CompiledRule {
    fn compile(rule: &Rule) -> Result<Self> {
        let matcher = match rule {
            Rule::Exact { text, .. } => Matcher::Exact(text.trim().to_lowercase()),
            Rule::CanonicalPrefix { name } => Matcher::Prefix(name.trim().to_lowercase()),
            Rule::Prefix { prefix, .. } => Matcher::Prefix(prefix.trim().to_lowercase()),
            Rule::Pattern { pattern, .. } => Matcher::Pattern(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid merchant pattern: {pattern}"))?,
            ),
        };
        Ok(Self {
            matcher,
            name: rule.name().to_string(),
            tier: rule.tier(),
        })
    }

    /// `lower` is `description` already lower-cased.
    fn matches(&self, description: &str, lower: &str) -> bool {
        match &self.matcher {
            Matcher::Exact(text) => lower == text,
            Matcher::Prefix(prefix) => lower.starts_with(prefix.as_str()),
            Matcher::Pattern(re) => re.is_match(description),
        }
    }
}

/// Merchant rules, ordered by tier. Within a tier, supply order is kept.
pub(crate) struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub(crate) fn new(mut rules: Vec<Rule>) -> Result<Self> {
        rules.sort_by_key(Rule::tier);
        let rules = rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The merchant tables shipped with the binary.
    pub(crate) fn builtin() -> Result<Self> {
        Self::new(rules::builtin_rules())
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    fn find(&self, description: &str) -> Option<&CompiledRule> {
        let lower = description.to_lowercase();
        self.rules.iter().find(|r| r.matches(description, &lower))
    }
}

/// Maps noisy merchant strings onto stable display names.
pub(crate) struct Normalizer {
    rules: Arc<RuleSet>,
}

impl Normalizer {
    pub(crate) fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Returns the display name and whether a rule produced it. Unmatched
    /// descriptions come back title-cased with `false`.
    pub(crate) fn normalize(&self, description: &str) -> (String, bool) {
        let description = description.trim();
        match self.rules.find(description) {
            Some(rule) => {
                tracing::debug!(%description, name = %rule.name, tier = ?rule.tier, "Matched merchant rule");
                (rule.name.clone(), true)
            }
            None => (title_case(description), false),
        }
    }
}

/// Upper-case letters that follow a non-letter, lower-case the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
