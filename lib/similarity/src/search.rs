//! Ranked search over an entry registry
//!
//! Every entry name is scored against the query with the configured
//! strategy and the best `limit` pairs are returned, best first.

use crate::distance::similarity;
use crate::subsequence::lcs_length;
use serde::Serialize;
use std::cmp::Ordering;
use texsuggest_core::{Entry, EntryPair, EntryRegistry, Result, Strategy, SuggestConfig, TextField};
use tracing::debug;

/// A pluggable similarity strategy
pub trait Scorer {
    /// Higher is better
    fn score(&self, query: &str, candidate: &str) -> f64;

    /// Order for candidates with equal scores. `Equal` keeps registry order.
    fn tie_break(&self, _a: &str, _b: &str) -> Ordering {
        Ordering::Equal
    }
}

/// Damerau-Levenshtein similarity ratio against the entry name.
///
/// Ties keep registry insertion order. With an empty query every non-empty
/// name scores exactly 0, so the result is simply the first `limit` entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl Scorer for EditDistanceScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        similarity(query, candidate)
    }
}

/// Longest common subsequence length against the entry name.
///
/// Ties prefer the shorter name, then lexical order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceScorer;

impl Scorer for SubsequenceScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        lcs_length(query, candidate) as f64
    }

    fn tie_break(&self, a: &str, b: &str) -> Ordering {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    }
}

/// Scorer implementing `strategy`
pub fn scorer_for(strategy: Strategy) -> &'static dyn Scorer {
    match strategy {
        Strategy::EditDistance => &EditDistanceScorer,
        Strategy::Subsequence => &SubsequenceScorer,
    }
}

/// A registry pair with the score it ranked by
#[derive(Debug, Clone)]
pub struct RankedResult {
    pub pair: EntryPair,
    pub score: f64,
}

impl RankedResult {
    pub fn name(&self) -> &str {
        &self.pair.name
    }

    /// Effective entry for this result
    pub fn resolve(&self) -> Result<Entry> {
        self.pair.resolve()
    }

    /// Display/insertion view of this result under `config`
    pub fn suggestion(&self, config: &SuggestConfig) -> Result<Suggestion> {
        let entry = self.resolve()?;
        Ok(Suggestion::from_entry(&entry, self.pair.is_overridden(), config))
    }
}

/// What a host needs to show and insert one completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub description: TextField,
    pub examples: TextField,
    pub see_also: Vec<String>,
    pub snippet: String,
    /// Text to typeset next to the name, if any
    pub preview: Option<String>,
    pub insert_text: String,
    pub overridden: bool,
}

impl Suggestion {
    pub fn from_entry(entry: &Entry, overridden: bool, config: &SuggestConfig) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            examples: entry.examples.clone(),
            see_also: entry.see_also.clone(),
            snippet: entry.snippet.clone(),
            preview: entry.preview(config.always_show_examples).map(str::to_string),
            insert_text: entry.insert_text(config.snippet_preferred).to_string(),
            overridden,
        }
    }
}

/// Stateless search over a registry snapshot
pub struct RankedSearch<'a> {
    registry: &'a EntryRegistry,
}

impl<'a> RankedSearch<'a> {
    pub fn new(registry: &'a EntryRegistry) -> Self {
        Self { registry }
    }

    /// Top `limit` pairs for `query` under `strategy`, best first
    pub fn search(&self, query: &str, limit: usize, strategy: Strategy) -> Vec<EntryPair> {
        self.search_scored(query, limit, strategy)
            .into_iter()
            .map(|result| result.pair)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps the scores
    pub fn search_scored(&self, query: &str, limit: usize, strategy: Strategy) -> Vec<RankedResult> {
        self.search_with(query, limit, scorer_for(strategy))
    }

    /// Rank with an arbitrary scorer
    pub fn search_with(&self, query: &str, limit: usize, scorer: &dyn Scorer) -> Vec<RankedResult> {
        if limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(&EntryPair, f64)> = self
            .registry
            .iter()
            .map(|pair| (pair, scorer.score(query, &pair.name)))
            .collect();

        // sort_by is stable, so Ordering::Equal keeps registry order
        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| scorer.tie_break(&a.0.name, &b.0.name))
        });
        scored.truncate(limit);

        debug!(
            "Search {:?} ranked {} of {} entries",
            query,
            scored.len(),
            self.registry.len()
        );

        scored
            .into_iter()
            .map(|(pair, score)| RankedResult {
                pair: pair.clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registry() -> EntryRegistry {
        let mut registry = EntryRegistry::new();
        registry.load(vec![
            Entry::new("\\beta").with_description("Greek letter beta"),
            Entry::new("\\alpha").with_description("Greek letter alpha"),
            Entry::new("\\aleph").with_description("Hebrew letter aleph"),
        ]);
        registry
    }

    fn names(pairs: &[EntryPair]) -> Vec<&str> {
        pairs.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_edit_distance_ranks_alpha_above_beta() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search("\\alp", 5, Strategy::EditDistance);

        let order = names(&results);
        assert_eq!(order.len(), 3);
        let alpha = order.iter().position(|n| *n == "\\alpha").unwrap();
        let beta = order.iter().position(|n| *n == "\\beta").unwrap();
        assert!(alpha < beta);
        // alpha and aleph tie; registry order decides
        assert_eq!(order, vec!["\\alpha", "\\aleph", "\\beta"]);
    }

    #[test]
    fn test_subsequence_tie_prefers_shorter_then_lexical() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search("\\alp", 5, Strategy::Subsequence);
        // alpha and aleph both contain all four chars; same length, lexical order
        assert_eq!(names(&results), vec!["\\aleph", "\\alpha", "\\beta"]);
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let registry = create_test_registry();
        let search = RankedSearch::new(&registry);
        assert!(search.search("\\alpha", 0, Strategy::EditDistance).is_empty());
        assert!(search.search("\\alpha", 0, Strategy::Subsequence).is_empty());
        assert!(search.search("", 0, Strategy::Subsequence).is_empty());
    }

    #[test]
    fn test_limit_larger_than_registry() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search("\\b", 100, Strategy::EditDistance);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "\\beta");
    }

    #[test]
    fn test_limit_truncates() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search("\\beta", 1, Strategy::Subsequence);
        assert_eq!(names(&results), vec!["\\beta"]);
    }

    #[test]
    fn test_empty_query_edit_distance_keeps_registry_order() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search_scored("", 3, Strategy::EditDistance);
        let order: Vec<&str> = results.iter().map(|r| r.name()).collect();
        assert_eq!(order, vec!["\\beta", "\\alpha", "\\aleph"]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_empty_query_subsequence_does_not_panic() {
        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search("", 2, Strategy::Subsequence);
        assert_eq!(names(&results), vec!["\\beta", "\\aleph"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = EntryRegistry::new();
        assert!(RankedSearch::new(&registry)
            .search("\\alpha", 5, Strategy::EditDistance)
            .is_empty());
    }

    #[test]
    fn test_results_include_override_only_entries() {
        let mut registry = create_test_registry();
        registry.set_override(Entry::new("\\alphabet").with_snippet("\\mathcal{A}"));

        let results = RankedSearch::new(&registry).search("\\alphabet", 1, Strategy::EditDistance);
        assert_eq!(results[0].name, "\\alphabet");
        assert!(results[0].builtin.is_none());
    }

    #[test]
    fn test_suggestion_uses_resolved_entry() {
        let mut registry = create_test_registry();
        registry.set_override(Entry::new("\\alpha").with_snippet("\\alpha_{@1@}"));
        let config = SuggestConfig::default();

        let results = RankedSearch::new(&registry).search_scored("\\alpha", 1, Strategy::EditDistance);
        let suggestion = results[0].suggestion(&config).unwrap();
        assert_eq!(suggestion.name, "\\alpha");
        assert_eq!(suggestion.insert_text, "\\alpha_{@1@}");
        assert_eq!(suggestion.description, TextField::from("Greek letter alpha"));
        assert_eq!(suggestion.preview.as_deref(), Some("\\alpha"));
        assert!(suggestion.overridden);
    }

    #[test]
    fn test_custom_scorer() {
        struct PrefixScorer;
        impl Scorer for PrefixScorer {
            fn score(&self, query: &str, candidate: &str) -> f64 {
                if candidate.starts_with(query) {
                    1.0
                } else {
                    0.0
                }
            }
        }

        let registry = create_test_registry();
        let results = RankedSearch::new(&registry).search_with("\\al", 3, &PrefixScorer);
        let order: Vec<&str> = results.iter().map(|r| r.name()).collect();
        assert_eq!(order, vec!["\\alpha", "\\aleph", "\\beta"]);
    }
}
