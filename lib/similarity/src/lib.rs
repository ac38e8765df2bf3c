//! # texsuggest Similarity
//!
//! String similarity scorers and ranked search for texsuggest.
//!
//! Two interchangeable strategies rank every entry name in an
//! [`EntryRegistry`](texsuggest_core::EntryRegistry) against the typed query:
//!
//! - **EditDistance**: Damerau-Levenshtein similarity ratio, ties kept in registry order
//! - **Subsequence**: longest common subsequence length, ties broken by shorter name then lexical order
//!
//! ## Example
//!
//! ```rust
//! use texsuggest_core::{Entry, EntryRegistry, Strategy};
//! use texsuggest_similarity::RankedSearch;
//!
//! let mut registry = EntryRegistry::new();
//! registry.load(vec![Entry::new("\\alpha"), Entry::new("\\beta"), Entry::new("\\aleph")]);
//!
//! let results = RankedSearch::new(&registry).search("\\alp", 5, Strategy::EditDistance);
//! assert_eq!(results[0].name, "\\alpha");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Query    │────>│   Scorer    │────>│ RankedSearch│
//! │  (\alp...)  │     │ (DL / LCS)  │     │  (top N)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │ Suggestion  │
//!                                         │ (resolved)  │
//!                                         └─────────────┘
//! ```

pub mod distance;
pub mod search;
pub mod subsequence;

pub use distance::{damerau_levenshtein, similarity};
pub use search::{
    scorer_for, EditDistanceScorer, RankedResult, RankedSearch, Scorer, SubsequenceScorer,
    Suggestion,
};
pub use subsequence::lcs_length;
