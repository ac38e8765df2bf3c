//! # texsuggest
//!
//! Fuzzy autocompletion for TeX/MathJax symbols with user-editable overrides.
//!
//! texsuggest ranks a builtin vocabulary of roughly six hundred LaTeX
//! commands against a partially typed `\command` and returns the best
//! matches, each carrying a description, examples and an insertion snippet.
//! Users override any field of any symbol (or add new ones) from a markdown
//! file holding a fenced `json` or `yaml` table.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! texsuggest init
//! texsuggest search '\alp'
//! texsuggest set-snippet '\R' '\mathbb{R}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use texsuggest::prelude::*;
//!
//! let config = SuggestConfig::default();
//! let store = FileStore::new(&config.override_file);
//! let manager = OverrideManager::new(store, config).unwrap();
//! manager.reload();
//!
//! for suggestion in manager.suggestions("\\alp", 5).unwrap() {
//!     println!("{} -> {}", suggestion.name, suggestion.insert_text);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`texsuggest-core`](https://docs.rs/texsuggest-core) - Entries, registry, settings, trigger detection
//! - [`texsuggest-similarity`](https://docs.rs/texsuggest-similarity) - Edit distance, LCS and ranked search
//! - [`texsuggest-storage`](https://docs.rs/texsuggest-storage) - Override document format and persistence

// Re-export core types
pub use texsuggest_core::{
    builtin_entries, Entry, EntryPair, EntryRegistry, Error, Result, Strategy, SuggestConfig,
    TextField,
};

// Re-export similarity
pub use texsuggest_similarity::{RankedResult, RankedSearch, Scorer, Suggestion};

// Re-export storage
pub use texsuggest_storage::{DocumentStore, FileStore, MemoryStore, OverrideManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DocumentStore, Entry, EntryPair, EntryRegistry, Error, FileStore, MemoryStore,
        OverrideManager, RankedResult, RankedSearch, Result, Strategy, SuggestConfig,
        Suggestion, TextField,
    };
}

/// Raw string metrics
pub mod metrics {
    pub use texsuggest_similarity::{damerau_levenshtein, lcs_length, similarity};
}
