//! # texsuggest Core
//!
//! Core library for texsuggest, fuzzy autocompletion of TeX/MathJax symbols.
//!
//! This crate provides the data model shared by the other crates:
//!
//! - [`Entry`] - A named symbol with description, examples, cross references and snippet
//! - [`EntryRegistry`] - Builtin vocabulary merged with user overrides
//! - [`EntryPair`] - The builtin/override halves stored per name
//! - [`SuggestConfig`] - User settings (strategy, snippet preference, file path)
//!
//! ## Example
//!
//! ```rust
//! use texsuggest_core::{Entry, EntryRegistry, TextField};
//!
//! let mut registry = EntryRegistry::new();
//! registry.load(vec![Entry::new("\\alpha").with_description("Greek letter alpha")]);
//! registry.set_override(Entry::new("\\alpha").with_snippet("\\alpha_{@1@}"));
//!
//! let alpha = registry.resolve("\\alpha").unwrap().unwrap();
//! assert_eq!(alpha.snippet, "\\alpha_{@1@}");
//! assert_eq!(alpha.description, TextField::from("Greek letter alpha"));
//! ```

pub mod builtin;
pub mod config;
pub mod entry;
pub mod error;
pub mod registry;
pub mod trigger;

pub use builtin::builtin_entries;
pub use config::{Strategy, SuggestConfig};
pub use entry::{Entry, TextField};
pub use error::{Error, Result};
pub use registry::{EntryPair, EntryRegistry};
