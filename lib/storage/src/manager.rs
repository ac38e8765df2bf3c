use crate::document::{self, CodeBlock, JSON_BLOCK};
use crate::store::DocumentStore;
use parking_lot::{RwLock, RwLockReadGuard};
use texsuggest_core::trigger::trigger_query;
use texsuggest_core::{Entry, EntryRegistry, Error, Result, SuggestConfig};
use texsuggest_similarity::{RankedResult, RankedSearch, Suggestion};
use tracing::{error, info, warn};

/// Owns the registry and keeps its override half in sync with the
/// override document.
///
/// All registry access goes through one lock, so a host can share a
/// manager between threads.
pub struct OverrideManager<S> {
    store: S,
    config: SuggestConfig,
    registry: RwLock<EntryRegistry>,
    code_blocks: RwLock<Vec<CodeBlock>>,
    /// Kind and reason of the table that failed the last reload
    broken_table: RwLock<Option<(String, String)>>,
}

impl<S: DocumentStore> OverrideManager<S> {
    /// Manager over the embedded vocabulary. Overrides are not read until
    /// [`reload`](Self::reload) is called.
    pub fn new(store: S, config: SuggestConfig) -> Result<Self> {
        Ok(Self::with_registry(store, config, EntryRegistry::with_builtins()?))
    }

    pub fn with_registry(store: S, config: SuggestConfig, registry: EntryRegistry) -> Self {
        Self {
            store,
            config,
            registry: RwLock::new(registry),
            code_blocks: RwLock::new(Vec::new()),
            broken_table: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> RwLockReadGuard<'_, EntryRegistry> {
        self.registry.read()
    }

    pub fn code_blocks(&self) -> Vec<CodeBlock> {
        self.code_blocks.read().clone()
    }

    /// Re-read the override document.
    ///
    /// Returns `false` when the document is missing or its table is
    /// malformed; the previous overrides and block layout are then kept.
    pub fn reload(&self) -> bool {
        match self.try_reload() {
            Ok(count) => {
                info!("User defined symbols reloaded: {} overrides", count);
                true
            }
            Err(e @ Error::DocumentNotFound(_)) => {
                error!("{}", e);
                false
            }
            Err(e) => {
                error!("User defined symbols reload failed, keeping previous overrides: {}", e);
                false
            }
        }
    }

    /// [`reload`](Self::reload) with the failure reason. Returns the number
    /// of overrides loaded.
    pub fn try_reload(&self) -> Result<usize> {
        let text = match self.store.load_document() {
            Ok(text) => text,
            Err(e @ Error::DocumentNotFound(_)) => {
                *self.broken_table.write() = None;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let parsed = match document::parse(&text) {
            Ok(parsed) => parsed,
            Err(Error::MalformedOverrideTable { kind, reason }) => {
                *self.broken_table.write() = Some((kind.clone(), reason.clone()));
                return Err(Error::MalformedOverrideTable { kind, reason });
            }
            Err(e) => return Err(e),
        };
        let count = parsed.overrides.len();

        let mut registry = self.registry.write();
        registry.clear_overrides();
        registry.apply_overrides(parsed.overrides);
        *self.code_blocks.write() = parsed.code_blocks;
        *self.broken_table.write() = None;

        Ok(count)
    }

    /// Fails while the last reload hit a malformed table
    fn ensure_writable(&self) -> Result<()> {
        match &*self.broken_table.read() {
            Some((kind, reason)) => Err(Error::MalformedOverrideTable {
                kind: kind.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Write the current overrides back to the document.
    ///
    /// A layout without an override table gets a `json` table appended.
    /// Refused until a reload succeeds when the last one hit a malformed
    /// table.
    pub fn save(&self) -> Result<()> {
        self.ensure_writable()?;
        let overrides = self.registry.read().overrides();
        let text = {
            let mut blocks = self.code_blocks.write();
            if !blocks.iter().any(CodeBlock::is_override_table) {
                blocks.push(CodeBlock::new(JSON_BLOCK, ""));
            }
            document::serialize(&overrides, &blocks)?
        };

        self.store.write_document(&text)?;
        info!("User defined symbols saved to {}", self.store.location());
        Ok(())
    }

    /// Top `limit` results for `query` under the configured strategy
    pub fn search(&self, query: &str, limit: usize) -> Vec<RankedResult> {
        let registry = self.registry.read();
        RankedSearch::new(&registry).search_scored(query, limit, self.config.strategy)
    }

    /// Resolved suggestions for `query`
    pub fn suggestions(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>> {
        self.search(query, limit)
            .iter()
            .map(|result| result.suggestion(&self.config))
            .collect()
    }

    /// Suggestions for the text before the cursor, or none when the
    /// trigger settings do not fire there
    pub fn suggest(&self, text_before_cursor: &str) -> Result<Vec<Suggestion>> {
        match trigger_query(text_before_cursor, &self.config) {
            Some(query) => self.suggestions(query, self.config.max_suggestions),
            None => Ok(Vec::new()),
        }
    }

    /// Effective entry for `name`
    pub fn lookup(&self, name: &str) -> Option<Result<Entry>> {
        self.registry.read().resolve(name)
    }

    /// Replace the override for `name` with one that only sets the
    /// snippet, then persist.
    pub fn set_snippet(&self, name: &str, snippet: &str) -> Result<()> {
        self.ensure_writable()?;
        self.registry
            .write()
            .set_override(Entry::new(name).with_snippet(snippet));
        self.save()
    }

    /// Drop the override for `name` and persist. Returns whether one existed.
    pub fn remove_override(&self, name: &str) -> Result<bool> {
        self.ensure_writable()?;
        let removed = self.registry.write().remove_override(name);
        if removed {
            self.save()?;
        } else {
            warn!("No override to remove for {}", name);
        }
        Ok(removed)
    }

    /// Write the starter document when there is none (or it is blank),
    /// then load it.
    pub fn init_document(&self) -> Result<usize> {
        match self.store.load_document() {
            Ok(text) if !text.trim().is_empty() => {
                return Err(Error::DocumentExists(self.store.location()));
            }
            Ok(_) | Err(Error::DocumentNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        info!("Generating default user defined symbols at {}", self.store.location());
        self.store.write_document(&document::default_document())?;
        self.try_reload()
    }
}
