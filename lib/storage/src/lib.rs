pub mod document;
pub mod manager;
pub mod store;

pub use document::{default_document, parse, serialize, CodeBlock, ParsedDocument};
pub use manager::OverrideManager;
pub use store::{DocumentStore, FileStore, MemoryStore};
