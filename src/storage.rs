//! Storage for documents and configuration.
//!
//! Documents are addressed by vault-relative paths through the
//! [`DocumentStore`] trait, so the update pipeline runs the same against a
//! directory on disk ([`Vault`]) or an in-memory fake ([`MemoryStore`]).

mod config_store;
mod document;
mod memory;
mod vault;

pub use config_store::{ConfigStore, TomlConfigStore};
pub use document::{DocumentStore, ReadError};
pub use memory::MemoryStore;
pub use vault::Vault;

/// The vault folder holding the tool's own files.
pub const CONFIG_DIR: &str = ".tstat";
