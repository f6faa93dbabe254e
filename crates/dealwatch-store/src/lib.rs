//! Persistent, deduplicated deal collection backed by a single JSON file.
//!
//! Loading and saving ([`file`]) are kept apart from the merge itself
//! ([`merge`]) so merging is a pure function over two deal sequences.

pub mod file;
pub mod merge;

pub use file::{load_store, read_store, write_store};
pub use merge::{merge_deals, MergeOutcome, PriorStore};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize deals: {0}")]
    Serialize(#[from] serde_json::Error),
}
