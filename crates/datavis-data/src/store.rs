//! Dataset metadata store
//!
//! The core's view of the key-value store that holds CSV datasets attached
//! to content items, keyed by post id and filename. The REST collaborator
//! wires this contract to the host CMS's storage; `MemoryStore` backs tests
//! and local tooling.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DataError;

/// A dataset attached to a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub filename: String,
    /// Raw CSV content, delivered byte-exact
    pub content: String,
    pub url: String,
}

/// Listing entry for a dataset, without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub filename: String,
    pub url: String,
}

/// Key-value store of datasets, keyed by post id and filename
pub trait DatasetStore {
    /// Get a dataset with its content, if present
    fn get(&self, post_id: u64, filename: &str) -> Option<Dataset>;

    /// List datasets on a post, without content
    fn list(&self, post_id: u64) -> Vec<DatasetRef>;

    /// Create or replace a dataset
    fn put(&mut self, post_id: u64, filename: &str, content: &str) -> Result<(), DataError>;

    /// Delete a dataset, returning whether it existed
    fn delete(&mut self, post_id: u64, filename: &str) -> bool;
}

/// Content-Type header value for raw CSV delivery.
///
/// Dataset content itself is passed through byte-exact; only the charset
/// comes from site configuration.
pub fn csv_content_type(charset: &str) -> String {
    format!("text/csv; charset={}", charset)
}

/// Filenames follow the REST route pattern: lowercase alphanumerics plus
/// `-`, `_`, and `.`.
pub fn is_valid_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

/// In-memory dataset store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Base URL prepended when deriving dataset URLs
    base_url: String,
    /// Content keyed by (post id, filename)
    datasets: AHashMap<(u64, String), String>,
}

impl MemoryStore {
    /// Create a store deriving URLs from the given REST base, e.g.
    /// `https://example.com/wp-json/wp/v2/posts`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            datasets: AHashMap::new(),
        }
    }

    fn url_for(&self, post_id: u64, filename: &str) -> String {
        format!("{}/{}/datasets/{}", self.base_url, post_id, filename)
    }
}

impl DatasetStore for MemoryStore {
    fn get(&self, post_id: u64, filename: &str) -> Option<Dataset> {
        self.datasets
            .get(&(post_id, filename.to_string()))
            .map(|content| Dataset {
                filename: filename.to_string(),
                content: content.clone(),
                url: self.url_for(post_id, filename),
            })
    }

    fn list(&self, post_id: u64) -> Vec<DatasetRef> {
        let mut refs: Vec<DatasetRef> = self
            .datasets
            .keys()
            .filter(|(id, _)| *id == post_id)
            .map(|(_, filename)| DatasetRef {
                filename: filename.clone(),
                url: self.url_for(post_id, filename),
            })
            .collect();

        // Stable listing order regardless of hash map iteration.
        refs.sort_by(|a, b| a.filename.cmp(&b.filename));
        refs
    }

    fn put(&mut self, post_id: u64, filename: &str, content: &str) -> Result<(), DataError> {
        if !is_valid_filename(filename) {
            return Err(DataError::InvalidFilename(filename.to_string()));
        }

        debug!(post_id, filename, bytes = content.len(), "storing dataset");
        self.datasets
            .insert((post_id, filename.to_string()), content.to_string());
        Ok(())
    }

    fn delete(&mut self, post_id: u64, filename: &str) -> bool {
        self.datasets
            .remove(&(post_id, filename.to_string()))
            .is_some()
    }
}
