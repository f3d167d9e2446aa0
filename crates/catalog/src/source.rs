//! Sources the refresh task pulls complete catalog contents from.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use extgate_types::ExtensionRecord;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::snapshot::into_map;

/// Supplies the full mapping of extension id to record on demand.
///
/// The result of every call is installed wholesale as the next snapshot, so an
/// implementation must always return everything it knows about, never a delta.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    async fn load(&self) -> Result<HashMap<String, ExtensionRecord>>;
}

/// Source backed by a fixed list of records.
#[derive(Debug, Clone)]
pub struct StaticSource {
    records: Vec<ExtensionRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<ExtensionRecord>) -> Self {
        Self { records }
    }

    /// The extensions offered by default.
    pub fn offered() -> Self {
        Self::new(offered_extensions())
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn load(&self) -> Result<HashMap<String, ExtensionRecord>> {
        Ok(into_map(self.records.iter().cloned()))
    }
}

/// Source that reads a JSON array of [`ExtensionRecord`] from disk on every
/// refresh.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<HashMap<String, ExtensionRecord>> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::IoOperation {
                    operation: "read".to_string(),
                    path: self.path.clone(),
                    source,
                })?;

        let records: Vec<ExtensionRecord> =
            serde_json::from_str(&content).map_err(|source| CatalogError::InvalidCatalogFile {
                path: self.path.clone(),
                source,
            })?;

        let mut extensions = HashMap::with_capacity(records.len());
        for record in records {
            if extensions.contains_key(&record.id) {
                return Err(CatalogError::DuplicateExtension(record.id));
            }
            extensions.insert(record.id.clone(), record);
        }

        debug!(path = %self.path.display(), count = extensions.len(), "Loaded catalog file");
        Ok(extensions)
    }
}

/// Built-in list of extensions published by this service.
pub fn offered_extensions() -> Vec<ExtensionRecord> {
    vec![
        ExtensionRecord::new(
            "ldimlcelhnjgpjjemdjokpgeeikdinbm",
            "1.0.0",
            "1c714fadd4208c63f74b707e4c12b81b3ad0153c37de1348fa810dd47cfc5618",
            "Brave Light Theme",
        ),
        ExtensionRecord::new(
            "bfdgpgibhagkpdlnjonhkabjoijopoge",
            "1.0.0",
            "ae517d6273a4fc126961cb026e02946db4f9dbb58e3d9bc29f5e1270e3ce9834",
            "Brave Dark Theme",
        ),
    ]
}
