//! Background task that keeps the catalog in sync with its source.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::snapshot::Catalog;
use crate::source::CatalogSource;

/// Periodically reloads a [`Catalog`] from a [`CatalogSource`].
///
/// Cycles never overlap: the next wait only starts once the previous load and
/// swap have finished.
pub struct RefreshTicker {
    catalog: Arc<Catalog>,
    source: Arc<dyn CatalogSource>,
    interval: Duration,
}

impl RefreshTicker {
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn CatalogSource>, interval: Duration) -> Self {
        Self {
            catalog,
            source,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Load the source once and install the result. Returns the number of
    /// extensions in the new snapshot.
    ///
    /// On error the current snapshot is left untouched.
    pub async fn refresh_once(&self) -> Result<usize> {
        let extensions = self.source.load().await?;
        let count = extensions.len();
        let generation = self.catalog.replace(extensions);

        debug!(
            source = self.source.name(),
            generation, count, "Installed catalog snapshot"
        );
        Ok(count)
    }

    /// Run the refresh loop on the tokio runtime until the handle is aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            source = self.source.name(),
            interval_ms = self.interval().as_millis() as u64,
            "Starting catalog refresh task"
        );

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(self.interval()).await;

                if let Err(e) = self.refresh_once().await {
                    warn!(
                        source = self.source.name(),
                        "Catalog refresh failed, keeping previous snapshot: {}", e
                    );
                }
            }
        })
    }
}
