//! Extension catalog for extgate.
//!
//! The catalog maps extension ids to their latest published
//! [`ExtensionRecord`](extgate_types::ExtensionRecord). It is replaced
//! wholesale by a background [`RefreshTicker`] and read concurrently by request
//! handlers through immutable [`Snapshot`]s.

pub mod error;
pub mod refresh;
pub mod snapshot;
pub mod source;

pub use error::{CatalogError, Result};
pub use refresh::RefreshTicker;
pub use snapshot::{Catalog, Snapshot, into_map};
pub use source::{CatalogSource, JsonFileSource, StaticSource, offered_extensions};
