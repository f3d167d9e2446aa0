//! Shared data model for the extgate update service.
//!
//! These types are produced by the request decoders, consumed by the decision
//! engine and the response encoders, and stored in the extension catalog.

use serde::{Deserialize, Serialize};

/// A single extension as published in the catalog.
///
/// The identifier is an opaque key. It is never parsed or validated beyond
/// being used for lookups and for building download URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub id: String,
    /// Hex encoded SHA-256 digest of the published package.
    pub sha256: String,
    #[serde(default)]
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub blacklisted: bool,
}

impl ExtensionRecord {
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        sha256: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sha256: sha256.into(),
            title: title.into(),
            version: version.into(),
            blacklisted: false,
        }
    }

    pub fn with_blacklisted(mut self, blacklisted: bool) -> Self {
        self.blacklisted = blacklisted;
        self
    }
}

/// Wire format a request arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestFormat {
    /// XML body posted by Omaha protocol clients.
    Omaha,
    /// Query string sent by the legacy webstore update path.
    Legacy,
}

/// One (extension id, installed version) pair extracted from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppQuery {
    pub id: String,
    pub version: String,
}

impl AppQuery {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

/// Normalized form of an inbound request, independent of its wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub format: RequestFormat,
    /// Protocol version the client asked for. Only Omaha requests carry one.
    pub protocol: Option<String>,
    /// Apps in the order they appeared in the request.
    pub apps: Vec<AppQuery>,
}

impl RequestEnvelope {
    pub fn omaha(protocol: impl Into<String>, apps: Vec<AppQuery>) -> Self {
        Self {
            format: RequestFormat::Omaha,
            protocol: Some(protocol.into()),
            apps,
        }
    }

    pub fn legacy(apps: Vec<AppQuery>) -> Self {
        Self {
            format: RequestFormat::Legacy,
            protocol: None,
            apps,
        }
    }
}

/// Everything an encoder needs to describe an available update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    pub id: String,
    pub version: String,
    /// Full download URL of the package.
    pub codebase: String,
    /// File name of the package, also the last segment of `codebase`.
    pub package_name: String,
    pub sha256: String,
}

/// Result of resolving one [`AppQuery`] against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    UpToDate,
    UpdateAvailable(UpdateInfo),
    /// The extension id is not in the catalog.
    Unknown,
}

impl AppOutcome {
    pub fn update(&self) -> Option<&UpdateInfo> {
        match self {
            AppOutcome::UpdateAvailable(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AppOutcome::Unknown)
    }
}
