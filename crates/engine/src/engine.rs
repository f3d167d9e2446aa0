use std::sync::Arc;

use extgate_catalog::{Catalog, Snapshot};
use extgate_types::{AppOutcome, AppQuery, RequestEnvelope, RequestFormat, UpdateInfo};
use tracing::{debug, warn};

use crate::decode;
use crate::encode::{self, ResponseMeta};
use crate::error::Result;
use crate::redirect::RedirectTargets;
use crate::version;

/// Default ceiling for Omaha request bodies, 11 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 11 * 1024 * 1024;

/// Knobs of the decision engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub meta: ResponseMeta,
    /// Base URL packages are served from. The full download URL is
    /// `<codebase>/<id>/<package name>`.
    pub codebase: String,
    pub redirect: RedirectTargets,
    pub max_body_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            meta: ResponseMeta::default(),
            codebase: "https://brave-core-ext.s3.brave.com/release".to_string(),
            redirect: RedirectTargets::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// What the transport should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// 200 with this document.
    Respond(String),
    /// Temporary redirect to this location.
    Redirect(String),
}

/// Answers update checks against a shared [`Catalog`].
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
}

impl UpdateEngine {
    pub fn new(catalog: Arc<Catalog>, settings: EngineSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Handle an Omaha XML body. `query` is the raw query string of the
    /// request URL, used when the request gets redirected upstream.
    pub fn handle_omaha(&self, body: &[u8], query: Option<&str>) -> Result<Decision> {
        let envelope = decode::omaha::decode(body, self.settings.max_body_size)?;
        Ok(self.decide(&envelope, query))
    }

    /// Handle a legacy webstore query. This never fails.
    pub fn handle_legacy(&self, query: Option<&str>) -> Decision {
        let envelope = decode::legacy::decode(query.unwrap_or_default());
        self.decide(&envelope, query)
    }

    /// Resolve, then either redirect or encode.
    pub fn decide(&self, envelope: &RequestEnvelope, query: Option<&str>) -> Decision {
        let snapshot = self.catalog.snapshot();
        let outcomes = self.resolve(&snapshot, &envelope.apps);

        if let Some(location) =
            self.settings
                .redirect
                .location(envelope.format, &envelope.apps, &outcomes, query)
        {
            debug!(format = ?envelope.format, %location, "Redirecting unknown extension");
            return Decision::Redirect(location);
        }

        let updates: Vec<&UpdateInfo> = outcomes.iter().filter_map(AppOutcome::update).collect();
        debug!(
            format = ?envelope.format,
            apps = envelope.apps.len(),
            updates = updates.len(),
            generation = snapshot.generation(),
            "Answering update check"
        );

        let meta = &self.settings.meta;
        Decision::Respond(match envelope.format {
            RequestFormat::Omaha => encode::omaha::encode(meta, updates),
            RequestFormat::Legacy => encode::legacy::encode(meta, updates),
        })
    }

    /// One outcome per app, in request order.
    pub fn resolve(&self, snapshot: &Snapshot, apps: &[AppQuery]) -> Vec<AppOutcome> {
        apps.iter()
            .map(|app| resolve_app(snapshot, app, &self.settings.codebase))
            .collect()
    }
}

/// Decide whether `app` needs an update from `snapshot`.
///
/// Blacklisted extensions are known but never offered. Versions that fail to
/// parse on either side never produce an update.
pub fn resolve_app(snapshot: &Snapshot, app: &AppQuery, codebase: &str) -> AppOutcome {
    let Some(record) = snapshot.get(&app.id) else {
        return AppOutcome::Unknown;
    };

    if record.blacklisted {
        debug!(id = %app.id, "Extension is blacklisted, not offering update");
        return AppOutcome::UpToDate;
    }

    match version::is_out_of_date(&app.version, &record.version) {
        Ok(true) => {
            let package_name = package_name(&record.version);
            AppOutcome::UpdateAvailable(UpdateInfo {
                id: record.id.clone(),
                version: record.version.clone(),
                codebase: download_url(codebase, &record.id, &package_name),
                package_name,
                sha256: record.sha256.clone(),
            })
        }
        Ok(false) => AppOutcome::UpToDate,
        Err(e) => {
            warn!(
                id = %app.id,
                installed = %app.version,
                latest = %record.version,
                "Not offering update, unparseable version: {}", e
            );
            AppOutcome::UpToDate
        }
    }
}

/// `1.2.3` becomes `extension_1_2_3.crx`.
pub fn package_name(version: &str) -> String {
    format!("extension_{}.crx", version.replace('.', "_"))
}

pub fn download_url(codebase: &str, id: &str, package_name: &str) -> String {
    format!("{}/{}/{}", codebase.trim_end_matches('/'), id, package_name)
}
