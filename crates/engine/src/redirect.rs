//! Upstream redirect policy for extensions missing from the catalog.
//!
//! Only a request naming exactly one app, whose id is unknown, is redirected.
//! Multi-app requests drop their unknown ids instead.

use extgate_types::{AppOutcome, AppQuery, RequestFormat};
use url::form_urlencoded;

use crate::decode::legacy::{APP_PARAM, encode_app};

/// Query parameter marking a request as forwarded by this service.
pub const MARKER_PARAM: &str = "braveRedirect";
const MARKER_VALUE: &str = "true";

/// Upstream endpoints, one per wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    pub omaha: String,
    pub legacy: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            omaha: "https://update.googleapis.com/service/update2".to_string(),
            legacy: "https://clients2.google.com/service/update2/crx".to_string(),
        }
    }
}

impl RedirectTargets {
    /// Location to redirect to, or `None` when the request must be answered
    /// locally.
    ///
    /// `query` is the raw query string of the inbound request, without `?`.
    pub fn location(
        &self,
        format: RequestFormat,
        apps: &[AppQuery],
        outcomes: &[AppOutcome],
        query: Option<&str>,
    ) -> Option<String> {
        let [app] = apps else {
            return None;
        };
        if !outcomes.first().is_some_and(AppOutcome::is_unknown) {
            return None;
        }

        Some(match format {
            RequestFormat::Omaha => omaha_location(&self.omaha, query),
            RequestFormat::Legacy => legacy_location(&self.legacy, query, app),
        })
    }
}

/// Forward the inbound query string as is, plus the marker.
pub fn omaha_location(base: &str, query: Option<&str>) -> String {
    let mut pairs: Vec<String> = retained_pairs(query, &[MARKER_PARAM])
        .map(str::to_string)
        .collect();
    pairs.push(format!("{MARKER_PARAM}={MARKER_VALUE}"));

    join(base, &pairs)
}

/// Keep unrelated inbound parameters, then the rebuilt `x` parameter for
/// `app`, then the marker.
pub fn legacy_location(base: &str, query: Option<&str>, app: &AppQuery) -> String {
    let mut pairs: Vec<String> = retained_pairs(query, &[APP_PARAM, MARKER_PARAM])
        .map(str::to_string)
        .collect();
    let app_value: String = form_urlencoded::byte_serialize(encode_app(app).as_bytes()).collect();
    pairs.push(format!("{APP_PARAM}={app_value}"));
    pairs.push(format!("{MARKER_PARAM}={MARKER_VALUE}"));

    join(base, &pairs)
}

/// Raw `key=value` pairs of `query` whose key is not in `dropped`. Pairs are
/// passed through byte for byte, never decoded and re-encoded.
fn retained_pairs<'a>(
    query: Option<&'a str>,
    dropped: &'a [&'a str],
) -> impl Iterator<Item = &'a str> + 'a {
    query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(move |pair| {
            let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
            !dropped.contains(&key)
        })
}

fn join(base: &str, pairs: &[String]) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{}", pairs.join("&"))
}
