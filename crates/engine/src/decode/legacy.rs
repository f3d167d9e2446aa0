//! Decoder for legacy webstore update queries.
//!
//! Each app is a separate `x` parameter whose value is itself a URL encoded
//! query string, e.g. `?x=id%3Dabc%26v%3D1.0.0&x=id%3Ddef%26v%3D2.0`.

use extgate_types::{AppQuery, RequestEnvelope};
use url::form_urlencoded;

pub const APP_PARAM: &str = "x";

/// Decode a raw query string (without the leading `?`). Never fails: a query
/// without `x` parameters is simply a request for zero apps.
pub fn decode(query: &str) -> RequestEnvelope {
    let apps = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == APP_PARAM)
        .filter_map(|(_, value)| parse_app(&value))
        .collect();

    RequestEnvelope::legacy(apps)
}

/// Parse one `id=...&v=...` value. Values without an id are skipped.
fn parse_app(value: &str) -> Option<AppQuery> {
    let mut id = None;
    let mut version = None;

    for (key, value) in form_urlencoded::parse(value.as_bytes()) {
        match key.as_ref() {
            "id" => id = Some(value.into_owned()),
            "v" => version = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(AppQuery::new(id?, version.unwrap_or_default()))
}

/// Encode an app back into its `x` parameter value.
pub fn encode_app(app: &AppQuery) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &app.id)
        .append_pair("v", &app.version)
        .finish()
}
