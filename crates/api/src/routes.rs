//! HTTP routes.
//!
//! | Method | Path               | Handler                      |
//! |--------|--------------------|------------------------------|
//! | GET    | `/`                | liveness probe               |
//! | POST   | `/extensions`      | Omaha update check           |
//! | GET    | `/extensions`      | legacy webstore update check |
//! | GET    | `/extensions/test` | catalog listing              |

use std::fmt::Write;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{RawQuery, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use extgate_engine::{Decision, UpdateEngine, UpdateError};
use http_body_util::LengthLimitError;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Body of the listing route while the catalog holds nothing.
pub const EMPTY_CATALOG_MESSAGE: &str =
    "No extensions found, check that the extension catalog source is reachable.";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<UpdateEngine>,
}

impl AppState {
    pub fn new(engine: UpdateEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/extensions", get(legacy_update).post(omaha_update))
        .route("/extensions/test", get(list_extensions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping() -> &'static str {
    "."
}

async fn omaha_update(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Body,
) -> Result<Response, ApiError> {
    let body = read_body(body, state.engine.settings().max_body_size).await?;
    let decision = state.engine.handle_omaha(&body, query.as_deref())?;
    Ok(into_response(decision))
}

async fn legacy_update(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    into_response(state.engine.handle_legacy(query.as_deref()))
}

async fn list_extensions(State(state): State<AppState>) -> String {
    let snapshot = state.engine.catalog().snapshot();
    if snapshot.is_empty() {
        return EMPTY_CATALOG_MESSAGE.to_string();
    }

    let mut out = String::new();
    for record in snapshot.sorted() {
        let _ = writeln!(out, "{} {} {}", record.id, record.version, record.title);
    }
    out
}

/// Buffer the request body, giving up as soon as it grows past `limit`.
/// A body of exactly `limit` bytes is left for the decoder to reject.
async fn read_body(body: Body, limit: usize) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        let e = e.into_inner();
        if e.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::BodyTooLarge
        } else {
            ApiError::from(UpdateError::Decode(e.to_string()))
        }
    })
}

fn into_response(decision: Decision) -> Response {
    match decision {
        Decision::Respond(document) => {
            ([(header::CONTENT_TYPE, "application/xml")], document).into_response()
        }
        Decision::Redirect(location) => Redirect::temporary(&location).into_response(),
    }
}
