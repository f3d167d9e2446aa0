//! Update decision engine for extgate.
//!
//! This crate turns extension update checks into answers. A request arrives in
//! one of two wire formats, gets decoded into a
//! [`RequestEnvelope`](extgate_types::RequestEnvelope), every app in it is
//! resolved against the current catalog snapshot, and the result is either a
//! redirect to an upstream update service or an encoded response document.
//!
//! ```text
//! Received -> Decoded -> Resolved -> Redirecting | Responding -> Done
//! ```
//!
//! Only decoding can fail, see [`UpdateError`].

pub mod decode;
pub mod encode;
mod engine;
pub mod error;
pub mod redirect;
pub mod version;

pub use engine::{
    DEFAULT_MAX_BODY_SIZE, Decision, EngineSettings, UpdateEngine, download_url, package_name,
    resolve_app,
};
pub use error::{Result, UpdateError};
