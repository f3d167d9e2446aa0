pub type Result<T> = std::result::Result<T, UpdateError>;

/// Client input errors raised while turning a request into a [`RequestEnvelope`].
///
/// Unknown extensions are not errors, they are an
/// [`AppOutcome`](extgate_types::AppOutcome) routed to the redirect policy.
///
/// [`RequestEnvelope`]: extgate_types::RequestEnvelope
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// The body reached the size ceiling. Checked before any parsing.
    #[error("Request too large")]
    BodyTooLarge,

    /// Structurally invalid input. Carries the parser's own diagnostic, e.g.
    /// `EOF` for an empty body.
    #[error("{0}")]
    Decode(String),

    /// Well formed request for a protocol version we do not speak.
    #[error("request version: {0} not supported")]
    UnsupportedProtocol(String),
}

impl UpdateError {
    pub(crate) fn decode(error: impl std::fmt::Display) -> Self {
        UpdateError::Decode(error.to_string())
    }
}
