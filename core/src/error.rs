//! Error and result types for the similarity API client.
//!
//! # Design
//! `ErrorKind` is the closed set of request-failure reasons. `RequestError`
//! pairs a kind with the HTTP status it is reported under — the service
//! reuses HTTP codes even for failures that never reach the network (400 for
//! an unparsable URL, 500 for an unreachable host). `Reply` carries the
//! status alongside an optional payload because a decodable envelope may
//! legitimately omit `data`; callers treat the missing payload as a soft
//! failure.

use std::fmt;

/// Reasons a request can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The target string did not parse as an absolute URL.
    InvalidUrl,

    /// A connection was made but no usable HTTP response came back.
    InvalidResponse,

    /// The host could not be reached at all.
    Unreachable(String),

    /// Catch-all: transport errors, missing bodies, decode failures.
    Custom(String),
}

/// A failed request: the failure reason plus the status it is reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestError {
    pub status: u16,
    pub kind: ErrorKind,
}

impl RequestError {
    pub fn new(status: u16, kind: ErrorKind) -> Self {
        Self { status, kind }
    }
}

/// A decoded reply: transport status plus the envelope's optional payload.
///
/// `data` may be `None` even on HTTP 200 — the service omits the `data` key
/// to signal a server-side failure. Callers must check for this themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: u16,
    pub data: Option<T>,
}

/// Outcome of a single request.
///
/// Exactly one of the two arms is produced, exactly once per call.
pub type RequestResult<T> = Result<Reply<T>, RequestError>;

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidUrl => write!(f, "invalid URL"),
            ErrorKind::InvalidResponse => {
                write!(f, "the server responded with garbage")
            }
            ErrorKind::Unreachable(url) => write!(f, "{url} is unreachable"),
            ErrorKind::Custom(message) => write!(f, "{message}"),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.kind)
    }
}

impl std::error::Error for RequestError {}
