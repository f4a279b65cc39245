//! Result of a single armory call.

use bytes::Bytes;
use serde_json::Value;

/// Synthetic status used when no upstream response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Outcome of one upstream fetch.
///
/// The upstream client never raises; every fault is turned into a
/// `Failure` so callers decide policy by matching.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Status in `200..300`, body passed through untouched.
    Success { status: u16, body: Value },
    Failure(FetchFailure),
}

/// A non-2xx upstream answer, or a transport fault reported as 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub status: u16,
    /// Raw upstream body bytes for HTTP errors, a UTF-8 description for
    /// transport faults.
    pub body: Bytes,
}

impl FetchOutcome {
    pub fn success(status: u16, body: Value) -> Self {
        debug_assert!((200..300).contains(&status), "success with status {status}");
        Self::Success { status, body }
    }

    /// Upstream answered with a non-success status.
    pub fn upstream_error(status: u16, body: impl Into<Bytes>) -> Self {
        Self::Failure(FetchFailure {
            status,
            body: body.into(),
        })
    }

    /// No usable response was received.
    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::Failure(FetchFailure {
            status: TRANSPORT_FAILURE_STATUS,
            body: Bytes::from(message.into()),
        })
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "upstream status {}: {}",
            self.status,
            String::from_utf8_lossy(&self.body)
        )
    }
}
