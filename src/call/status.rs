//! Provider status-string mapping.
//!
//! The status endpoint reports raw provider vocabulary ("queued", "ringing",
//! "busy", ...). The poller only cares whether a value is terminal and, if
//! so, which failure kind it maps to. Unrecognised values are treated as
//! still-pending so an unexpected provider string keeps the poll loop alive
//! instead of wedging the session.

use crate::error::CallFailureKind;

/// Classification of one observed provider status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// The call ran to completion.
    Completed,
    /// The call ended without completing; carries the failure kind that
    /// selects the user-facing message.
    Failed(CallFailureKind),
    /// Not terminal yet; keep polling.
    Pending,
}

/// Normalize (trim + lowercase) and classify a provider status string.
pub fn classify(raw: &str) -> StatusClass {
    match raw.trim().to_ascii_lowercase().as_str() {
        "completed" => StatusClass::Completed,
        "busy" | "canceled" => StatusClass::Failed(CallFailureKind::Rejected),
        "no-answer" => StatusClass::Failed(CallFailureKind::Missed),
        "failed" => StatusClass::Failed(CallFailureKind::Failed),
        _ => StatusClass::Pending,
    }
}
