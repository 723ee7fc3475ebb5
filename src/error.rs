//! Unified error types for the CareLink client core.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! shell-facing dispatch layer's error handling uniform. Validation errors
//! are handled entirely at the point of action; initiation and terminal call
//! failures are the only ones that change session state; transient poll
//! errors never surface (they are logged and retried on the next tick).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level client error
// ---------------------------------------------------------------------------

/// Every fallible operation in the client core funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A call operation was rejected or failed.
    Call(CallError),
    /// A schedule operation was rejected or failed.
    Schedule(ScheduleError),
    /// A remote collaborator reported a failure.
    Remote(RemoteError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(e) => write!(f, "call: {e}"),
            Self::Schedule(e) => write!(f, "schedule: {e}"),
            Self::Remote(e) => write!(f, "remote: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Call errors (local rejections)
// ---------------------------------------------------------------------------

/// Local guard failures around the call lifecycle. These never reach the
/// network: they are raised before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// The number is empty after trimming — validation failure, no request.
    EmptyNumber,
    /// The originate round trip has not resolved yet; no new action is
    /// accepted until it does.
    AttemptInFlight,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "phone number is required"),
            Self::AttemptInFlight => write!(f, "a call attempt is already in flight"),
        }
    }
}

impl From<CallError> for Error {
    fn from(e: CallError) -> Self {
        Self::Call(e)
    }
}

// ---------------------------------------------------------------------------
// Terminal call failures
// ---------------------------------------------------------------------------

/// How a call attempt ended when it did not complete. Each kind carries a
/// fixed user-facing message; the shell renders it on the failure view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFailureKind {
    /// The callee declined (provider: "busy", "canceled").
    Rejected,
    /// The callee never picked up (provider: "no-answer").
    Missed,
    /// The call could not be connected (provider: "failed", and the default
    /// for anything unrecognised).
    Failed,
    /// The status-poll budget ran out without a terminal status.
    TimedOut,
}

impl CallFailureKind {
    /// User-facing message for the failure view.
    pub fn message(self) -> &'static str {
        match self {
            Self::Rejected => "call was declined",
            Self::Missed => "call was not answered",
            Self::Failed => "connection failed",
            Self::TimedOut => "call status could not be confirmed",
        }
    }
}

impl fmt::Display for CallFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "rejected"),
            Self::Missed => write!(f, "missed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule errors
// ---------------------------------------------------------------------------

/// Local guard failures around schedule editing and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// A save is already in flight for this owner; the control surface is
    /// disabled for the duration, so this is a defensive rejection.
    SaveInFlight,
    /// No schedule has been loaded yet for the requested operation.
    NothingLoaded,
    /// Another schedule's wheels are already in edit mode.
    EditInProgress,
    /// Save or cancel arrived with no edit session open.
    NoEditOpen,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveInFlight => write!(f, "a save is already in flight"),
            Self::NothingLoaded => write!(f, "no schedule loaded"),
            Self::EditInProgress => write!(f, "an edit session is already open"),
            Self::NoEditOpen => write!(f, "no edit session open"),
        }
    }
}

impl From<ScheduleError> for Error {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

// ---------------------------------------------------------------------------
// Remote errors
// ---------------------------------------------------------------------------

/// Failure reported by a remote collaborator (or by the transport on its
/// behalf). Adapters fill `detail` with whatever the backend or transport
/// supplied; when nothing structured is available the user still gets the
/// generic fallback from [`user_message`](Self::user_message).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteError {
    /// HTTP-ish status code, when the collaborator got far enough to have one.
    pub status: Option<u16>,
    /// Backend-provided error detail or transport error text.
    pub detail: Option<String>,
}

/// Shown whenever a collaborator supplies no structured error detail.
pub const GENERIC_REMOTE_MESSAGE: &str = "connection failed";

impl RemoteError {
    /// Error with detail text only.
    pub fn message(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: Some(detail.into()),
        }
    }

    /// User-facing message: backend detail if present, generic fallback
    /// otherwise. The user is never left without feedback.
    pub fn user_message(&self) -> &str {
        self.detail.as_deref().unwrap_or(GENERIC_REMOTE_MESSAGE)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.detail) {
            (Some(code), Some(detail)) => write!(f, "status {code}: {detail}"),
            (Some(code), None) => write!(f, "status {code}"),
            (None, Some(detail)) => write!(f, "{detail}"),
            (None, None) => write!(f, "{GENERIC_REMOTE_MESSAGE}"),
        }
    }
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        Self::Remote(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
