//! Port traits — the hexagonal boundary between the client core and the
//! outside world.
//!
//! ```text
//!   Shell / adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (HTTP backend, navigation shell, log sinks) implement
//! these traits. The [`AppService`](super::service::AppService) consumes
//! them via generics, so the core never touches a socket or a screen.
//!
//! Network ports are **request sinks**: calls return immediately and the
//! adapter later hands the outcome back as a [`Reply`], which the runtime
//! feeds into [`AppService::handle_reply`](super::service::AppService::handle_reply).
//! The core stays single-threaded and tick-driven; all awaiting happens on
//! the adapter's side of the boundary.

use crate::call::{CallGrant, CallStatusRecord, OriginateRequest};
use crate::error::RemoteError;
use crate::schedule::ScheduleRecord;

// ───────────────────────────────────────────────────────────────
// Identity port (driven adapter: account state → domain)
// ───────────────────────────────────────────────────────────────

/// Whose behalf the client is acting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    pub user_id: String,
    /// Raw number as entered at registration; normalized before dialing.
    pub phone_number: String,
}

/// Read-only view of the signed-in owner (self or a managed dependent).
pub trait IdentityPort {
    /// `None` when no profile is available (signed out, still loading).
    fn owner_profile(&self) -> Option<OwnerProfile>;
}

// ───────────────────────────────────────────────────────────────
// Call gateway (driven adapter: domain → origination/status service)
// ───────────────────────────────────────────────────────────────

/// Outbound call operations. Both are fire-and-forget; outcomes arrive as
/// [`CallReply`] values.
pub trait CallGateway {
    /// Ask the origination service to place a call.
    fn originate(&mut self, request: OriginateRequest);

    /// Probe the status of a previously originated call.
    fn fetch_status(&mut self, call_sid: &str);
}

// ───────────────────────────────────────────────────────────────
// Schedule gateway (driven adapter: domain → care service)
// ───────────────────────────────────────────────────────────────

/// Remote persistence for the per-owner call schedule. Fire-and-forget;
/// outcomes arrive as [`ScheduleReply`] values.
pub trait ScheduleGateway {
    fn load_schedule(&mut self, owner_id: &str);

    fn save_schedule(&mut self, owner_id: &str, record: &ScheduleRecord);
}

// ───────────────────────────────────────────────────────────────
// Navigation port (driven adapter: domain → shell routing)
// ───────────────────────────────────────────────────────────────

/// Downstream navigation taken when a call completes. The shell opens its
/// post-call composition view pre-filled for the given provider session.
pub trait Navigator {
    fn open_composer(&mut self, session_id: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → UI / logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s through
/// this port. Adapters decide what they become — view-model updates, log
/// lines, analytics.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Completion replies
// ───────────────────────────────────────────────────────────────

/// Completed network operation, delivered back into the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Call(CallReply),
    Schedule(ScheduleReply),
}

/// Outcome of a [`CallGateway`] request.
#[derive(Debug, Clone, PartialEq)]
pub enum CallReply {
    Originated(Result<CallGrant, RemoteError>),
    Status(Result<CallStatusRecord, RemoteError>),
}

/// Outcome of a [`ScheduleGateway`] request. `owner_id` routes the reply:
/// a late reply for a previously viewed owner must not clobber the current
/// one.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleReply {
    Loaded {
        owner_id: String,
        /// `Ok(None)` means the service has no row for this owner yet.
        result: Result<Option<ScheduleRecord>, RemoteError>,
    },
    Saved {
        owner_id: String,
        result: Result<(), RemoteError>,
    },
}
