//! Voice-call session subsystem.
//!
//! One call attempt at a time: normalize the owner's number, ask the
//! origination service for a call, then poll the status endpoint until a
//! terminal outcome (or the polling budget runs out). The pieces are kept
//! separate so each is testable on its own:
//!
//! ```text
//!   user input ──▶ CallController ──▶ CallSession (FSM)
//!                       │                  ▲
//!                       ▼                  │
//!                  StatusPoller ──▶ status mapping
//! ```

use serde::{Deserialize, Serialize};

pub mod controller;
pub mod phone;
pub mod poller;
pub mod session;
pub mod status;

pub use controller::CallController;
pub use phone::DialPlan;
pub use poller::{PollDecision, StatusPoller};
pub use session::{CallPhase, CallSession};
pub use status::StatusClass;

/// Request body sent to the call-origination service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginateRequest {
    pub to_number: String,
    pub user_id: String,
}

/// Successful origination response. `call_sid` is the opaque provider
/// identifier every later status probe is keyed by; a response without one
/// is treated as a failed origination upstream of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGrant {
    pub call_sid: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub to_number: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status probe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStatusRecord {
    #[serde(default)]
    pub status: String,
}
