//! Call-attempt state machine.
//!
//! One [`CallSession`] models one attempted call from initiation to a
//! terminal outcome. Transitions happen only along these edges:
//!
//! ```text
//!            begin              connect
//!   Idle ──────────▶ Calling ──────────▶ InProgress
//!    ▲                  │                 │  │  │
//!    │                  │ fail            │  │  └─ time_out ──▶ TimedOut
//!    │                  ▼                 │  └──── fail ──────▶ Error
//!    │                Error ◀─────────────┘        complete ──▶ Completed
//!    │                                                            │
//!    └──────────────── reset (from any phase except Calling) ─────┘
//! ```
//!
//! The originate round trip cannot be abandoned: `reset` is rejected while
//! the phase is `Calling`. Every other phase may be reset to start a fresh
//! attempt. Terminal phases accept no transition except that reset.
//!
//! Each transition method returns whether it happened; a rejected
//! transition leaves the session untouched and logs the refusal so a
//! misbehaving caller shows up in the logs instead of corrupting state.

use log::{info, warn};

use crate::error::CallFailureKind;

/// Lifecycle phase of a call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallPhase {
    /// No attempt in progress.
    Idle,
    /// Originate request issued, response not yet resolved.
    Calling,
    /// Origination accepted; status polling drives the outcome.
    InProgress,
    /// The call ran to completion.
    Completed,
    /// The attempt failed (origination error or terminal failure status).
    Error,
    /// The polling budget ran out without a terminal status.
    TimedOut,
}

impl CallPhase {
    /// Terminal phases accept no automatic transition, only an explicit
    /// reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error | Self::TimedOut)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Calling => "Calling",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Error => "Error",
            Self::TimedOut => "TimedOut",
        }
    }
}

/// State of one call attempt.
#[derive(Debug, Clone)]
pub struct CallSession {
    phase: CallPhase,
    session_id: Option<String>,
    phone_number: String,
    owner_id: String,
    error_message: Option<String>,
}

impl Default for CallSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CallSession {
    pub fn new() -> Self {
        Self {
            phase: CallPhase::Idle,
            session_id: None,
            phone_number: String::new(),
            owner_id: String::new(),
            error_message: None,
        }
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Provider identifier, assigned when origination succeeds.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Normalized number being dialed in the current attempt.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Message for the failure view; `Some` only in `Error` and `TimedOut`.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // ── Transitions ───────────────────────────────────────────

    /// Idle → Calling. The number must already be normalized and non-empty.
    pub fn begin(&mut self, phone_number: String, owner_id: String) -> bool {
        if self.phase() != CallPhase::Idle {
            return self.refuse("begin");
        }
        debug_assert!(!phone_number.is_empty(), "validation happens upstream");
        self.phone_number = phone_number;
        self.owner_id = owner_id;
        self.transition(CallPhase::Calling)
    }

    /// Calling → InProgress, recording the provider session id.
    pub fn connect(&mut self, session_id: String) -> bool {
        if self.phase() != CallPhase::Calling {
            return self.refuse("connect");
        }
        self.session_id = Some(session_id);
        self.transition(CallPhase::InProgress)
    }

    /// Calling | InProgress → Error with a user-facing message.
    pub fn fail(&mut self, message: String) -> bool {
        if !matches!(self.phase(), CallPhase::Calling | CallPhase::InProgress) {
            return self.refuse("fail");
        }
        self.error_message = Some(message);
        self.transition(CallPhase::Error)
    }

    /// InProgress → Completed.
    pub fn complete(&mut self) -> bool {
        if self.phase() != CallPhase::InProgress {
            return self.refuse("complete");
        }
        self.transition(CallPhase::Completed)
    }

    /// InProgress → TimedOut, when the poll budget runs out.
    pub fn time_out(&mut self) -> bool {
        if self.phase() != CallPhase::InProgress {
            return self.refuse("time_out");
        }
        self.error_message = Some(CallFailureKind::TimedOut.message().to_string());
        self.transition(CallPhase::TimedOut)
    }

    /// Any phase except Calling → Idle, clearing all attempt state.
    pub fn reset(&mut self) -> bool {
        if self.phase() == CallPhase::Calling {
            return self.refuse("reset");
        }
        self.session_id = None;
        self.phone_number.clear();
        self.owner_id.clear();
        self.error_message = None;
        if self.phase() == CallPhase::Idle {
            return false;
        }
        self.transition(CallPhase::Idle)
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(&mut self, next: CallPhase) -> bool {
        info!("call session: {} -> {}", self.phase.name(), next.name());
        self.phase = next;
        true
    }

    fn refuse(&self, op: &str) -> bool {
        warn!("call session: {op} rejected in {}", self.phase().name());
        false
    }
}
