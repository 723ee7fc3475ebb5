//! Call session controller.
//!
//! Owns the [`CallSession`] and the [`StatusPoller`] for the one active
//! attempt. The poll timer never leaves this module: views observe session
//! phase through events and never touch the timer, so tearing a view down
//! or starting a new attempt always cancels the previous schedule and no
//! two pollers can run for the same owner.
//!
//! Guard rules enforced here:
//! - `initiate` validates the number first; an empty number is rejected
//!   locally and no request is issued.
//! - While the originate round trip is unresolved (phase `Calling`), both
//!   `initiate` and `reset` are refused — that single round trip cannot be
//!   abandoned.
//! - From any other phase, `initiate` starts over: stop the poller, reset
//!   the session, begin fresh.
//! - A failed status fetch is logged and swallowed; the next interval
//!   retries. Only an observed terminal status or budget exhaustion ends
//!   the poll phase.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{CallGateway, EventSink, Navigator};
use crate::config::ClientConfig;
use crate::error::{CallError, RemoteError, Result};

use super::poller::{PollDecision, StatusPoller};
use super::session::{CallPhase, CallSession};
use super::status::{self, StatusClass};
use super::{CallGrant, CallStatusRecord, DialPlan, OriginateRequest};

/// Drives one call attempt end to end.
pub struct CallController {
    session: CallSession,
    poller: StatusPoller,
    dial_plan: DialPlan,
}

impl CallController {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            session: CallSession::new(),
            poller: StatusPoller::from_config(config),
            dial_plan: DialPlan::new(config),
        }
    }

    pub fn session(&self) -> &CallSession {
        &self.session
    }

    pub fn phase(&self) -> CallPhase {
        self.session.phase()
    }

    /// Whether the status poll timer is currently armed.
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Status fetches issued for the current attempt.
    pub fn polls_issued(&self) -> u32 {
        self.poller.fires()
    }

    // ── Actions ───────────────────────────────────────────────

    /// Start a call attempt to `raw_phone` on behalf of `owner_id`.
    ///
    /// Validation failures return an error without touching the session or
    /// the network. A previous attempt in any phase but `Calling` is torn
    /// down and replaced.
    pub fn initiate(
        &mut self,
        raw_phone: &str,
        owner_id: &str,
        gateway: &mut impl CallGateway,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if self.session.phase() == CallPhase::Calling {
            return Err(CallError::AttemptInFlight.into());
        }
        let number = self.dial_plan.normalize(raw_phone)?;

        self.poller.stop();
        let from = self.session.phase();
        if self.session.reset() {
            sink.emit(&AppEvent::CallPhaseChanged {
                from,
                to: CallPhase::Idle,
            });
        }

        self.session.begin(number.clone(), owner_id.to_string());
        sink.emit(&AppEvent::CallPhaseChanged {
            from: CallPhase::Idle,
            to: CallPhase::Calling,
        });
        info!("originating call to {number} for owner {owner_id}");
        gateway.originate(OriginateRequest {
            to_number: number,
            user_id: owner_id.to_string(),
        });
        Ok(())
    }

    /// Return to Idle for a fresh attempt. Refused while the originate
    /// round trip is unresolved.
    pub fn reset(&mut self, sink: &mut impl EventSink) -> Result<()> {
        if self.session.phase() == CallPhase::Calling {
            return Err(CallError::AttemptInFlight.into());
        }
        self.poller.stop();
        let from = self.session.phase();
        if self.session.reset() {
            sink.emit(&AppEvent::CallPhaseChanged {
                from,
                to: CallPhase::Idle,
            });
        }
        Ok(())
    }

    /// The owning view is going away; cancel polling but keep the session
    /// phase for whoever looks at it next.
    pub fn teardown(&mut self) {
        self.poller.stop();
    }

    // ── Tick ──────────────────────────────────────────────────

    /// Advance the poll timer by one control tick, issuing a status fetch
    /// or timing the attempt out as the timer dictates.
    pub fn tick(&mut self, gateway: &mut impl CallGateway, sink: &mut impl EventSink) {
        match self.poller.tick() {
            PollDecision::Idle => {}
            PollDecision::Fire => match self.session.session_id() {
                Some(sid) => gateway.fetch_status(sid),
                None => {
                    warn!("poll fired without a session id; stopping");
                    self.poller.stop();
                }
            },
            PollDecision::Exhausted => {
                let from = self.session.phase();
                if self.session.time_out() {
                    sink.emit(&AppEvent::CallPhaseChanged {
                        from,
                        to: CallPhase::TimedOut,
                    });
                    self.emit_failure(sink);
                }
            }
        }
    }

    // ── Reply handling ────────────────────────────────────────

    /// Outcome of the originate request.
    pub fn handle_originated(
        &mut self,
        result: core::result::Result<CallGrant, RemoteError>,
        sink: &mut impl EventSink,
    ) {
        if self.session.phase() != CallPhase::Calling {
            debug!("originate reply ignored in {}", self.session.phase().name());
            return;
        }
        match result {
            Ok(grant) if !grant.call_sid.is_empty() => {
                self.session.connect(grant.call_sid);
                self.poller.start();
                sink.emit(&AppEvent::CallPhaseChanged {
                    from: CallPhase::Calling,
                    to: CallPhase::InProgress,
                });
            }
            Ok(_) => {
                warn!("origination response carried no call sid");
                self.fail_attempt(CallPhase::Calling, crate::error::GENERIC_REMOTE_MESSAGE, sink);
            }
            Err(remote) => {
                warn!("origination failed: {remote}");
                self.fail_attempt(CallPhase::Calling, remote.user_message(), sink);
            }
        }
    }

    /// Outcome of one status probe. Transport failures are transient by
    /// policy: log and let the next interval retry.
    pub fn handle_status(
        &mut self,
        result: core::result::Result<CallStatusRecord, RemoteError>,
        navigator: &mut impl Navigator,
        sink: &mut impl EventSink,
    ) {
        if self.session.phase() != CallPhase::InProgress {
            debug!("status reply ignored in {}", self.session.phase().name());
            return;
        }
        let record = match result {
            Ok(record) => record,
            Err(remote) => {
                warn!("status fetch failed, retrying next interval: {remote}");
                return;
            }
        };

        match status::classify(&record.status) {
            StatusClass::Pending => {}
            StatusClass::Completed => {
                self.poller.stop();
                self.session.complete();
                sink.emit(&AppEvent::CallPhaseChanged {
                    from: CallPhase::InProgress,
                    to: CallPhase::Completed,
                });
                match self.session.session_id() {
                    Some(sid) => navigator.open_composer(sid),
                    None => warn!("completed without a session id; composer skipped"),
                }
            }
            StatusClass::Failed(kind) => {
                self.poller.stop();
                self.fail_attempt(CallPhase::InProgress, kind.message(), sink);
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn fail_attempt(&mut self, from: CallPhase, message: &str, sink: &mut impl EventSink) {
        if self.session.fail(message.to_string()) {
            sink.emit(&AppEvent::CallPhaseChanged {
                from,
                to: CallPhase::Error,
            });
            self.emit_failure(sink);
        }
    }

    fn emit_failure(&self, sink: &mut impl EventSink) {
        let message = self
            .session
            .error_message()
            .unwrap_or(crate::error::GENERIC_REMOTE_MESSAGE)
            .to_string();
        sink.emit(&AppEvent::CallFailed { message });
    }
}

// ── Tests ────────────────────────────────────────────────────
