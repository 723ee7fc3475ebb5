//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — update a view model, write a log line,
//! feed an analytics pipeline.

use crate::call::session::CallPhase;
use crate::schedule::CallSchedule;
use crate::wheel::WheelKind;

/// Structured events emitted by the client core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The call session moved between phases.
    CallPhaseChanged { from: CallPhase, to: CallPhase },

    /// The call attempt ended in failure; `message` is what the failure
    /// view renders.
    CallFailed { message: String },

    /// A local guard rejected the action before any request was issued.
    ValidationFailed { message: String },

    /// The schedule for `owner_id` is ready to render (fresh load or
    /// post-failure resync).
    ScheduleLoaded {
        owner_id: String,
        schedule: CallSchedule,
    },

    /// A schedule save round trip succeeded.
    ScheduleSaved {
        owner_id: String,
        schedule: CallSchedule,
    },

    /// A schedule save failed; the store is resynchronizing from remote.
    ScheduleSaveFailed { message: String },

    /// An edit session opened for `owner_id`.
    EditStarted { owner_id: String },

    /// The edit session closed. `committed` is false for cancel.
    EditEnded { committed: bool },

    /// A wheel drag moved the highlight onto a new candidate row.
    WheelHighlight { wheel: WheelKind, value: u8 },

    /// A wheel settled and the combined draft time was committed upward.
    TimeCommitted { time: String },
}
