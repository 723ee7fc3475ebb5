//! Inbound commands to the application service.
//!
//! These represent user actions arriving from the shell (button taps, wheel
//! gestures, screen lifecycle) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::wheel::{WheelKind, WheelLayout};

/// Commands the shell can send into the client core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Place a call to the current owner (number comes from the identity
    /// port).
    StartCall,

    /// Place a call on behalf of a managed dependent; the shell supplies
    /// the dependent's identifier and number.
    StartCallTo {
        owner_id: String,
        phone_number: String,
    },

    /// Return the call view to Idle for a fresh attempt.
    ResetCall,

    /// The call view is being torn down; cancel any status polling.
    LeaveCallView,

    /// The schedule view became active; (re)load the owner's schedule.
    EnterScheduleView,

    /// The schedule view became active for a managed dependent.
    EnterScheduleViewFor { owner_id: String },

    /// Flip the schedule on/off switch.
    ToggleSchedule,

    /// Open the wheel editor on the owner's committed time. Layouts are
    /// measured by the shell at mount time.
    BeginEdit {
        hour_layout: WheelLayout,
        minute_layout: WheelLayout,
    },

    /// A wheel scroll position changed mid-drag.
    WheelDragged { wheel: WheelKind, offset: f32 },

    /// A wheel's drag momentum settled at a rest offset.
    WheelSettled { wheel: WheelKind, offset: f32 },

    /// Persist the drafted time (when the schedule is enabled) and close
    /// the editor.
    SaveEdit,

    /// Close the editor, restoring the original time.
    CancelEdit,
}
