//! Begin/save/cancel transaction around a time edit.
//!
//! `begin` snapshots the committed time as "original" and builds the two
//! wheels from it. While the session is open, drags and settles only move
//! the wheels; nothing persists. `commit` hands the drafted time to the
//! caller and closes the session; `cancel` closes it returning the original
//! untouched, with no network traffic. At most one edit session exists at a
//! time, so two schedule rows can never both have live wheels.

use log::info;

use crate::error::{Result, ScheduleError};
use crate::wheel::{WheelKind, WheelLayout, WheelState};

use super::{format_hhmm, CallSchedule};

struct EditSession {
    owner_id: String,
    original: CallSchedule,
    hour: WheelState,
    minute: WheelState,
}

impl EditSession {
    fn draft(&self) -> CallSchedule {
        CallSchedule::new(
            self.original.enabled,
            self.hour.committed_value(),
            self.minute.committed_value(),
        )
    }
}

/// The single edit-session slot.
#[derive(Default)]
pub struct ScheduleEditor {
    session: Option<EditSession>,
}

impl ScheduleEditor {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Owner of the open session, if any.
    pub fn owner_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.owner_id.as_str())
    }

    /// Open an edit session on `committed`, building wheels positioned at
    /// its hour and minute.
    pub fn begin(
        &mut self,
        owner_id: &str,
        committed: CallSchedule,
        hour_layout: WheelLayout,
        minute_layout: WheelLayout,
    ) -> Result<()> {
        if self.session.is_some() {
            return Err(ScheduleError::EditInProgress.into());
        }
        info!(
            "edit session opened for {owner_id} at {}",
            committed.time_string()
        );
        self.session = Some(EditSession {
            owner_id: owner_id.to_string(),
            original: committed,
            hour: WheelState::hours(hour_layout, committed.hour),
            minute: WheelState::minutes(minute_layout, committed.minute),
        });
        Ok(())
    }

    /// Mid-drag scroll update. Returns the new candidate value when the
    /// highlight crossed into a different row; `None` outside an edit
    /// session or within the same row.
    pub fn drag(&mut self, wheel: WheelKind, offset: f32) -> Option<u8> {
        let session = self.session.as_mut()?;
        match wheel {
            WheelKind::Hour => session.hour.drag_to(offset),
            WheelKind::Minute => session.minute.drag_to(offset),
        }
    }

    /// Drag-momentum settle: commits the centered row on that wheel and
    /// returns the combined draft as `"HH:MM"`.
    pub fn settle(&mut self, wheel: WheelKind, offset: f32) -> Option<String> {
        let session = self.session.as_mut()?;
        match wheel {
            WheelKind::Hour => {
                session.hour.settle_at(offset);
            }
            WheelKind::Minute => {
                session.minute.settle_at(offset);
            }
        }
        Some(format_hhmm(
            session.hour.committed_value(),
            session.minute.committed_value(),
        ))
    }

    /// The drafted schedule: wheel-committed time on the original's switch
    /// position.
    pub fn draft(&self) -> Option<CallSchedule> {
        self.session.as_ref().map(EditSession::draft)
    }

    /// The snapshot taken at `begin`.
    pub fn original(&self) -> Option<CallSchedule> {
        self.session.as_ref().map(|s| s.original)
    }

    /// Offsets for the one-time programmatic scroll after the wheels mount:
    /// `(hour, minute)`.
    pub fn mount_offsets(&self) -> Option<(f32, f32)> {
        self.session
            .as_ref()
            .map(|s| (s.hour.mount_scroll_offset(), s.minute.mount_scroll_offset()))
    }

    /// Close the session, handing the draft to the caller for persistence.
    pub fn commit(&mut self) -> Result<(String, CallSchedule)> {
        let session = self.session.take().ok_or(ScheduleError::NoEditOpen)?;
        let draft = session.draft();
        info!(
            "edit session committed for {}: {}",
            session.owner_id,
            draft.time_string()
        );
        Ok((session.owner_id, draft))
    }

    /// Close the session, restoring the original. No network call happens
    /// on this path.
    pub fn cancel(&mut self) -> Result<(String, CallSchedule)> {
        let session = self.session.take().ok_or(ScheduleError::NoEditOpen)?;
        info!("edit session cancelled for {}", session.owner_id);
        Ok((session.owner_id, session.original))
    }
}

// ── Tests ────────────────────────────────────────────────────
