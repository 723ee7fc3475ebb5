//! Schedule persistence with optimistic updates.
//!
//! Holds the one owner's schedule the UI is currently looking at. A save
//! flips the local value immediately (the switch moves under the user's
//! finger, not after the round trip); a `busy` flag disables the control
//! surface until the save resolves, serializing concurrent toggles instead
//! of queueing them. On save failure the store does not try to undo
//! locally — it refetches from the remote and lets the authoritative value
//! win.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, ScheduleGateway};
use crate::config::ClientConfig;
use crate::error::{RemoteError, Result, ScheduleError};

use super::{parse_hhmm, CallSchedule, ScheduleRecord};

/// Local copy of one owner's schedule plus in-flight bookkeeping.
pub struct ScheduleStore {
    owner_id: Option<String>,
    schedule: CallSchedule,
    fallback: CallSchedule,
    busy: bool,
    loaded: bool,
}

impl ScheduleStore {
    pub fn new(config: &ClientConfig) -> Self {
        let fallback = match parse_hhmm(&config.default_call_time) {
            Some((hour, minute)) => CallSchedule::new(false, hour, minute),
            None => CallSchedule::default(),
        };
        Self {
            owner_id: None,
            schedule: fallback,
            fallback,
            busy: false,
            loaded: false,
        }
    }

    /// The schedule as currently displayed (may be an optimistic value with
    /// a save still in flight).
    pub fn schedule(&self) -> CallSchedule {
        self.schedule
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// A save round trip is unresolved; the control surface is disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// At least one load has completed for the current owner.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // ── Loading ───────────────────────────────────────────────

    /// Fetch the schedule for `owner_id`. Switching owners discards the
    /// previous owner's state first.
    pub fn begin_load(&mut self, owner_id: &str, gateway: &mut impl ScheduleGateway) {
        if self.owner_id.as_deref() != Some(owner_id) {
            self.owner_id = Some(owner_id.to_string());
            self.schedule = self.fallback;
            self.loaded = false;
            self.busy = false;
        }
        gateway.load_schedule(owner_id);
    }

    /// Load outcome. An absent row maps to the disabled fallback; a failed
    /// load keeps whatever is currently displayed. Either way the UI gets a
    /// fresh [`AppEvent::ScheduleLoaded`] to render.
    pub fn handle_loaded(
        &mut self,
        owner_id: &str,
        result: core::result::Result<Option<ScheduleRecord>, RemoteError>,
        sink: &mut impl EventSink,
    ) {
        if self.owner_id.as_deref() != Some(owner_id) {
            debug!("schedule load reply for {owner_id} ignored (owner changed)");
            return;
        }
        match result {
            Ok(Some(record)) => self.schedule = CallSchedule::from_record(&record),
            Ok(None) => self.schedule = self.fallback,
            Err(remote) => warn!("schedule load failed: {remote}"),
        }
        self.loaded = true;
        sink.emit(&AppEvent::ScheduleLoaded {
            owner_id: owner_id.to_string(),
            schedule: self.schedule,
        });
    }

    // ── Saving ────────────────────────────────────────────────

    /// Persist `{enabled, hour:minute}` for the current owner. The local
    /// value flips before the request resolves; the busy flag rejects any
    /// further save until it does.
    pub fn request_save(
        &mut self,
        enabled: bool,
        hour: u8,
        minute: u8,
        gateway: &mut impl ScheduleGateway,
    ) -> Result<()> {
        let owner_id = self
            .owner_id
            .clone()
            .ok_or(ScheduleError::NothingLoaded)?;
        if self.busy {
            return Err(ScheduleError::SaveInFlight.into());
        }

        self.schedule = CallSchedule::new(enabled, hour, minute);
        self.busy = true;
        info!(
            "saving schedule for {owner_id}: enabled={enabled} time={}",
            self.schedule.time_string()
        );
        gateway.save_schedule(&owner_id, &self.schedule.to_record());
        Ok(())
    }

    /// Save outcome. On failure the store resynchronizes by refetching;
    /// the optimistic value stays visible until the reload lands.
    pub fn handle_saved(
        &mut self,
        owner_id: &str,
        result: core::result::Result<(), RemoteError>,
        gateway: &mut impl ScheduleGateway,
        sink: &mut impl EventSink,
    ) {
        if self.owner_id.as_deref() != Some(owner_id) {
            debug!("schedule save reply for {owner_id} ignored (owner changed)");
            return;
        }
        self.busy = false;
        match result {
            Ok(()) => {
                info!("schedule saved for {owner_id}");
                sink.emit(&AppEvent::ScheduleSaved {
                    owner_id: owner_id.to_string(),
                    schedule: self.schedule,
                });
            }
            Err(remote) => {
                warn!("schedule save failed, resyncing: {remote}");
                sink.emit(&AppEvent::ScheduleSaveFailed {
                    message: remote.user_message().to_string(),
                });
                self.begin_load(owner_id, gateway);
            }
        }
    }

    /// Update the displayed time without persisting. Used when a drafted
    /// time is committed while the schedule is switched off.
    pub fn set_local_time(&mut self, hour: u8, minute: u8) {
        self.schedule = CallSchedule::new(self.schedule.enabled, hour, minute);
    }
}

// ── Tests ────────────────────────────────────────────────────
