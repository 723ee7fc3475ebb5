//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the call controller, the schedule store, and the
//! edit-session slot. It exposes a clean, shell-agnostic API: commands in,
//! events out, one `tick` per control cycle, and completed network
//! operations fed back through [`handle_reply`](AppService::handle_reply).
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  AppCommand ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │         AppService         │
//!  Reply ───────▶ │  calls · schedule · wheels │ ──▶ CallGateway /
//!                 └────────────────────────────┘     ScheduleGateway /
//!                                                    Navigator
//! ```

use log::warn;

use crate::call::controller::CallController;
use crate::call::session::CallPhase;
use crate::config::ClientConfig;
use crate::error::{Error, ScheduleError};
use crate::schedule::editor::ScheduleEditor;
use crate::schedule::store::ScheduleStore;
use crate::schedule::CallSchedule;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{
    CallGateway, CallReply, EventSink, IdentityPort, Navigator, Reply, ScheduleGateway,
    ScheduleReply,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    call: CallController,
    store: ScheduleStore,
    editor: ScheduleEditor,
    tick_count: u64,
}

impl AppService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            call: CallController::new(config),
            store: ScheduleStore::new(config),
            editor: ScheduleEditor::new(),
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle. The only recurring activity is the status
    /// poll timer inside the call controller.
    pub fn tick(&mut self, calls: &mut impl CallGateway, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.call.tick(calls, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a shell command (button tap, wheel gesture, view lifecycle).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        identity: &impl IdentityPort,
        calls: &mut impl CallGateway,
        schedules: &mut impl ScheduleGateway,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::StartCall => {
                let Some(profile) = identity.owner_profile() else {
                    self.reject(Error::Config("no signed-in owner"), sink);
                    return;
                };
                if let Err(e) =
                    self.call
                        .initiate(&profile.phone_number, &profile.user_id, calls, sink)
                {
                    self.reject(e, sink);
                }
            }

            AppCommand::StartCallTo {
                owner_id,
                phone_number,
            } => {
                if let Err(e) = self.call.initiate(&phone_number, &owner_id, calls, sink) {
                    self.reject(e, sink);
                }
            }

            AppCommand::ResetCall => {
                if let Err(e) = self.call.reset(sink) {
                    self.reject(e, sink);
                }
            }

            AppCommand::LeaveCallView => self.call.teardown(),

            AppCommand::EnterScheduleView => {
                let Some(profile) = identity.owner_profile() else {
                    self.reject(Error::Config("no signed-in owner"), sink);
                    return;
                };
                self.store.begin_load(&profile.user_id, schedules);
            }

            AppCommand::EnterScheduleViewFor { owner_id } => {
                self.store.begin_load(&owner_id, schedules);
            }

            AppCommand::ToggleSchedule => {
                let current = self.store.schedule();
                if let Err(e) = self.store.request_save(
                    !current.enabled,
                    current.hour,
                    current.minute,
                    schedules,
                ) {
                    self.reject(e, sink);
                }
            }

            AppCommand::BeginEdit {
                hour_layout,
                minute_layout,
            } => {
                let Some(owner_id) = self.store.owner_id().map(str::to_string) else {
                    self.reject(ScheduleError::NothingLoaded.into(), sink);
                    return;
                };
                let committed = self.store.schedule();
                match self
                    .editor
                    .begin(&owner_id, committed, hour_layout, minute_layout)
                {
                    Ok(()) => sink.emit(&AppEvent::EditStarted { owner_id }),
                    Err(e) => self.reject(e, sink),
                }
            }

            AppCommand::WheelDragged { wheel, offset } => {
                if let Some(value) = self.editor.drag(wheel, offset) {
                    sink.emit(&AppEvent::WheelHighlight { wheel, value });
                }
            }

            AppCommand::WheelSettled { wheel, offset } => {
                if let Some(time) = self.editor.settle(wheel, offset) {
                    sink.emit(&AppEvent::TimeCommitted { time });
                }
            }

            AppCommand::SaveEdit => {
                // Keep the draft alive if no save can be accepted right now.
                if self.store.is_busy() {
                    self.reject(ScheduleError::SaveInFlight.into(), sink);
                    return;
                }
                match self.editor.commit() {
                    Ok((_, draft)) => {
                        if draft.enabled {
                            if let Err(e) = self.store.request_save(
                                true,
                                draft.hour,
                                draft.minute,
                                schedules,
                            ) {
                                self.reject(e, sink);
                            }
                        } else {
                            // A disabled schedule keeps the new time locally
                            // and persists it with the next enable.
                            self.store.set_local_time(draft.hour, draft.minute);
                        }
                        sink.emit(&AppEvent::EditEnded { committed: true });
                    }
                    Err(e) => self.reject(e, sink),
                }
            }

            AppCommand::CancelEdit => match self.editor.cancel() {
                Ok(_) => sink.emit(&AppEvent::EditEnded { committed: false }),
                Err(e) => self.reject(e, sink),
            },
        }
    }

    // ── Reply handling ────────────────────────────────────────

    /// Feed a completed network operation back into the core.
    pub fn handle_reply(
        &mut self,
        reply: Reply,
        schedules: &mut impl ScheduleGateway,
        navigator: &mut impl Navigator,
        sink: &mut impl EventSink,
    ) {
        match reply {
            Reply::Call(CallReply::Originated(result)) => {
                self.call.handle_originated(result, sink);
            }
            Reply::Call(CallReply::Status(result)) => {
                self.call.handle_status(result, navigator, sink);
            }
            Reply::Schedule(ScheduleReply::Loaded { owner_id, result }) => {
                self.store.handle_loaded(&owner_id, result, sink);
            }
            Reply::Schedule(ScheduleReply::Saved { owner_id, result }) => {
                self.store.handle_saved(&owner_id, result, schedules, sink);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn call_phase(&self) -> CallPhase {
        self.call.phase()
    }

    /// Message for the failure view, when the last attempt ended badly.
    pub fn call_error_message(&self) -> Option<&str> {
        self.call.session().error_message()
    }

    /// Whether the status poll timer is armed.
    pub fn is_polling(&self) -> bool {
        self.call.is_polling()
    }

    pub fn schedule(&self) -> CallSchedule {
        self.store.schedule()
    }

    /// A schedule save is unresolved; the shell disables the toggle.
    pub fn schedule_busy(&self) -> bool {
        self.store.is_busy()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Targets for the one-time programmatic wheel scrolls after mount.
    pub fn wheel_mount_offsets(&self) -> Option<(f32, f32)> {
        self.editor.mount_offsets()
    }

    /// The in-edit draft, when an edit session is open.
    pub fn draft_schedule(&self) -> Option<CallSchedule> {
        self.editor.draft()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Local guard failures never change state; they surface as a message
    /// at the point of action.
    fn reject(&self, error: Error, sink: &mut impl EventSink) {
        warn!("command rejected: {error}");
        let message = match &error {
            Error::Call(e) => e.to_string(),
            Error::Schedule(e) => e.to_string(),
            other => other.to_string(),
        };
        sink.emit(&AppEvent::ValidationFailed { message });
    }
}
