//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the process logger. The shell's view-model adapter implements the same
//! trait; this one is what the headless binary and soak tests run with.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CallPhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            AppEvent::CallFailed { message } => {
                info!("CALL  | failed: {}", message);
            }
            AppEvent::ValidationFailed { message } => {
                info!("INPUT | rejected: {}", message);
            }
            AppEvent::ScheduleLoaded { owner_id, schedule } => {
                info!(
                    "SCHED | loaded owner={} enabled={} time={}",
                    owner_id,
                    schedule.enabled,
                    schedule.time_string(),
                );
            }
            AppEvent::ScheduleSaved { owner_id, schedule } => {
                info!(
                    "SCHED | saved owner={} enabled={} time={}",
                    owner_id,
                    schedule.enabled,
                    schedule.time_string(),
                );
            }
            AppEvent::ScheduleSaveFailed { message } => {
                info!("SCHED | save failed: {}", message);
            }
            AppEvent::EditStarted { owner_id } => {
                info!("EDIT  | opened owner={}", owner_id);
            }
            AppEvent::EditEnded { committed } => {
                info!("EDIT  | closed committed={}", committed);
            }
            AppEvent::WheelHighlight { wheel, value } => {
                info!("WHEEL | {:?} highlight {:02}", wheel, value);
            }
            AppEvent::TimeCommitted { time } => {
                info!("WHEEL | settled at {}", time);
            }
        }
    }
}
