//! Mock port adapters for integration tests.
//!
//! Every outbound request is recorded so tests can assert on the full
//! traffic history; replies are constructed by the tests themselves and
//! fed back through `AppService::handle_reply`, exactly the way a real
//! runtime loop drains its completion mailbox.

use carelink::app::events::AppEvent;
use carelink::app::ports::{
    CallGateway, EventSink, IdentityPort, Navigator, OwnerProfile, ScheduleGateway,
};
use carelink::call::OriginateRequest;
use carelink::schedule::ScheduleRecord;

// ── Backend (CallGateway + ScheduleGateway) ───────────────────

/// Records every request issued through either gateway port.
#[derive(Default)]
pub struct MockBackend {
    pub originations: Vec<OriginateRequest>,
    pub status_fetches: Vec<String>,
    pub schedule_loads: Vec<String>,
    pub schedule_saves: Vec<(String, ScheduleRecord)>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status fetches issued since the last call, oldest first.
    pub fn take_status_fetches(&mut self) -> Vec<String> {
        std::mem::take(&mut self.status_fetches)
    }

    pub fn last_save(&self) -> Option<&(String, ScheduleRecord)> {
        self.schedule_saves.last()
    }
}

impl CallGateway for MockBackend {
    fn originate(&mut self, request: OriginateRequest) {
        self.originations.push(request);
    }

    fn fetch_status(&mut self, call_sid: &str) {
        self.status_fetches.push(call_sid.to_string());
    }
}

impl ScheduleGateway for MockBackend {
    fn load_schedule(&mut self, owner_id: &str) {
        self.schedule_loads.push(owner_id.to_string());
    }

    fn save_schedule(&mut self, owner_id: &str, record: &ScheduleRecord) {
        self.schedule_saves.push((owner_id.to_string(), record.clone()));
    }
}

// ── Event sink ────────────────────────────────────────────────

/// Captures emitted events for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn failure_messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CallFailed { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Navigator ─────────────────────────────────────────────────

/// Records composer navigations.
#[derive(Default)]
pub struct MockNavigator {
    pub opened: Vec<String>,
}

impl Navigator for MockNavigator {
    fn open_composer(&mut self, session_id: &str) {
        self.opened.push(session_id.to_string());
    }
}

// ── Identity ──────────────────────────────────────────────────

/// Fixed signed-in owner.
pub struct FixedIdentity {
    pub profile: Option<OwnerProfile>,
}

#[allow(dead_code)]
impl FixedIdentity {
    pub fn owner(user_id: &str, phone_number: &str) -> Self {
        Self {
            profile: Some(OwnerProfile {
                user_id: user_id.to_string(),
                phone_number: phone_number.to_string(),
            }),
        }
    }

    pub fn signed_out() -> Self {
        Self { profile: None }
    }
}

impl IdentityPort for FixedIdentity {
    fn owner_profile(&self) -> Option<OwnerProfile> {
        self.profile.clone()
    }
}
