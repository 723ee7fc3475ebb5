//! Integration tests for the call flow: command → controller → session,
//! with status polling driven by the control tick.

use carelink::app::commands::AppCommand;
use carelink::app::events::AppEvent;
use carelink::app::ports::{CallReply, Reply};
use carelink::app::service::AppService;
use carelink::call::session::CallPhase;
use carelink::call::{CallGrant, CallStatusRecord};
use carelink::config::ClientConfig;
use carelink::error::{CallFailureKind, RemoteError};

use crate::mock_ports::{FixedIdentity, MockBackend, MockNavigator, RecordingSink};

struct Rig {
    service: AppService,
    backend: MockBackend,
    navigator: MockNavigator,
    sink: RecordingSink,
    identity: FixedIdentity,
    poll_interval: u64,
}

impl Rig {
    fn new() -> Self {
        let config = ClientConfig::default();
        Self {
            service: AppService::new(&config),
            backend: MockBackend::new(),
            navigator: MockNavigator::default(),
            sink: RecordingSink::new(),
            identity: FixedIdentity::owner("owner-1", "01012345678"),
            poll_interval: config.poll_interval_ticks(),
        }
    }

    fn command(&mut self, cmd: AppCommand) {
        // Schedule traffic is irrelevant to these tests; it goes to a
        // throwaway gateway.
        let mut schedules = MockBackend::new();
        self.service.handle_command(
            cmd,
            &self.identity,
            &mut self.backend,
            &mut schedules,
            &mut self.sink,
        );
    }

    fn reply(&mut self, reply: Reply) {
        let mut schedules = MockBackend::new();
        self.service
            .handle_reply(reply, &mut schedules, &mut self.navigator, &mut self.sink);
    }

    /// Start a call and resolve origination with the given sid.
    fn connect(&mut self, sid: &str) {
        self.command(AppCommand::StartCall);
        assert_eq!(self.service.call_phase(), CallPhase::Calling);
        self.reply(Reply::Call(CallReply::Originated(Ok(grant(sid)))));
        assert_eq!(self.service.call_phase(), CallPhase::InProgress);
    }

    /// Tick through one full poll interval.
    fn tick_one_interval(&mut self) {
        for _ in 0..self.poll_interval {
            self.service.tick(&mut self.backend, &mut self.sink);
        }
    }
}

fn grant(sid: &str) -> CallGrant {
    CallGrant {
        call_sid: sid.to_string(),
        status: "queued".to_string(),
        to_number: "+821012345678".to_string(),
        message: None,
    }
}

fn status_reply(status: &str) -> Reply {
    Reply::Call(CallReply::Status(Ok(CallStatusRecord {
        status: status.to_string(),
    })))
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn empty_number_issues_no_request_and_stays_idle() {
    let mut rig = Rig::new();
    rig.identity = FixedIdentity::owner("owner-1", "   ");

    rig.command(AppCommand::StartCall);

    assert_eq!(rig.service.call_phase(), CallPhase::Idle);
    assert!(rig.backend.originations.is_empty());
    assert!(rig.sink.contains(&AppEvent::ValidationFailed {
        message: "phone number is required".to_string(),
    }));
}

#[test]
fn signed_out_owner_cannot_start_a_call() {
    let mut rig = Rig::new();
    rig.identity = FixedIdentity::signed_out();

    rig.command(AppCommand::StartCall);

    assert_eq!(rig.service.call_phase(), CallPhase::Idle);
    assert!(rig.backend.originations.is_empty());
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn completed_call_navigates_to_the_composer() {
    let mut rig = Rig::new();
    rig.connect("CA900");

    rig.tick_one_interval();
    assert_eq!(rig.backend.take_status_fetches(), vec!["CA900".to_string()]);

    rig.reply(status_reply("completed"));

    assert_eq!(rig.service.call_phase(), CallPhase::Completed);
    assert!(!rig.service.is_polling());
    assert_eq!(rig.navigator.opened, vec!["CA900".to_string()]);
}

#[test]
fn origination_request_carries_the_normalized_number() {
    let mut rig = Rig::new();
    rig.command(AppCommand::StartCall);

    assert_eq!(rig.backend.originations.len(), 1);
    assert_eq!(rig.backend.originations[0].to_number, "+821012345678");
    assert_eq!(rig.backend.originations[0].user_id, "owner-1");
}

#[test]
fn dependent_call_uses_the_supplied_identity_not_the_signed_in_owner() {
    let mut rig = Rig::new();

    rig.command(AppCommand::StartCallTo {
        owner_id: "dependent-3".to_string(),
        phone_number: "010-9876-5432".to_string(),
    });

    assert_eq!(rig.service.call_phase(), CallPhase::Calling);
    assert_eq!(rig.backend.originations.len(), 1);
    assert_eq!(rig.backend.originations[0].user_id, "dependent-3");
    assert_eq!(rig.backend.originations[0].to_number, "+821098765432");
}

#[test]
fn dependent_call_with_empty_number_is_rejected_locally() {
    let mut rig = Rig::new();

    rig.command(AppCommand::StartCallTo {
        owner_id: "dependent-3".to_string(),
        phone_number: "  ".to_string(),
    });

    assert_eq!(rig.service.call_phase(), CallPhase::Idle);
    assert!(rig.backend.originations.is_empty());
    assert!(rig.sink.contains(&AppEvent::ValidationFailed {
        message: "phone number is required".to_string(),
    }));
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn failed_status_on_third_poll_stops_polling_that_tick() {
    let mut rig = Rig::new();
    rig.connect("CA901");

    for expected in ["ringing", "ringing", "failed"] {
        rig.tick_one_interval();
        rig.reply(status_reply(expected));
    }

    assert_eq!(rig.backend.status_fetches.len(), 3);
    assert_eq!(rig.service.call_phase(), CallPhase::Error);
    assert!(!rig.service.is_polling(), "polling stops on the same tick");
    assert_eq!(
        rig.service.call_error_message(),
        Some(CallFailureKind::Failed.message())
    );

    // No further fetches, ever.
    rig.tick_one_interval();
    assert_eq!(rig.backend.status_fetches.len(), 3);
}

#[test]
fn busy_status_renders_the_declined_message() {
    let mut rig = Rig::new();
    rig.connect("CA902");
    rig.tick_one_interval();

    rig.reply(status_reply("busy"));

    assert!(rig
        .sink
        .failure_messages()
        .contains(&CallFailureKind::Rejected.message()));
    assert!(rig.navigator.opened.is_empty());
}

#[test]
fn origination_failure_surfaces_detail_and_ends_the_attempt() {
    let mut rig = Rig::new();
    rig.command(AppCommand::StartCall);

    rig.reply(Reply::Call(CallReply::Originated(Err(RemoteError::message(
        "destination unreachable",
    )))));

    assert_eq!(rig.service.call_phase(), CallPhase::Error);
    assert!(!rig.service.is_polling());
    assert!(rig
        .sink
        .failure_messages()
        .contains(&"destination unreachable"));
}

// ── Transient errors ──────────────────────────────────────────

#[test]
fn transient_fetch_failure_is_invisible_and_polling_continues() {
    let mut rig = Rig::new();
    rig.connect("CA903");

    rig.tick_one_interval();
    rig.reply(Reply::Call(CallReply::Status(Err(RemoteError::message(
        "connection reset",
    )))));

    assert_eq!(rig.service.call_phase(), CallPhase::InProgress);
    assert!(rig.service.is_polling());
    assert!(rig.sink.failure_messages().is_empty(), "never surfaced");

    // Next interval probes again.
    rig.tick_one_interval();
    assert_eq!(rig.backend.status_fetches.len(), 2);
}

// ── Bounded polling ───────────────────────────────────────────

#[test]
fn polling_is_bounded_at_sixty_fetches_then_times_out() {
    let config = ClientConfig::default();
    let mut rig = Rig::new();
    rig.connect("CA904");

    // Ride out the whole budget plus the exhaustion boundary without ever
    // answering a status probe.
    for _ in 0..=config.status_poll_limit {
        rig.tick_one_interval();
    }

    assert_eq!(rig.backend.status_fetches.len(), 60, "exactly the budget");
    assert_eq!(rig.service.call_phase(), CallPhase::TimedOut);
    assert!(!rig.service.is_polling());
    assert!(rig
        .sink
        .failure_messages()
        .contains(&CallFailureKind::TimedOut.message()));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn leaving_the_view_cancels_the_timer_but_keeps_the_phase() {
    let mut rig = Rig::new();
    rig.connect("CA905");

    rig.command(AppCommand::LeaveCallView);

    assert!(!rig.service.is_polling());
    assert_eq!(rig.service.call_phase(), CallPhase::InProgress);

    rig.tick_one_interval();
    assert!(rig.backend.status_fetches.is_empty());
}

#[test]
fn reset_from_a_terminal_phase_returns_to_idle() {
    let mut rig = Rig::new();
    rig.connect("CA906");
    rig.tick_one_interval();
    rig.reply(status_reply("no-answer"));
    assert_eq!(rig.service.call_phase(), CallPhase::Error);

    rig.command(AppCommand::ResetCall);

    assert_eq!(rig.service.call_phase(), CallPhase::Idle);
    assert_eq!(rig.service.call_error_message(), None);
}

#[test]
fn starting_a_new_attempt_replaces_a_running_one() {
    let mut rig = Rig::new();
    rig.connect("CA907");
    rig.tick_one_interval();
    assert_eq!(rig.backend.status_fetches.len(), 1);

    rig.command(AppCommand::StartCall);
    assert_eq!(rig.service.call_phase(), CallPhase::Calling);
    assert!(!rig.service.is_polling(), "old timer cancelled");

    // A status reply for the torn-down attempt is dropped.
    rig.reply(status_reply("completed"));
    assert_eq!(rig.service.call_phase(), CallPhase::Calling);
    assert!(rig.navigator.opened.is_empty());
}
