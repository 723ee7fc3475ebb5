//! Integration tests for the schedule flow: load, optimistic toggle,
//! wheel-based time editing, and resync on save failure.

use carelink::app::commands::AppCommand;
use carelink::app::events::AppEvent;
use carelink::app::ports::{Reply, ScheduleReply};
use carelink::app::service::AppService;
use carelink::config::ClientConfig;
use carelink::error::RemoteError;
use carelink::schedule::{CallSchedule, ScheduleRecord};
use carelink::wheel::{WheelKind, WheelLayout};

use crate::mock_ports::{FixedIdentity, MockBackend, MockNavigator, RecordingSink};

struct Rig {
    service: AppService,
    backend: MockBackend,
    sink: RecordingSink,
    identity: FixedIdentity,
}

impl Rig {
    fn new() -> Self {
        Self {
            service: AppService::new(&ClientConfig::default()),
            backend: MockBackend::new(),
            sink: RecordingSink::new(),
            identity: FixedIdentity::owner("owner-1", "01012345678"),
        }
    }

    fn command(&mut self, cmd: AppCommand) {
        let mut calls = MockBackend::new();
        self.service.handle_command(
            cmd,
            &self.identity,
            &mut calls,
            &mut self.backend,
            &mut self.sink,
        );
    }

    fn reply(&mut self, reply: Reply) {
        let mut navigator = MockNavigator::default();
        self.service
            .handle_reply(reply, &mut self.backend, &mut navigator, &mut self.sink);
    }

    fn loaded(&mut self, record: Option<ScheduleRecord>) {
        self.reply(Reply::Schedule(ScheduleReply::Loaded {
            owner_id: "owner-1".to_string(),
            result: Ok(record),
        }));
    }

    fn enter_with(&mut self, record: ScheduleRecord) {
        self.command(AppCommand::EnterScheduleView);
        self.loaded(Some(record));
    }
}

fn layout() -> WheelLayout {
    WheelLayout::new(40.0, 200.0)
}

fn record(is_active: bool, call_time: &str) -> ScheduleRecord {
    ScheduleRecord {
        is_active,
        call_time: call_time.to_string(),
    }
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn absent_remote_row_defaults_to_disabled_fourteen_hundred() {
    let mut rig = Rig::new();
    rig.command(AppCommand::EnterScheduleView);
    assert_eq!(rig.backend.schedule_loads, vec!["owner-1".to_string()]);

    rig.loaded(None);

    assert_eq!(rig.service.schedule(), CallSchedule::new(false, 14, 0));
}

#[test]
fn loaded_record_is_rendered_to_the_shell() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "09:30"));

    assert!(rig.sink.contains(&AppEvent::ScheduleLoaded {
        owner_id: "owner-1".to_string(),
        schedule: CallSchedule::new(true, 9, 30),
    }));
}

#[test]
fn dependent_schedule_loads_and_saves_under_its_own_key() {
    let mut rig = Rig::new();

    // The caregiver opens a managed dependent's schedule view.
    rig.command(AppCommand::EnterScheduleViewFor {
        owner_id: "dependent-3".to_string(),
    });
    assert_eq!(rig.backend.schedule_loads, vec!["dependent-3".to_string()]);

    rig.reply(Reply::Schedule(ScheduleReply::Loaded {
        owner_id: "dependent-3".to_string(),
        result: Ok(Some(record(false, "10:00"))),
    }));
    assert_eq!(rig.service.schedule(), CallSchedule::new(false, 10, 0));

    rig.command(AppCommand::ToggleSchedule);
    let (owner, saved) = rig.backend.last_save().unwrap().clone();
    assert_eq!(owner, "dependent-3");
    assert_eq!(saved, record(true, "10:00"));
}

#[test]
fn switching_to_a_dependent_drops_the_signed_in_owners_state() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "09:30"));

    rig.command(AppCommand::EnterScheduleViewFor {
        owner_id: "dependent-3".to_string(),
    });

    assert_eq!(rig.service.schedule(), CallSchedule::new(false, 14, 0));

    // A late reply for the previous owner must not clobber the view.
    rig.loaded(Some(record(true, "09:30")));
    assert_eq!(rig.service.schedule(), CallSchedule::new(false, 14, 0));
}

// ── Toggling ──────────────────────────────────────────────────

#[test]
fn toggle_is_optimistic_and_disables_the_control() {
    let mut rig = Rig::new();
    rig.enter_with(record(false, "14:00"));

    rig.command(AppCommand::ToggleSchedule);

    assert!(rig.service.schedule().enabled, "flipped before the reply");
    assert!(rig.service.schedule_busy());
    assert_eq!(rig.backend.last_save().unwrap().1, record(true, "14:00"));
}

#[test]
fn second_toggle_while_busy_is_rejected_not_queued() {
    let mut rig = Rig::new();
    rig.enter_with(record(false, "14:00"));
    rig.command(AppCommand::ToggleSchedule);

    rig.command(AppCommand::ToggleSchedule);

    assert_eq!(rig.backend.schedule_saves.len(), 1, "no second request");
    assert!(rig.sink.contains(&AppEvent::ValidationFailed {
        message: "a save is already in flight".to_string(),
    }));
}

#[test]
fn failed_save_resyncs_from_the_remote() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "09:30"));
    rig.command(AppCommand::ToggleSchedule);

    rig.reply(Reply::Schedule(ScheduleReply::Saved {
        owner_id: "owner-1".to_string(),
        result: Err(RemoteError::message("write denied")),
    }));

    assert!(!rig.service.schedule_busy());
    assert!(rig.sink.contains(&AppEvent::ScheduleSaveFailed {
        message: "write denied".to_string(),
    }));
    assert_eq!(rig.backend.schedule_loads.len(), 2, "rollback is a refetch");

    // The authoritative value wins once the reload lands.
    rig.loaded(Some(record(true, "09:30")));
    assert_eq!(rig.service.schedule(), CallSchedule::new(true, 9, 30));
}

// ── Editing ───────────────────────────────────────────────────

#[test]
fn edit_save_reload_round_trip() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "14:00"));

    rig.command(AppCommand::BeginEdit {
        hour_layout: layout(),
        minute_layout: layout(),
    });
    assert!(rig.service.is_editing());

    // Hour wheel settles at row 7, minute wheel at row 3 (value 15).
    rig.command(AppCommand::WheelSettled {
        wheel: WheelKind::Hour,
        offset: layout().offset_for_index(7),
    });
    rig.command(AppCommand::WheelSettled {
        wheel: WheelKind::Minute,
        offset: layout().offset_for_index(3),
    });
    assert!(rig.sink.contains(&AppEvent::TimeCommitted {
        time: "07:15".to_string(),
    }));

    rig.command(AppCommand::SaveEdit);

    assert!(!rig.service.is_editing());
    assert_eq!(rig.backend.last_save().unwrap().1, record(true, "07:15"));

    rig.reply(Reply::Schedule(ScheduleReply::Saved {
        owner_id: "owner-1".to_string(),
        result: Ok(()),
    }));

    // A fresh view activation sees the persisted value.
    rig.command(AppCommand::EnterScheduleView);
    rig.loaded(Some(record(true, "07:15")));
    assert_eq!(rig.service.schedule(), CallSchedule::new(true, 7, 15));
}

#[test]
fn cancel_right_after_begin_changes_nothing() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "14:00"));
    let before = rig.service.schedule();

    rig.command(AppCommand::BeginEdit {
        hour_layout: layout(),
        minute_layout: layout(),
    });
    rig.command(AppCommand::CancelEdit);

    assert!(!rig.service.is_editing());
    assert_eq!(rig.service.schedule(), before);
    assert!(rig.backend.schedule_saves.is_empty(), "no network call");
}

#[test]
fn drag_highlights_without_committing() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "14:00"));
    rig.command(AppCommand::BeginEdit {
        hour_layout: layout(),
        minute_layout: layout(),
    });

    rig.command(AppCommand::WheelDragged {
        wheel: WheelKind::Hour,
        offset: layout().offset_for_index(9),
    });

    assert!(rig.sink.contains(&AppEvent::WheelHighlight {
        wheel: WheelKind::Hour,
        value: 9,
    }));
    assert_eq!(
        rig.service.draft_schedule(),
        Some(CallSchedule::new(true, 14, 0)),
        "no commit mid-drag"
    );
}

#[test]
fn saving_a_disabled_schedule_keeps_the_time_local() {
    let mut rig = Rig::new();
    rig.enter_with(record(false, "14:00"));
    rig.command(AppCommand::BeginEdit {
        hour_layout: layout(),
        minute_layout: layout(),
    });
    rig.command(AppCommand::WheelSettled {
        wheel: WheelKind::Hour,
        offset: layout().offset_for_index(8),
    });

    rig.command(AppCommand::SaveEdit);

    assert!(rig.backend.schedule_saves.is_empty(), "disabled: no write");
    assert_eq!(rig.service.schedule(), CallSchedule::new(false, 8, 0));
}

#[test]
fn wheel_mount_offsets_target_the_committed_time() {
    let mut rig = Rig::new();
    rig.enter_with(record(true, "09:30"));
    rig.command(AppCommand::BeginEdit {
        hour_layout: layout(),
        minute_layout: layout(),
    });

    let (hour, minute) = rig.service.wheel_mount_offsets().unwrap();
    assert_eq!(hour, layout().offset_for_index(9));
    assert_eq!(minute, layout().offset_for_index(6));
}
