//! CareLink headless client runner.
//!
//! Hexagonal architecture with a tick-driven core:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │   HttpBackend                LogEventSink                 │
//! │   (CallGateway +             (EventSink)                  │
//! │    ScheduleGateway)                                       │
//! │                                                           │
//! │  ──────────────── Port Trait Boundary ────────────────    │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────┐      │
//! │  │             AppService (pure logic)             │      │
//! │  │  CallController · StatusPoller · ScheduleStore  │      │
//! │  │  ScheduleEditor · wheel geometry                │      │
//! │  └─────────────────────────────────────────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Runs one scripted session against a live care service: load the
//! owner's schedule, place a call, ride it to a terminal phase. Used to
//! smoke-test a backend deployment without the mobile shell.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod call;
pub mod config;
pub mod error;
pub mod schedule;
pub mod wheel;

pub mod adapters;

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::{Context, Result};
use env_logger::Builder as LogBuilder;
use log::{info, LevelFilter};

use adapters::http::HttpBackend;
use adapters::log_sink::LogEventSink;
use app::commands::AppCommand;
use app::ports::{IdentityPort, Navigator, OwnerProfile};
use app::service::AppService;
use config::ClientConfig;

// ── Shell stand-ins ───────────────────────────────────────────
//
// The mobile shell implements these ports against its account store and
// router. The headless runner reads identity from the environment and
// logs the navigation it would have performed.

struct EnvIdentity {
    profile: OwnerProfile,
}

impl IdentityPort for EnvIdentity {
    fn owner_profile(&self) -> Option<OwnerProfile> {
        Some(self.profile.clone())
    }
}

struct ComposerLog;

impl Navigator for ComposerLog {
    fn open_composer(&mut self, session_id: &str) {
        info!("ROUTE | composer for session {}", session_id);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging + environment ──────────────────────────────
    LogBuilder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    info!("CareLink client v{}", env!("CARGO_PKG_VERSION"));

    let base_url = std::env::var("CARELINK_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let owner_id =
        std::env::var("CARELINK_OWNER").unwrap_or_else(|_| "owner-demo".to_string());
    let phone_number =
        std::env::var("CARELINK_PHONE").unwrap_or_else(|_| "01012345678".to_string());

    // ── 2. Construct adapters ─────────────────────────────────
    let config = ClientConfig::default();
    let runtime = tokio::runtime::Runtime::new().context("tokio runtime init failed")?;
    let (backend, mut mailbox) = HttpBackend::new(
        &base_url,
        Duration::from_secs(10),
        runtime.handle().clone(),
    )
    .context("http backend init failed")?;
    let mut calls = backend.clone();
    let mut schedules = backend;
    let mut sink = LogEventSink::new();
    let mut navigator = ComposerLog;
    let identity = EnvIdentity {
        profile: OwnerProfile {
            user_id: owner_id,
            phone_number,
        },
    };

    info!("Care service: {}", base_url);

    // ── 3. Construct app service ──────────────────────────────
    let mut service = AppService::new(&config);

    service.handle_command(
        AppCommand::EnterScheduleView,
        &identity,
        &mut calls,
        &mut schedules,
        &mut sink,
    );
    service.handle_command(
        AppCommand::StartCall,
        &identity,
        &mut calls,
        &mut schedules,
        &mut sink,
    );

    // ── 4. Tick loop ──────────────────────────────────────────
    // Bounded at the polling budget plus slack, so a misconfigured run
    // exits instead of spinning forever.
    let tick = Duration::from_millis(u64::from(config.control_tick_ms));
    let max_ticks = config.poll_interval_ticks() * (u64::from(config.status_poll_limit) + 4);

    for _ in 0..max_ticks {
        std::thread::sleep(tick);
        service.tick(&mut calls, &mut sink);
        for reply in mailbox.drain() {
            service.handle_reply(reply, &mut schedules, &mut navigator, &mut sink);
        }
        if service.call_phase().is_terminal() {
            break;
        }
    }

    info!(
        "Session over: phase={:?} schedule(enabled={} time={})",
        service.call_phase(),
        service.schedule().enabled,
        service.schedule().time_string(),
    );
    Ok(())
}
