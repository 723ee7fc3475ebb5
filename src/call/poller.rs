//! Bounded status-poll timer.
//!
//! Tick-driven: the control loop calls [`tick`](StatusPoller::tick) once per
//! cycle and issues a status fetch whenever it answers [`PollDecision::Fire`].
//! The poller owns nothing but counters, so "cancel the timer" is a plain
//! [`stop`](StatusPoller::stop) and restarting for a new attempt cannot leak
//! a previous schedule. A hard fetch budget bounds the whole poll phase;
//! when it runs out the poller stops itself and reports
//! [`PollDecision::Exhausted`] exactly once.

use log::info;

use crate::config::ClientConfig;

/// What the control loop should do on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// Nothing due.
    Idle,
    /// A poll interval elapsed; issue one status fetch.
    Fire,
    /// The fetch budget is spent; the poller has stopped itself.
    Exhausted,
}

/// Fixed-interval poll timer with a hard fetch budget.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    interval_ticks: u64,
    budget: u32,
    ticks_since_fire: u64,
    fires: u32,
    running: bool,
}

impl StatusPoller {
    pub fn new(interval_ticks: u64, budget: u32) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            budget,
            ticks_since_fire: 0,
            fires: 0,
            running: false,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.poll_interval_ticks(), u32::from(config.status_poll_limit))
    }

    /// Arm the timer for a fresh poll phase. Resets all counters, so a
    /// restart never inherits progress from a previous attempt.
    pub fn start(&mut self) {
        self.ticks_since_fire = 0;
        self.fires = 0;
        self.running = true;
        info!(
            "status poller armed: every {} ticks, budget {}",
            self.interval_ticks, self.budget
        );
    }

    /// Cancel the timer. Safe to call at any time, in any state.
    pub fn stop(&mut self) {
        if self.running {
            info!("status poller stopped after {} fetches", self.fires);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fetches issued since the last [`start`](Self::start).
    pub fn fires(&self) -> u32 {
        self.fires
    }

    /// Advance one control tick.
    ///
    /// The first fire happens one full interval after `start`, matching a
    /// plain repeating timer. When the budget is already spent at an
    /// interval boundary, the poller stops and returns `Exhausted` instead
    /// of firing; every tick after that is `Idle`.
    pub fn tick(&mut self) -> PollDecision {
        if !self.running {
            return PollDecision::Idle;
        }

        self.ticks_since_fire += 1;
        if self.ticks_since_fire < self.interval_ticks {
            return PollDecision::Idle;
        }
        self.ticks_since_fire = 0;

        if self.fires >= self.budget {
            self.stop();
            return PollDecision::Exhausted;
        }

        self.fires += 1;
        PollDecision::Fire
    }
}
