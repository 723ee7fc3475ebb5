//! Client configuration parameters
//!
//! All tunable parameters for the CareLink client core.
//! Shells construct this directly; the smoke binary reads it from a JSON
//! file. Values deliberately exclude per-screen layout metrics — wheel
//! layouts are measured at runtime and passed with the edit commands.

use serde::{Deserialize, Serialize};

/// Core client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    // --- Dialing ---
    /// Country calling prefix prepended during number normalization
    pub country_prefix: String,
    /// National trunk digit replaced by the country prefix
    pub trunk_prefix: String,

    // --- Status polling ---
    /// Seconds between call-status fetches while a call is in progress
    pub status_poll_interval_secs: u16,
    /// Maximum number of status fetches before the attempt is timed out
    pub status_poll_limit: u16,

    // --- Schedule ---
    /// Time of day assumed when the remote has no schedule record ("HH:MM")
    pub default_call_time: String,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_tick_ms: u32,
    /// Delay before the one-time mount scroll of a wheel (milliseconds)
    pub wheel_mount_settle_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Dialing (Korean numbering plan)
            country_prefix: "+82".to_string(),
            trunk_prefix: "0".to_string(),

            // Polling: 60 fetches at 5 s ≈ 5 minutes of ringing budget
            status_poll_interval_secs: 5,
            status_poll_limit: 60,

            // Schedule
            default_call_time: "14:00".to_string(),

            // Timing
            control_tick_ms: 250, // 4 Hz
            wheel_mount_settle_ms: 50,
        }
    }
}

impl ClientConfig {
    /// Control ticks that make up one status-poll interval.
    pub fn poll_interval_ticks(&self) -> u64 {
        let interval_ms = u64::from(self.status_poll_interval_secs) * 1000;
        (interval_ms / u64::from(self.control_tick_ms)).max(1)
    }
}
