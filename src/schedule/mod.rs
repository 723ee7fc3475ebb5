//! Daily call schedule domain.
//!
//! One record per account owner: an on/off switch plus a time of day at
//! 5-minute granularity. The wire shape (`is_active` + `call_time`) comes
//! from the care service and is deliberately lenient on input: missing
//! fields take defaults and `call_time` tolerates a trailing seconds
//! component, so an older backend emitting `"HH:MM:SS"` keeps working.

use serde::{Deserialize, Serialize};

pub mod editor;
pub mod store;

/// Parse an `"HH:MM"` clock time. Bounds-checked, no padding required.
pub fn parse_hhmm(s: &str) -> Option<(u8, u8)> {
    let (h, m) = s.split_once(':')?;
    let hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

/// Render a clock time as zero-padded `"HH:MM"`.
pub fn format_hhmm(hour: u8, minute: u8) -> String {
    format!("{hour:02}:{minute:02}")
}

// ---------------------------------------------------------------------------
// Domain type
// ---------------------------------------------------------------------------

/// The owner's daily call schedule as the client reasons about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSchedule {
    pub enabled: bool,
    pub hour: u8,
    pub minute: u8,
}

impl Default for CallSchedule {
    /// Disabled, mid-afternoon. Used when the remote row is absent.
    fn default() -> Self {
        Self {
            enabled: false,
            hour: 14,
            minute: 0,
        }
    }
}

impl CallSchedule {
    pub fn new(enabled: bool, hour: u8, minute: u8) -> Self {
        debug_assert!(hour < 24 && minute < 60);
        Self {
            enabled,
            hour,
            minute,
        }
    }

    /// Build from a wire record, falling back to default time parts when the
    /// time string does not parse.
    pub fn from_record(record: &ScheduleRecord) -> Self {
        let fallback = Self::default();
        let (hour, minute) =
            parse_hhmm(&record.call_time).unwrap_or((fallback.hour, fallback.minute));
        Self {
            enabled: record.is_active,
            hour,
            minute,
        }
    }

    pub fn to_record(self) -> ScheduleRecord {
        ScheduleRecord {
            is_active: self.enabled,
            call_time: self.time_string(),
        }
    }

    pub fn time_string(self) -> String {
        format_hhmm(self.hour, self.minute)
    }
}

// ---------------------------------------------------------------------------
// Wire record
// ---------------------------------------------------------------------------

/// Per-owner schedule row as stored by the care service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(default)]
    pub is_active: bool,
    #[serde(
        default = "default_call_time",
        deserialize_with = "lenient_call_time"
    )]
    pub call_time: String,
}

fn default_call_time() -> String {
    CallSchedule::default().time_string()
}

/// Accept `"HH:MM"`, `"HH:MM:SS"`, null, or any other scalar the backend
/// might emit. Non-string scalars are coerced to their string form first;
/// whatever does not parse as a clock time becomes the default rather than
/// failing the whole fetch.
fn lenient_call_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => return Ok(default_call_time()),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    let head = text.get(..5).unwrap_or(&text);
    Ok(match parse_hhmm(head) {
        Some((hour, minute)) => format_hhmm(hour, minute),
        None => default_call_time(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
