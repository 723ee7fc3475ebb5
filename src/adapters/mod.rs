//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `http`     | CallGateway        | care service REST API        |
//! |            | ScheduleGateway    |                              |
//! | `log_sink` | EventSink          | structured log output        |

#[cfg(feature = "backend-http")]
pub mod http;
pub mod log_sink;
