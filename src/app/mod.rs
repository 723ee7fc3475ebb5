//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the CareLink client:
//! call-session orchestration, bounded status polling, schedule editing
//! and persistence. All interaction with the network and the shell happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a backend or a screen.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
