//! CareLink client core library.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! mobile shell that embeds them. Network-facing code lives in
//! [`adapters`] and is gated behind the `backend-http` feature.

#![deny(unused_must_use)]

pub mod app;
pub mod call;
pub mod config;
pub mod error;
pub mod schedule;
pub mod wheel;

pub mod adapters;
