//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a full user scenario
//! against mock port adapters. All tests run on the host with no real
//! backend required.

mod call_flow_tests;
mod mock_ports;
mod schedule_flow_tests;
