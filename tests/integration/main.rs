//! Host-side integration test entry point.

mod alarm_flow_tests;
mod mock_hw;
