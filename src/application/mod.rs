//! Application layer containing the controller logic orchestration.
//!
//! `ProcessController` decides transitions and returns events;
//! `ControlLoop` polls the inputs in a fixed order and applies each event to
//! the relay bank and the status reporter.

pub mod config;
pub mod control_loop;
pub mod controller;
