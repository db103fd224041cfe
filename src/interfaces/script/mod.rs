//! Scenario replay: a CSV script of payments and button actions run against
//! a simulated clock.

pub mod reader;
pub mod runner;
