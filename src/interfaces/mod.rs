//! Edges of the controller: the serial line protocol, the status display,
//! and the two drivers (scenario replay and live console).

pub mod console;
pub mod display;
pub mod script;
pub mod serial;
