//! Domain types of the dispensing controller.
//!
//! Channels, the wrapping millisecond clock, the process state and the
//! events it emits, plus the ports the outer layers implement.

pub mod channel;
pub mod clock;
pub mod event;
pub mod payment;
pub mod ports;
pub mod process;
