//! Host-side adapters for the controller's hardware ports.

pub mod buttons;
pub mod clock;
pub mod relays;
