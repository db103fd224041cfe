//! The line protocol spoken with the payment gateway.

pub mod decoder;
pub mod reporter;
pub mod status;
