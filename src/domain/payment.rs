/// The command carried by an inbound payment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCommand {
    /// Payment confirmed. `extra_impulses` is `None` for a plain
    /// confirmation and `Some(n)` when the line carried an impulse count.
    Confirm { extra_impulses: Option<i64> },
    /// Anything that is not a confirmation; holds the trimmed raw line.
    Unrecognized(String),
}

/// A decoded payment line with its optional correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMessage {
    pub command: PaymentCommand,
    pub correlation_id: Option<String>,
}

impl PaymentMessage {
    pub fn confirm(extra_impulses: Option<i64>, correlation_id: Option<&str>) -> Self {
        Self {
            command: PaymentCommand::Confirm { extra_impulses },
            correlation_id: correlation_id.map(str::to_string),
        }
    }
}
