use super::channel::Channel;
use super::clock::Millis;
use super::event::Event;
use crate::error::Result;
use async_trait::async_trait;

/// Write-only relay outputs.
pub trait RelayBank {
    fn set(&mut self, channel: Channel, on: bool);
}

/// Receives every event the controller emits.
pub trait StatusReporter {
    fn report(&mut self, event: &Event) -> Result<()>;
}

/// Monotonic millisecond time source.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Inbound line transport for the live console.
#[async_trait]
pub trait MessageSource: Send {
    /// Next line, or `None` once the transport is closed.
    async fn next_line(&mut self) -> Result<Option<String>>;
}

pub type MessageSourceBox = Box<dyn MessageSource>;
