use crate::domain::channel::{CHANNEL_COUNT, Channel};
use crate::domain::ports::RelayBank;
use tracing::info;

/// Relay outputs kept in memory.
///
/// Stands in for the GPIO relay board on a host: it records the level of
/// every output and how many times each was switched, and logs each change.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelayBank {
    levels: [bool; CHANNEL_COUNT],
    switch_counts: [u32; CHANNEL_COUNT],
}

impl InMemoryRelayBank {
    /// Creates a bank with every relay off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, channel: Channel) -> bool {
        self.levels[channel.index()]
    }

    /// Channels currently energized.
    pub fn energized(&self) -> Vec<Channel> {
        Channel::all().filter(|c| self.is_on(*c)).collect()
    }

    pub fn switch_count(&self, channel: Channel) -> u32 {
        self.switch_counts[channel.index()]
    }
}

impl RelayBank for InMemoryRelayBank {
    fn set(&mut self, channel: Channel, on: bool) {
        let level = &mut self.levels[channel.index()];
        if *level != on {
            self.switch_counts[channel.index()] += 1;
            info!(relay = channel.number(), on, "relay switched");
        }
        *level = on;
    }
}
