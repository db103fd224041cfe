use crate::domain::clock::Millis;
use crate::domain::ports::Clock;
use tokio::time::Instant;

/// Milliseconds since construction, truncated to the wrapping 32-bit counter.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        // Truncation is the wrap of the counter.
        Millis(self.origin.elapsed().as_millis() as u32)
    }
}
