use std::fmt;

/// A millisecond timestamp from a free-running 32-bit counter.
///
/// The counter wraps after roughly 49.7 days. Differences are taken with
/// wrapping subtraction, so an interval that straddles the wrap still
/// measures correctly as long as it is shorter than the full period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Millis(pub u32);

impl Millis {
    /// Milliseconds elapsed from `earlier` to `self`.
    pub fn since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    pub fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since() {
        assert_eq!(Millis(3000).since(Millis(1000)), 2000);
        assert_eq!(Millis(5).since(Millis(5)), 0);
    }

    #[test]
    fn test_since_across_wrap() {
        let before = Millis(u32::MAX - 499);
        let after = before.wrapping_add(1500);
        assert_eq!(after, Millis(1000));
        assert_eq!(after.since(before), 1500);
    }
}
