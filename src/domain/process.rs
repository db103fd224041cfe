use super::channel::Channel;
use super::clock::Millis;

/// Coarse phase of the process, for callers that do not need the anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// What the single channel slot is doing.
///
/// The active channel lives inside the variant, so a channel is held exactly
/// while the process is running or paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Running { channel: Channel, started_at: Millis },
    Paused { channel: Channel, paused_at: Millis },
}

/// Lifetime counters. Not touched by [`ProcessState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionCounters {
    pub confirmations: u32,
    pub starts: u32,
    pub completions: u32,
}

/// The process-wide controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessState {
    authorized: bool,
    activity: Activity,
    work_ms: u32,
    last_countdown: Millis,
    correlation_id: Option<String>,
    counters: SessionCounters,
}

impl ProcessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn phase(&self) -> Phase {
        match self.activity {
            Activity::Idle => Phase::Idle,
            Activity::Running { .. } => Phase::Running,
            Activity::Paused { .. } => Phase::Paused,
        }
    }

    pub fn active_channel(&self) -> Option<Channel> {
        match self.activity {
            Activity::Idle => None,
            Activity::Running { channel, .. } | Activity::Paused { channel, .. } => Some(channel),
        }
    }

    /// Remaining entitlement at the start of the current running segment.
    pub fn work_ms(&self) -> u32 {
        self.work_ms
    }

    pub fn last_countdown(&self) -> Millis {
        self.last_countdown
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Records a confirmed payment. Only valid while idle.
    pub fn arm(&mut self, work_ms: u32, correlation_id: Option<String>) {
        debug_assert_eq!(self.phase(), Phase::Idle);
        self.authorized = true;
        self.work_ms = work_ms;
        self.correlation_id = correlation_id;
        self.counters.confirmations += 1;
    }

    /// Starts a process on `channel`, consuming the authorization.
    pub fn begin(&mut self, channel: Channel, now: Millis) {
        self.activity = Activity::Running {
            channel,
            started_at: now,
        };
        self.authorized = false;
        self.last_countdown = now;
        self.counters.starts += 1;
    }

    /// Pauses a running process and returns the time spent in the segment.
    ///
    /// The entitlement shrinks by that time, never below zero.
    pub fn pause(&mut self, now: Millis) -> Option<u32> {
        let Activity::Running {
            channel,
            started_at,
        } = self.activity
        else {
            return None;
        };

        let elapsed = now.since(started_at);
        self.work_ms = self.work_ms.saturating_sub(elapsed);
        self.activity = Activity::Paused {
            channel,
            paused_at: now,
        };
        Some(elapsed)
    }

    /// Resumes a paused process with a fresh running segment.
    pub fn resume(&mut self, now: Millis) -> bool {
        let Activity::Paused { channel, .. } = self.activity else {
            return false;
        };

        self.activity = Activity::Running {
            channel,
            started_at: now,
        };
        self.last_countdown = now;
        true
    }

    /// Remaining time of the running segment at `now`.
    pub fn remaining_ms(&self, now: Millis) -> u32 {
        match self.activity {
            Activity::Running { started_at, .. } => {
                self.work_ms.saturating_sub(now.since(started_at))
            }
            _ => self.work_ms,
        }
    }

    pub fn mark_countdown(&mut self, now: Millis) {
        self.last_countdown = now;
    }

    /// Returns to idle and hands back the channel that was active, together
    /// with the correlation id it ran under.
    ///
    /// The work duration is left as is; the next confirmation overwrites it.
    pub fn reset(&mut self) -> Option<(Channel, Option<String>)> {
        let active = self.active_channel();
        let correlation_id = self.correlation_id.take();
        self.activity = Activity::Idle;
        self.authorized = false;

        active.map(|channel| {
            self.counters.completions += 1;
            (channel, correlation_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(index: usize) -> Channel {
        Channel::new(index).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = ProcessState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_authorized());
        assert_eq!(state.active_channel(), None);
        assert_eq!(state.work_ms(), 0);
        assert_eq!(state.correlation_id(), None);
    }

    #[test]
    fn test_begin_consumes_authorization() {
        let mut state = ProcessState::new();
        state.arm(30000, Some("abc".to_string()));
        assert!(state.is_authorized());

        state.begin(channel(1), Millis(100));
        assert!(!state.is_authorized());
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.active_channel(), Some(channel(1)));
        assert_eq!(state.last_countdown(), Millis(100));
    }

    #[test]
    fn test_pause_deducts_elapsed() {
        let mut state = ProcessState::new();
        state.arm(30000, None);
        state.begin(channel(0), Millis(1000));

        let elapsed = state.pause(Millis(5000));
        assert_eq!(elapsed, Some(4000));
        assert_eq!(state.work_ms(), 26000);
        assert_eq!(
            state.activity(),
            Activity::Paused {
                channel: channel(0),
                paused_at: Millis(5000)
            }
        );
    }

    #[test]
    fn test_pause_saturates_at_zero() {
        let mut state = ProcessState::new();
        state.arm(2000, None);
        state.begin(channel(0), Millis(0));

        state.pause(Millis(3500));
        assert_eq!(state.work_ms(), 0);
    }

    #[test]
    fn test_pause_requires_running() {
        let mut state = ProcessState::new();
        assert_eq!(state.pause(Millis(10)), None);
        assert!(!state.resume(Millis(10)));
    }

    #[test]
    fn test_resume_restarts_segment() {
        let mut state = ProcessState::new();
        state.arm(30000, None);
        state.begin(channel(3), Millis(0));
        state.pause(Millis(4000));

        assert!(state.resume(Millis(7000)));
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.remaining_ms(Millis(8000)), 25000);
    }

    #[test]
    fn test_reset_keeps_counters_and_clears_id() {
        let mut state = ProcessState::new();
        state.arm(30000, Some("abc".to_string()));
        state.begin(channel(2), Millis(0));

        let stopped = state.reset();
        assert_eq!(stopped, Some((channel(2), Some("abc".to_string()))));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.correlation_id(), None);
        assert!(!state.is_authorized());
        assert_eq!(state.counters().completions, 1);
        assert_eq!(state.counters().starts, 1);

        assert_eq!(state.reset(), None);
        assert_eq!(state.counters().completions, 1);
    }
}
