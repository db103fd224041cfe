/// Minimum run time before a pause is accepted.
pub const PAUSE_GUARD_MS: u32 = 3000;
/// Minimum pause time before a resume is accepted.
pub const RESUME_GUARD_MS: u32 = 2000;
/// Minimum interval between two presses on the same button.
pub const DEBOUNCE_MS: u32 = 500;
/// Work time bought by a plain confirmation.
pub const BASE_WORK_MS: u32 = 30000;
/// Work time added per extra impulse.
pub const EXTRA_MS_PER_IMPULSE: u32 = 3000;
/// Interval between countdown reports.
pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;
/// Control loop period.
pub const POLL_INTERVAL_MS: u32 = 10;

/// Timing thresholds of the deployed controller.
///
/// `Default` is the production configuration; the fields exist so tests can
/// shorten windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub pause_guard_ms: u32,
    pub resume_guard_ms: u32,
    pub debounce_ms: u32,
    pub base_work_ms: u32,
    pub extra_ms_per_impulse: u32,
    pub countdown_interval_ms: u32,
    pub poll_interval_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pause_guard_ms: PAUSE_GUARD_MS,
            resume_guard_ms: RESUME_GUARD_MS,
            debounce_ms: DEBOUNCE_MS,
            base_work_ms: BASE_WORK_MS,
            extra_ms_per_impulse: EXTRA_MS_PER_IMPULSE,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    /// Work time for a confirmation carrying `extra_impulses`.
    ///
    /// Negative counts shorten the base time; the result is clamped to the
    /// representable range.
    pub fn work_ms(&self, extra_impulses: Option<i64>) -> u32 {
        let extra = extra_impulses
            .unwrap_or(0)
            .saturating_mul(i64::from(self.extra_ms_per_impulse));
        i64::from(self.base_work_ms)
            .saturating_add(extra)
            .clamp(0, i64::from(u32::MAX)) as u32
    }
}
