use super::channel::Channel;
use thiserror::Error;

/// Why a request left the process state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    #[error("payment not confirmed")]
    NotConfirmed,
    #[error("{active} is in use, another relay cannot start")]
    ChannelBusy { active: Channel },
    #[error("pause unavailable in the first {guard_ms}ms")]
    PauseTooEarly { guard_ms: u32 },
    #[error("cannot resume, wait {guard_ms}ms after pause")]
    ResumeTooEarly { guard_ms: u32 },
    #[error("payment ignored while {active} is active")]
    ProcessActive { active: Channel },
}

/// Everything the controller reports.
///
/// Events are produced by the pure transition logic and carry all the data
/// the reporter and the relay bank need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Ready,
    Confirmed {
        work_ms: u32,
        extra_impulses: Option<i64>,
        correlation_id: Option<String>,
    },
    Started {
        channel: Channel,
        remaining_ms: u32,
        correlation_id: Option<String>,
    },
    Paused {
        channel: Channel,
        elapsed_ms: u32,
        remaining_ms: u32,
        correlation_id: Option<String>,
    },
    Resumed {
        channel: Channel,
        remaining_ms: u32,
        correlation_id: Option<String>,
    },
    Countdown {
        channel: Channel,
        remaining_ms: u32,
    },
    Stopped {
        channel: Channel,
        correlation_id: Option<String>,
    },
    Refused(Refusal),
    Unrecognized(String),
}

impl Event {
    /// The relay level this event requires, if any.
    pub fn actuation(&self) -> Option<(Channel, bool)> {
        match self {
            Event::Started { channel, .. } | Event::Resumed { channel, .. } => {
                Some((*channel, true))
            }
            Event::Paused { channel, .. } | Event::Stopped { channel, .. } => {
                Some((*channel, false))
            }
            _ => None,
        }
    }
}
