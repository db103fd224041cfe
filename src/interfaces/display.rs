use crate::domain::event::{Event, Refusal};
use std::fmt;

/// Columns of the character display.
pub const DISPLAY_COLUMNS: usize = 16;

/// Contents of the two-line status display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    pub top: String,
    pub bottom: String,
}

impl DisplayFrame {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: fit(top.into()),
            bottom: fit(bottom.into()),
        }
    }

    /// Frame shown for `event`.
    pub fn render(event: &Event) -> Self {
        match event {
            Event::Ready => Self::new("Ready", ""),
            Event::Confirmed { work_ms, .. } => {
                Self::new("Payment OK", format!("Time: {} s", work_ms / 1000))
            }
            Event::Started {
                channel,
                remaining_ms,
                ..
            } => Self::new(
                format!("Relay {} on", channel.number()),
                format!("Time: {} s", remaining_ms / 1000),
            ),
            Event::Paused { channel, .. } => {
                Self::new(format!("Relay {} stop", channel.number()), "Paused")
            }
            Event::Resumed {
                channel,
                remaining_ms,
                ..
            } => Self::new(
                format!("Relay {} resumed", channel.number()),
                format!("Time: {} s", remaining_ms / 1000),
            ),
            Event::Countdown { remaining_ms, .. } => {
                Self::new("Time left:", format!("{} s", remaining_ms / 1000))
            }
            Event::Stopped { channel, .. } => {
                Self::new(format!("Relay {} off", channel.number()), "Finished")
            }
            Event::Refused(Refusal::NotConfirmed) => Self::new("Payment not", "confirmed!"),
            Event::Refused(Refusal::ChannelBusy { active })
            | Event::Refused(Refusal::ProcessActive { active }) => {
                Self::new(format!("Relay {}", active.number()), "in use")
            }
            Event::Refused(Refusal::PauseTooEarly { guard_ms }) => Self::new(
                "Pause blocked",
                format!("first {} s", guard_ms / 1000),
            ),
            Event::Refused(Refusal::ResumeTooEarly { guard_ms }) => Self::new(
                format!("Wait {} s after", guard_ms / 1000),
                "pause",
            ),
            Event::Unrecognized(_) => Self::new("Unknown message", ""),
        }
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<16}|{:<16}]", self.top, self.bottom)
    }
}

fn fit(mut line: String) -> String {
    if let Some((cut, _)) = line.char_indices().nth(DISPLAY_COLUMNS) {
        line.truncate(cut);
    }
    line
}
