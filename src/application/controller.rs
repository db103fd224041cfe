use super::config::TimingConfig;
use crate::domain::channel::Channel;
use crate::domain::clock::Millis;
use crate::domain::event::{Event, Refusal};
use crate::domain::payment::{PaymentCommand, PaymentMessage};
use crate::domain::process::{Activity, ProcessState};
use tracing::debug;

/// The process state machine.
///
/// Every operation updates the owned [`ProcessState`] and returns the events
/// it produced. Nothing here touches relays or output; the control loop
/// applies the events.
#[derive(Debug, Clone, Default)]
pub struct ProcessController {
    state: ProcessState,
    config: TimingConfig,
}

impl ProcessController {
    pub fn new(config: TimingConfig) -> Self {
        Self {
            state: ProcessState::new(),
            config,
        }
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Applies a decoded payment line.
    ///
    /// A confirmation arms the next start; it never starts a process.
    pub fn confirm(&mut self, message: PaymentMessage) -> Event {
        let extra_impulses = match message.command {
            PaymentCommand::Unrecognized(raw) => return Event::Unrecognized(raw),
            PaymentCommand::Confirm { extra_impulses } => extra_impulses,
        };

        if let Some(active) = self.state.active_channel() {
            return Event::Refused(Refusal::ProcessActive { active });
        }

        let work_ms = self.config.work_ms(extra_impulses);
        self.state.arm(work_ms, message.correlation_id.clone());
        debug!(work_ms, ?extra_impulses, "payment confirmed");

        Event::Confirmed {
            work_ms,
            extra_impulses,
            correlation_id: message.correlation_id,
        }
    }

    /// Handles a debounced press on `channel`.
    ///
    /// While idle the press is a start request; once a process exists every
    /// press is a toggle request for the active channel.
    pub fn press(&mut self, channel: Channel, now: Millis) -> Event {
        match self.state.activity() {
            Activity::Idle => self.request_start(channel, now),
            Activity::Running { .. } | Activity::Paused { .. } => {
                self.request_toggle(channel, now)
            }
        }
    }

    fn request_start(&mut self, channel: Channel, now: Millis) -> Event {
        if !self.state.is_authorized() {
            return Event::Refused(Refusal::NotConfirmed);
        }

        self.state.begin(channel, now);
        debug!(%channel, work_ms = self.state.work_ms(), "process started");

        Event::Started {
            channel,
            remaining_ms: self.state.work_ms(),
            correlation_id: self.correlation_id(),
        }
    }

    fn request_toggle(&mut self, channel: Channel, now: Millis) -> Event {
        match self.state.activity() {
            Activity::Idle => Event::Refused(Refusal::NotConfirmed),
            Activity::Running {
                channel: active, ..
            }
            | Activity::Paused {
                channel: active, ..
            } if active != channel => Event::Refused(Refusal::ChannelBusy { active }),
            Activity::Running { started_at, .. } => {
                if now.since(started_at) < self.config.pause_guard_ms {
                    return Event::Refused(Refusal::PauseTooEarly {
                        guard_ms: self.config.pause_guard_ms,
                    });
                }

                let elapsed_ms = self.state.pause(now).unwrap_or_default();
                debug!(%channel, elapsed_ms, work_ms = self.state.work_ms(), "process paused");

                Event::Paused {
                    channel,
                    elapsed_ms,
                    remaining_ms: self.state.work_ms(),
                    correlation_id: self.correlation_id(),
                }
            }
            Activity::Paused { paused_at, .. } => {
                if now.since(paused_at) < self.config.resume_guard_ms {
                    return Event::Refused(Refusal::ResumeTooEarly {
                        guard_ms: self.config.resume_guard_ms,
                    });
                }

                self.state.resume(now);
                debug!(%channel, work_ms = self.state.work_ms(), "process resumed");

                Event::Resumed {
                    channel,
                    remaining_ms: self.state.work_ms(),
                    correlation_id: self.correlation_id(),
                }
            }
        }
    }

    /// Advances the countdown. Only a running process is affected.
    pub fn tick(&mut self, now: Millis) -> Vec<Event> {
        let Activity::Running { channel, .. } = self.state.activity() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let remaining_ms = self.state.remaining_ms(now);

        if now.since(self.state.last_countdown()) >= self.config.countdown_interval_ms {
            events.push(Event::Countdown {
                channel,
                remaining_ms,
            });
            self.state.mark_countdown(now);
        }

        if remaining_ms == 0 {
            events.extend(self.stop());
        }

        events
    }

    /// Ends the current process, if any, and returns to idle.
    ///
    /// Calling it again while idle produces nothing.
    pub fn stop(&mut self) -> Option<Event> {
        let (channel, correlation_id) = self.state.reset()?;
        debug!(%channel, "process stopped");
        Some(Event::Stopped {
            channel,
            correlation_id,
        })
    }

    fn correlation_id(&self) -> Option<String> {
        self.state.correlation_id().map(str::to_string)
    }
}
