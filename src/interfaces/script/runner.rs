use super::reader::{ScenarioStep, StepKind};
use crate::application::control_loop::ControlLoop;
use crate::domain::channel::Channel;
use crate::domain::clock::Millis;
use crate::domain::payment::PaymentMessage;
use crate::domain::ports::{RelayBank, StatusReporter};
use crate::domain::process::Phase;
use crate::error::{ControllerError, Result};
use crate::interfaces::serial::decoder;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Replays a scenario against a simulated clock.
///
/// Simulated time starts at zero and advances to whichever comes first: the
/// next scripted step or the next poll of the loop. Once the script is
/// exhausted the replay keeps going while a process is running, jumping
/// straight to the next countdown report or the expiry, and ends when
/// nothing is left to happen.
pub struct ScenarioRunner<'a, R: RelayBank, S: StatusReporter> {
    control: &'a mut ControlLoop<R, S>,
    steps: VecDeque<ScenarioStep>,
    payments: VecDeque<PaymentMessage>,
    releases: Vec<(u64, Channel)>,
    now: u64,
}

impl<'a, R: RelayBank, S: StatusReporter> ScenarioRunner<'a, R, S> {
    pub fn new(control: &'a mut ControlLoop<R, S>, mut steps: Vec<ScenarioStep>) -> Self {
        steps.sort_by_key(|step| step.at);
        Self {
            control,
            steps: steps.into(),
            payments: VecDeque::new(),
            releases: Vec::new(),
            now: 0,
        }
    }

    /// Runs to completion and returns the simulated end time.
    pub fn run(mut self) -> Result<u64> {
        info!(steps = self.steps.len(), "replaying scenario");
        let poll = u64::from(self.control.config().poll_interval_ms.max(1));

        loop {
            self.apply_due_steps(poll);
            self.release_due_contacts();

            let message = self.payments.pop_front();
            self.control.iterate(Millis(self.now as u32), message)?;

            if self.input_exhausted() {
                if self.control.phase() != Phase::Running {
                    break;
                }
                self.now += self.until_next_countdown();
                continue;
            }

            let mut next = self.now + poll;
            if let Some(step) = self.steps.front() {
                next = next.min(u64::from(step.at));
            }
            if let Some(release) = self.releases.iter().map(|(at, _)| *at).min() {
                next = next.min(release);
            }
            self.now = next.max(self.now + 1);
        }

        info!(
            finished_at_ms = self.now,
            counters = ?self.control.state().counters(),
            "scenario finished"
        );
        Ok(self.now)
    }

    fn apply_due_steps(&mut self, poll: u64) {
        while self
            .steps
            .front()
            .is_some_and(|step| u64::from(step.at) <= self.now)
        {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            if let Err(e) = self.apply(step, poll) {
                warn!("Skipping scenario step: {e}");
            }
        }
    }

    fn apply(&mut self, step: ScenarioStep, poll: u64) -> Result<()> {
        match step.kind {
            StepKind::Payment => match decoder::decode(&step.value) {
                Ok(message) => self.payments.push_back(message),
                Err(ControllerError::EmptyMessage) => debug!(at = step.at, "empty payment line"),
                Err(e) => return Err(e),
            },
            StepKind::Press => {
                let channel = parse_channel(&step.value)?;
                self.control.set_contact(channel, true);
                self.releases.push((self.now + poll, channel));
            }
            StepKind::Hold => {
                let channel = parse_channel(&step.value)?;
                self.control.set_contact(channel, true);
            }
            StepKind::Release => {
                let channel = parse_channel(&step.value)?;
                self.control.set_contact(channel, false);
            }
        }
        Ok(())
    }

    fn release_due_contacts(&mut self) {
        let now = self.now;
        let control = &mut *self.control;
        self.releases.retain(|(at, channel)| {
            if *at <= now {
                control.set_contact(*channel, false);
                false
            } else {
                true
            }
        });
    }

    fn input_exhausted(&self) -> bool {
        self.steps.is_empty()
            && self.payments.is_empty()
            && self.releases.is_empty()
            && !self.control.buttons().any_pending()
    }

    /// Time until the running process next has something to report.
    fn until_next_countdown(&self) -> u64 {
        let now = Millis(self.now as u32);
        let state = self.control.state();
        let interval = self.control.config().countdown_interval_ms;
        let to_report = interval.saturating_sub(now.since(state.last_countdown()));
        let to_expiry = state.remaining_ms(now);
        u64::from(to_report.min(to_expiry).max(1))
    }
}

fn parse_channel(value: &str) -> Result<Channel> {
    let number = value
        .trim()
        .parse::<usize>()
        .map_err(|_| ControllerError::InvalidInput(format!("invalid channel number '{value}'")))?;
    Channel::from_number(number)
}
