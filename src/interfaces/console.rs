use crate::application::control_loop::ControlLoop;
use crate::domain::channel::Channel;
use crate::domain::payment::PaymentMessage;
use crate::domain::ports::{Clock, MessageSource, MessageSourceBox, RelayBank, StatusReporter};
use crate::domain::process::Phase;
use crate::error::{ControllerError, Result};
use crate::interfaces::serial::decoder;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// One line typed on the live console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// `press <N>`: momentary press of button N (1-based).
    Press(Channel),
    Payment(PaymentMessage),
}

/// Splits console lines into button presses and payment lines.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_console_line(line: &str) -> Result<Option<ConsoleInput>> {
    let line = line.trim();
    if let Some(number) = line.strip_prefix("press ") {
        let number = number.trim().parse::<usize>().map_err(|_| {
            ControllerError::InvalidInput(format!("invalid channel number '{number}'"))
        })?;
        return Ok(Some(ConsoleInput::Press(Channel::from_number(number)?)));
    }

    match decoder::decode(line) {
        Ok(message) => Ok(Some(ConsoleInput::Payment(message))),
        Err(ControllerError::EmptyMessage) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Lines from the process's standard input.
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSource for StdinSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// Runs the control loop in real time.
///
/// The loop polls every `poll_interval_ms`. Inbound lines are queued as they
/// arrive and applied in order, one per iteration; a pressed contact stays
/// closed for exactly one iteration. Returns once the source is closed and
/// no process is running, or on Ctrl-C.
pub async fn run_console<R, S, C>(
    control: &mut ControlLoop<R, S>,
    source: MessageSourceBox,
    clock: &C,
) -> Result<()>
where
    R: RelayBank,
    S: StatusReporter,
    C: Clock,
{
    run_console_until(control, source, clock, tokio::signal::ctrl_c()).await
}

/// Same as [`run_console`], with `shutdown` in place of Ctrl-C.
///
/// On shutdown a running or paused process is stopped, so every relay is
/// left off.
pub async fn run_console_until<R, S, C, F>(
    control: &mut ControlLoop<R, S>,
    mut source: MessageSourceBox,
    clock: &C,
    shutdown: F,
) -> Result<()>
where
    R: RelayBank,
    S: StatusReporter,
    C: Clock,
    F: Future,
{
    let poll = Duration::from_millis(u64::from(control.config().poll_interval_ms.max(1)));
    let mut interval = tokio::time::interval(poll);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    let mut pending: VecDeque<ConsoleInput> = VecDeque::new();
    let mut released: Vec<Channel> = Vec::new();
    let mut open = true;

    info!("console ready");
    loop {
        tokio::select! {
            line = source.next_line(), if open => match line? {
                Some(line) => match parse_console_line(&line) {
                    Ok(Some(input)) => pending.push_back(input),
                    Ok(None) => {}
                    Err(e) => warn!("Ignoring console line: {e}"),
                },
                None => {
                    info!("input closed");
                    open = false;
                }
            },
            _ = interval.tick() => {
                for channel in released.drain(..) {
                    control.set_contact(channel, false);
                }
                let message = match pending.pop_front() {
                    Some(ConsoleInput::Press(channel)) => {
                        control.set_contact(channel, true);
                        released.push(channel);
                        None
                    }
                    Some(ConsoleInput::Payment(message)) => Some(message),
                    None => None,
                };
                control.iterate(clock.now(), message)?;

                let settled = pending.is_empty() && released.is_empty();
                if !open && settled && control.phase() != Phase::Running {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("interrupted");
                control.stop()?;
                break;
            }
        }
    }

    info!(counters = ?control.state().counters(), "console finished");
    Ok(())
}
