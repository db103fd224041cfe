use super::config::TimingConfig;
use super::controller::ProcessController;
use crate::domain::channel::Channel;
use crate::domain::clock::Millis;
use crate::domain::event::Event;
use crate::domain::payment::PaymentMessage;
use crate::domain::ports::{RelayBank, StatusReporter};
use crate::domain::process::{Phase, ProcessState};
use crate::error::Result;
use crate::infrastructure::buttons::DebouncedButtons;
use tracing::info;

/// The single control loop of the panel.
///
/// Owns the process controller, the button debouncers and both output
/// ports. Each call runs to completion, so transitions never interleave.
pub struct ControlLoop<R: RelayBank, S: StatusReporter> {
    controller: ProcessController,
    buttons: DebouncedButtons,
    relays: R,
    reporter: S,
}

impl<R: RelayBank, S: StatusReporter> ControlLoop<R, S> {
    /// Creates a loop with an idle, unauthorized controller and every button
    /// open. Call [`ControlLoop::boot`] before the first iteration.
    pub fn new(config: TimingConfig, relays: R, reporter: S) -> Self {
        Self {
            controller: ProcessController::new(config),
            buttons: DebouncedButtons::new(config.debounce_ms),
            relays,
            reporter,
        }
    }

    /// Drives every relay off and reports readiness.
    pub fn boot(&mut self) -> Result<()> {
        for channel in Channel::all() {
            self.relays.set(channel, false);
        }
        self.dispatch(Event::Ready)
    }

    /// One pass of the loop: the pending payment line, then the buttons,
    /// then the countdown.
    pub fn iterate(&mut self, now: Millis, message: Option<PaymentMessage>) -> Result<()> {
        if let Some(message) = message {
            self.handle_payment(message)?;
        }

        for channel in self.buttons.poll(now) {
            self.handle_press(channel, now)?;
        }

        if self.phase() == Phase::Running {
            self.tick(now)?;
        }

        Ok(())
    }

    pub fn handle_payment(&mut self, message: PaymentMessage) -> Result<()> {
        let event = self.controller.confirm(message);
        self.dispatch(event)
    }

    /// Handles an already debounced press.
    pub fn handle_press(&mut self, channel: Channel, now: Millis) -> Result<()> {
        let event = self.controller.press(channel, now);
        self.dispatch(event)
    }

    pub fn tick(&mut self, now: Millis) -> Result<()> {
        for event in self.controller.tick(now) {
            self.dispatch(event)?;
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.controller.stop() {
            Some(event) => self.dispatch(event),
            None => Ok(()),
        }
    }

    /// Sets a raw button contact level; the next iteration debounces it.
    pub fn set_contact(&mut self, channel: Channel, closed: bool) {
        self.buttons.set_contact(channel, closed);
    }

    pub fn buttons(&self) -> &DebouncedButtons {
        &self.buttons
    }

    pub fn phase(&self) -> Phase {
        self.controller.state().phase()
    }

    pub fn state(&self) -> &ProcessState {
        self.controller.state()
    }

    pub fn config(&self) -> &TimingConfig {
        self.controller.config()
    }

    pub fn relays(&self) -> &R {
        &self.relays
    }

    pub fn reporter(&self) -> &S {
        &self.reporter
    }

    pub fn into_parts(self) -> (R, S) {
        (self.relays, self.reporter)
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        if let Some((channel, on)) = event.actuation() {
            self.relays.set(channel, on);
        }
        if let Event::Stopped { channel, .. } = &event {
            info!(relay = channel.number(), counters = ?self.controller.state().counters(), "session finished");
        }
        self.reporter.report(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::Refusal;
    use crate::infrastructure::relays::InMemoryRelayBank;

    #[derive(Default)]
    struct RecordingReporter {
        events: Vec<Event>,
    }

    impl StatusReporter for RecordingReporter {
        fn report(&mut self, event: &Event) -> Result<()> {
            self.events.push(event.clone());
            Ok(())
        }
    }

    fn channel(index: usize) -> Channel {
        Channel::new(index).unwrap()
    }

    fn control_loop() -> ControlLoop<InMemoryRelayBank, RecordingReporter> {
        let mut control = ControlLoop::new(
            TimingConfig::default(),
            InMemoryRelayBank::new(),
            RecordingReporter::default(),
        );
        control.boot().unwrap();
        control
    }

    fn press(control: &mut ControlLoop<InMemoryRelayBank, RecordingReporter>, c: Channel, at: u32) {
        control.set_contact(c, true);
        control.iterate(Millis(at), None).unwrap();
        control.set_contact(c, false);
        control.iterate(Millis(at + 10), None).unwrap();
    }

    #[test]
    fn test_boot_reports_ready() {
        let control = control_loop();
        assert_eq!(control.reporter().events, vec![Event::Ready]);
        assert!(control.relays().energized().is_empty());
    }

    #[test]
    fn test_start_energizes_relay() {
        let mut control = control_loop();
        control
            .iterate(Millis(0), Some(PaymentMessage::confirm(None, Some("abc"))))
            .unwrap();
        press(&mut control, channel(0), 100);

        assert_eq!(control.phase(), Phase::Running);
        assert_eq!(control.relays().energized(), vec![channel(0)]);
    }

    #[test]
    fn test_busy_press_does_not_touch_relays() {
        let mut control = control_loop();
        control
            .iterate(Millis(0), Some(PaymentMessage::confirm(None, None)))
            .unwrap();
        press(&mut control, channel(0), 100);
        press(&mut control, channel(4), 1000);

        assert_eq!(control.relays().energized(), vec![channel(0)]);
        assert_eq!(control.relays().switch_count(channel(4)), 0);
        assert!(control.reporter().events.contains(&Event::Refused(
            Refusal::ChannelBusy {
                active: channel(0)
            }
        )));
    }

    #[test]
    fn test_pause_and_expiry_release_relay() {
        let mut control = control_loop();
        control
            .iterate(Millis(0), Some(PaymentMessage::confirm(Some(-8), None)))
            .unwrap();
        press(&mut control, channel(1), 0);
        press(&mut control, channel(1), 4000);
        assert!(control.relays().energized().is_empty());
        assert_eq!(control.phase(), Phase::Paused);

        press(&mut control, channel(1), 7000);
        assert_eq!(control.relays().energized(), vec![channel(1)]);

        // 6000ms bought, 4000ms used before the pause.
        control.iterate(Millis(9010), None).unwrap();
        assert_eq!(control.phase(), Phase::Idle);
        assert!(control.relays().energized().is_empty());
        assert!(matches!(
            control.reporter().events.last(),
            Some(Event::Stopped { .. })
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut control = control_loop();
        control
            .iterate(Millis(0), Some(PaymentMessage::confirm(None, None)))
            .unwrap();
        press(&mut control, channel(0), 0);

        control.stop().unwrap();
        let reported = control.reporter().events.len();
        control.stop().unwrap();
        assert_eq!(control.reporter().events.len(), reported);
        assert_eq!(control.state().counters().completions, 1);
    }
}
