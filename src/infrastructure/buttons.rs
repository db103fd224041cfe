//! Button debounce state management

use crate::domain::channel::{CHANNEL_COUNT, Channel};
use crate::domain::clock::Millis;

/// Debounce state of a single button.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonLatch {
    /// Set once a press is accepted, cleared when the contact opens.
    held: bool,
    /// When the last press was accepted.
    last_press: Option<Millis>,
}

impl ButtonLatch {
    /// Returns true when a closed contact counts as a new press.
    fn update(&mut self, closed: bool, now: Millis, debounce_ms: u32) -> bool {
        if !closed {
            self.held = false;
            return false;
        }

        if self.held {
            return false;
        }

        let settled = self
            .last_press
            .is_none_or(|last| now.since(last) > debounce_ms);
        if settled {
            self.last_press = Some(now);
            self.held = true;
        }
        settled
    }
}

/// Turns raw contact levels of the panel into discrete press events.
///
/// One press is reported per closure. A closure within `debounce_ms` of the
/// previous accepted press on the same button is ignored until the window
/// has passed.
#[derive(Debug, Clone)]
pub struct DebouncedButtons {
    contacts: [bool; CHANNEL_COUNT],
    latches: [ButtonLatch; CHANNEL_COUNT],
    debounce_ms: u32,
}

impl DebouncedButtons {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            contacts: [false; CHANNEL_COUNT],
            latches: [ButtonLatch::default(); CHANNEL_COUNT],
            debounce_ms,
        }
    }

    /// Sets the raw level of a contact (true = closed/pressed).
    pub fn set_contact(&mut self, channel: Channel, closed: bool) {
        self.contacts[channel.index()] = closed;
    }

    /// True while some closed contact has not been reported as a press yet.
    ///
    /// A contact that stays closed after its press is latched and yields
    /// nothing more until it opens.
    pub fn any_pending(&self) -> bool {
        self.contacts
            .iter()
            .zip(&self.latches)
            .any(|(&closed, latch)| closed && !latch.held)
    }

    /// Samples every contact and returns the channels pressed at `now`.
    pub fn poll(&mut self, now: Millis) -> Vec<Channel> {
        Channel::all()
            .filter(|channel| {
                let closed = self.contacts[channel.index()];
                self.latches[channel.index()].update(closed, now, self.debounce_ms)
            })
            .collect()
    }
}
