use crate::error::{ControllerError, Result};
use std::fmt;

/// Number of relay/button pairs on the panel.
pub const CHANNEL_COUNT: usize = 8;

/// One addressable relay and its start button.
///
/// Stored as a zero-based index; status lines and the display use the
/// one-based [`Channel::number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    pub fn new(index: usize) -> Result<Self> {
        if index < CHANNEL_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(ControllerError::InvalidChannel(index))
        }
    }

    /// Builds a channel from its one-based panel number.
    pub fn from_number(number: usize) -> Result<Self> {
        match number.checked_sub(1) {
            Some(index) => Self::new(index),
            None => Err(ControllerError::InvalidChannel(number)),
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn number(self) -> u8 {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        (0..CHANNEL_COUNT as u8).map(Channel)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relay {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_bounds() {
        assert!(Channel::new(0).is_ok());
        assert!(Channel::new(7).is_ok());
        assert!(matches!(
            Channel::new(8),
            Err(ControllerError::InvalidChannel(8))
        ));
    }

    #[test]
    fn test_channel_number_is_one_based() {
        let channel = Channel::new(2).unwrap();
        assert_eq!(channel.index(), 2);
        assert_eq!(channel.number(), 3);
        assert_eq!(channel.to_string(), "relay 3");
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Channel::from_number(1).unwrap(), Channel::new(0).unwrap());
        assert_eq!(Channel::from_number(8).unwrap(), Channel::new(7).unwrap());
        assert!(Channel::from_number(0).is_err());
        assert!(Channel::from_number(9).is_err());
    }

    #[test]
    fn test_all_channels() {
        let numbers: Vec<u8> = Channel::all().map(Channel::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
