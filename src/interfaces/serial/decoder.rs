use crate::domain::payment::{PaymentCommand, PaymentMessage};
use crate::error::{ControllerError, Result};

/// Command literal sent by the payment gateway.
pub const PAYMENT_OK: &str = "PAYMENT_OK";

/// Decodes one inbound payment line.
///
/// Grammar: `PAYMENT_OK` or `PAYMENT_OK:<int>`, each optionally followed by
/// `,<id>`. Anything else decodes as [`PaymentCommand::Unrecognized`].
pub fn decode(line: &str) -> Result<PaymentMessage> {
    let message = line.trim();
    if message.is_empty() {
        return Err(ControllerError::EmptyMessage);
    }

    let (command, correlation_id) = match message.split_once(',') {
        Some((command, id)) => {
            let id = id.trim();
            (command, (!id.is_empty()).then(|| id.to_string()))
        }
        None => (message, None),
    };

    let command = if command == PAYMENT_OK {
        PaymentCommand::Confirm {
            extra_impulses: None,
        }
    } else if let Some(count) = command
        .strip_prefix(PAYMENT_OK)
        .and_then(|rest| rest.strip_prefix(':'))
    {
        PaymentCommand::Confirm {
            extra_impulses: Some(parse_impulses(count)),
        }
    } else {
        return Ok(PaymentMessage {
            command: PaymentCommand::Unrecognized(message.to_string()),
            correlation_id: None,
        });
    };

    Ok(PaymentMessage {
        command,
        correlation_id,
    })
}

/// Best-effort integer parse: an optional sign followed by the leading
/// digits. Anything without leading digits is zero.
fn parse_impulses(text: &str) -> i64 {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_confirmation() {
        let message = decode("PAYMENT_OK").unwrap();
        assert_eq!(
            message.command,
            PaymentCommand::Confirm {
                extra_impulses: None
            }
        );
        assert_eq!(message.correlation_id, None);
    }

    #[test]
    fn test_decode_with_id() {
        let message = decode("  PAYMENT_OK, abc \n").unwrap();
        assert_eq!(message, PaymentMessage::confirm(None, Some("abc")));
    }

    #[test]
    fn test_decode_extra_impulses() {
        assert_eq!(
            decode("PAYMENT_OK:2,abc").unwrap(),
            PaymentMessage::confirm(Some(2), Some("abc"))
        );
        assert_eq!(
            decode("PAYMENT_OK: -3").unwrap(),
            PaymentMessage::confirm(Some(-3), None)
        );
    }

    #[test]
    fn test_malformed_impulses_parse_as_zero() {
        assert_eq!(
            decode("PAYMENT_OK:lots").unwrap(),
            PaymentMessage::confirm(Some(0), None)
        );
        assert_eq!(
            decode("PAYMENT_OK:").unwrap(),
            PaymentMessage::confirm(Some(0), None)
        );
        assert_eq!(
            decode("PAYMENT_OK:4x").unwrap(),
            PaymentMessage::confirm(Some(4), None)
        );
    }

    #[test]
    fn test_empty_id_is_absent() {
        assert_eq!(
            decode("PAYMENT_OK,  ").unwrap(),
            PaymentMessage::confirm(None, None)
        );
    }

    #[test]
    fn test_unrecognized() {
        let message = decode("PAYMENT_FAILED,abc").unwrap();
        assert_eq!(
            message.command,
            PaymentCommand::Unrecognized("PAYMENT_FAILED,abc".to_string())
        );
        assert_eq!(message.correlation_id, None);

        assert!(matches!(
            decode("PAYMENT_OKAY").unwrap().command,
            PaymentCommand::Unrecognized(_)
        ));
    }

    #[test]
    fn test_empty_line() {
        assert!(matches!(decode("   "), Err(ControllerError::EmptyMessage)));
    }
}
