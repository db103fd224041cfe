use crate::domain::event::{Event, Refusal};

fn seconds(ms: u32) -> u32 {
    ms / 1000
}

fn id_suffix(correlation_id: Option<&str>) -> String {
    correlation_id
        .map(|id| format!(",{id}"))
        .unwrap_or_default()
}

/// The machine-readable status line for an event, if it has one.
pub fn status_line(event: &Event) -> Option<String> {
    let line = match event {
        Event::Confirmed {
            work_ms,
            extra_impulses,
            correlation_id,
        } => {
            let id = id_suffix(correlation_id.as_deref());
            match extra_impulses {
                None => format!("-confirmed{id}."),
                Some(_) => format!("-confirmed:{}{id}.", seconds(*work_ms)),
            }
        }
        Event::Started {
            channel,
            remaining_ms,
            correlation_id,
        } => format!(
            "-relay{}on{}{}.",
            channel.number(),
            seconds(*remaining_ms),
            id_suffix(correlation_id.as_deref())
        ),
        Event::Paused {
            channel,
            correlation_id,
            ..
        } => format!(
            "-relay{}stop{}.",
            channel.number(),
            id_suffix(correlation_id.as_deref())
        ),
        Event::Resumed {
            channel,
            correlation_id,
            ..
        } => format!(
            "-relay{}resumed{}.",
            channel.number(),
            id_suffix(correlation_id.as_deref())
        ),
        Event::Stopped {
            channel,
            correlation_id,
        } => format!(
            "-relay{}off{}.",
            channel.number(),
            id_suffix(correlation_id.as_deref())
        ),
        Event::Refused(Refusal::NotConfirmed) => "-not_confirmed.".to_string(),
        _ => return None,
    };
    Some(line)
}

/// Human-readable lines that follow the status line.
pub fn mirror_lines(event: &Event) -> Vec<String> {
    match event {
        Event::Ready => vec!["ready".to_string()],
        Event::Confirmed {
            work_ms,
            extra_impulses: None,
            ..
        } => vec![format!(
            "payment confirmed, start enabled ({} s)",
            seconds(*work_ms)
        )],
        Event::Confirmed { work_ms, .. } => vec![format!(
            "payment confirmed, work time: {} s",
            seconds(*work_ms)
        )],
        Event::Started {
            channel,
            remaining_ms,
            ..
        } => vec![format!(
            "{channel} started, remaining: {} s",
            seconds(*remaining_ms)
        )],
        Event::Paused {
            channel,
            remaining_ms,
            ..
        } => vec![format!(
            "{channel} paused, remaining: {} s",
            seconds(*remaining_ms)
        )],
        Event::Resumed {
            channel,
            remaining_ms,
            ..
        } => vec![format!(
            "{channel} resumed, remaining: {} s",
            seconds(*remaining_ms)
        )],
        Event::Countdown { remaining_ms, .. } => {
            vec![format!("remaining: {} s", seconds(*remaining_ms))]
        }
        Event::Stopped { channel, .. } => {
            vec![format!("{channel} off"), "process finished".to_string()]
        }
        Event::Refused(refusal) => vec![refusal.to_string()],
        Event::Unrecognized(raw) => vec![format!("unrecognized message: {raw}")],
    }
}
