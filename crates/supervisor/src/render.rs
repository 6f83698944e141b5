//! Step event rendering — the display/logging boundary.
//!
//! Pure formatting with no decision authority. Missing attributes degrade to
//! placeholder text; nothing here can fail.

use switchboard_core::StepEvent;

/// Fixed marker emitted when a run reaches a terminal state.
pub const END_MARKER: &str = "=== Conversation complete ===\n";

/// Name shown for messages with no producer attribution.
const UNKNOWN_PRODUCER: &str = "Unknown";

/// Format one step for display.
///
/// A message renders as a header naming the producer followed by its content;
/// a routing decision as a supervisor notice; a terminal event as the fixed
/// end marker. An absent event renders as nothing.
pub fn render(event: Option<&StepEvent>) -> Option<String> {
    match event? {
        StepEvent::Message { message } => {
            let producer = message.producer().unwrap_or(UNKNOWN_PRODUCER);
            Some(format!("=== {producer} ===\n{}\n", message.content))
        }
        StepEvent::Decision { next } => {
            Some(format!("Supervisor decides the next agent: {next}\n"))
        }
        StepEvent::End => Some(END_MARKER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::Message;

    #[test]
    fn message_event_renders_producer_and_content() {
        let event = StepEvent::Message {
            message: Message::agent("The price is $150", "FinancialAgent"),
        };
        let out = render(Some(&event)).unwrap();
        assert!(out.contains("=== FinancialAgent ==="));
        assert!(out.contains("$150"));
    }

    #[test]
    fn message_without_producer_renders_unknown() {
        let event = StepEvent::Message {
            message: Message::agent_unattributed("Test message"),
        };
        let out = render(Some(&event)).unwrap();
        assert!(out.contains("Unknown"));
        assert!(out.contains("Test message"));
    }

    #[test]
    fn decision_event_renders_next_agent() {
        let event = StepEvent::Decision {
            next: "FinancialAgent".into(),
        };
        let out = render(Some(&event)).unwrap();
        assert_eq!(out, "Supervisor decides the next agent: FinancialAgent\n");
    }

    #[test]
    fn end_event_renders_fixed_marker() {
        assert_eq!(render(Some(&StepEvent::End)).unwrap(), END_MARKER);
    }

    #[test]
    fn absent_event_renders_nothing() {
        assert!(render(None).is_none());
    }

    #[test]
    fn empty_content_still_renders_header() {
        let event = StepEvent::Message {
            message: Message::agent("", "FinancialAgent"),
        };
        let out = render(Some(&event)).unwrap();
        assert!(out.starts_with("=== FinancialAgent ==="));
    }
}
