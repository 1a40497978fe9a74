//! Chat support: intent rules and canned replies
//!
//! The rules path is the always-available fallback; the AI relay (when
//! configured) gets the same extracted context prepended to its prompt.

pub mod intents;

pub use intents::{Intent, IntentRules};

/// Canned reply for a classified intent.
///
/// `tracking_context` is a one-line status summary for extracted order ids
/// or carrier codes, when the lookup succeeded.
pub fn canned_reply(intent: &Intent, tracking_context: Option<&str>) -> String {
    match intent {
        Intent::CarrierCode { carrier, code } => match tracking_context {
            Some(ctx) => ctx.to_string(),
            None => format!(
                "I couldn't look up {} shipment {} right now. You can try the carrier's own tracking page.",
                carrier.to_uppercase(),
                code
            ),
        },
        Intent::OrderId(id) => match tracking_context {
            Some(ctx) => ctx.to_string(),
            None => format!("I couldn't find an order named {}.", id),
        },
        Intent::Greeting => {
            "Hello! Ask me about an order (e.g. ORD1001) or paste a tracking number.".to_string()
        }
        Intent::CancelOrReturn => {
            "Orders can be canceled within 24 hours of placement. Returns are accepted within 30 days of delivery; see /api/returns for the full policy.".to_string()
        }
        Intent::IssueReport => {
            "Sorry to hear that. Please reply with your order id and a short description and our support team will follow up by email.".to_string()
        }
        Intent::Faq => {
            "Standard shipping takes 3-5 business days. Support hours are Mon-Fri 9:00-17:00. Paste an order id for live status.".to_string()
        }
        Intent::Unknown => {
            "I can help with order status, returns, and delivery questions. Try an order id like ORD1001 or a carrier tracking number.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wins_for_order_intents() {
        let intent = Intent::OrderId("ORD1001".to_string());
        let reply = canned_reply(&intent, Some("ORD1001 is Processing (5%)."));
        assert_eq!(reply, "ORD1001 is Processing (5%).");
    }

    #[test]
    fn missing_context_mentions_the_id() {
        let intent = Intent::OrderId("ORD9999".to_string());
        assert!(canned_reply(&intent, None).contains("ORD9999"));
    }

    #[test]
    fn unknown_intent_gets_help_text() {
        let reply = canned_reply(&Intent::Unknown, None);
        assert!(reply.contains("ORD1001"));
    }
}
