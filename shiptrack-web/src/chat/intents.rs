//! Regex intent classification for the chat box
//!
//! An ordered list of (pattern, intent) rules evaluated in priority order;
//! the first matching rule wins. Extraction rules (carrier code, order id)
//! outrank conversational ones so a message like "hi, where is ORD1003"
//! resolves the order instead of greeting back. Stateless per call.

use regex::Regex;

/// Classified chat intent, with any extracted context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `carrier:code` style reference ("ups: 1Z...")
    CarrierCode { carrier: String, code: String },
    /// Demo order id mentioned in the message
    OrderId(String),
    Greeting,
    CancelOrReturn,
    IssueReport,
    Faq,
    /// No rule matched
    Unknown,
}

/// One classification rule: compiled pattern plus intent constructor
struct IntentRule {
    pattern: Regex,
    build: fn(&regex::Captures) -> Intent,
}

/// Ordered intent ruleset
pub struct IntentRules {
    rules: Vec<IntentRule>,
}

impl IntentRules {
    pub fn new() -> Self {
        fn rule(pattern: &str, build: fn(&regex::Captures) -> Intent) -> IntentRule {
            IntentRule {
                pattern: Regex::new(pattern).expect("Invalid intent pattern"),
                build,
            }
        }

        let rules = vec![
            rule(
                r"(?i)\b(ups|fedex|usps|dhl)\s*[:#]\s*([0-9A-Za-z]{8,34})\b",
                |caps| Intent::CarrierCode {
                    carrier: caps[1].to_lowercase(),
                    code: caps[2].to_uppercase(),
                },
            ),
            rule(r"(?i)\b(ORD\d{4,})\b", |caps| {
                Intent::OrderId(caps[1].to_uppercase())
            }),
            rule(
                r"(?i)^\s*(hi|hello|hey|howdy|good\s+(morning|afternoon|evening))\b",
                |_| Intent::Greeting,
            ),
            rule(r"(?i)\b(cancel|return|refund)\b", |_| {
                Intent::CancelOrReturn
            }),
            rule(
                r"(?i)\b(problem|issue|damaged|broken|missing|late|lost|complaint)\b",
                |_| Intent::IssueReport,
            ),
            rule(
                r"(?i)\b(hours|shipping|how\s+long|deliver|faq|support)\b",
                |_| Intent::Faq,
            ),
        ];

        Self { rules }
    }

    /// Classify a message; first matching rule wins
    pub fn classify(&self, message: &str) -> Intent {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(message) {
                return (rule.build)(&caps);
            }
        }
        Intent::Unknown
    }
}

impl Default for IntentRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_code_outranks_everything() {
        let rules = IntentRules::new();
        let intent = rules.classify("hi, any news on ups: 1Z999AA10123456784 ?");
        assert_eq!(
            intent,
            Intent::CarrierCode {
                carrier: "ups".to_string(),
                code: "1Z999AA10123456784".to_string(),
            }
        );
    }

    #[test]
    fn order_id_outranks_greeting() {
        let rules = IntentRules::new();
        assert_eq!(
            rules.classify("Hello, where is ord1003?"),
            Intent::OrderId("ORD1003".to_string())
        );
    }

    #[test]
    fn greeting_matches_at_start_only() {
        let rules = IntentRules::new();
        assert_eq!(rules.classify("Hey there"), Intent::Greeting);
        // "hi" mid-sentence is not a greeting
        assert_eq!(rules.classify("this is a test"), Intent::Unknown);
    }

    #[test]
    fn policy_and_issue_and_faq_rules() {
        let rules = IntentRules::new();
        assert_eq!(rules.classify("I want to cancel"), Intent::CancelOrReturn);
        assert_eq!(
            rules.classify("my package arrived damaged"),
            Intent::IssueReport
        );
        assert_eq!(rules.classify("what are your hours?"), Intent::Faq);
    }

    #[test]
    fn unmatched_message_is_unknown() {
        let rules = IntentRules::new();
        assert_eq!(rules.classify("xyzzy"), Intent::Unknown);
    }
}
