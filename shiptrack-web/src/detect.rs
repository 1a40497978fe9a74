//! Carrier auto-detection from tracking-number shape
//!
//! An ordered table of compiled regex patterns, one per carrier, evaluated
//! first match wins. Each entry also carries the official-site deep-link
//! template used as the fallback when no tracking provider is configured.

use regex::Regex;

/// A compiled carrier tracking-number pattern
#[derive(Debug)]
pub struct CarrierPattern {
    /// Carrier slug used in `carrier:code` queries (e.g. "ups")
    pub slug: &'static str,

    /// Human-readable carrier name
    pub display: &'static str,

    /// Anchored pattern matching a full tracking number
    exact: Regex,

    /// Unanchored pattern for scanning free text (email bodies)
    scan: Regex,

    /// Official tracking page; `{code}` is substituted
    link_template: &'static str,
}

impl CarrierPattern {
    fn new(
        slug: &'static str,
        display: &'static str,
        pattern: &str,
        link_template: &'static str,
    ) -> Self {
        Self {
            slug,
            display,
            exact: Regex::new(&format!("(?i)^{}$", pattern)).expect("Invalid carrier pattern"),
            scan: Regex::new(&format!(r"(?i)\b{}\b", pattern)).expect("Invalid carrier pattern"),
            link_template,
        }
    }

    /// Check whether `code` is a full match for this carrier
    pub fn matches(&self, code: &str) -> bool {
        self.exact.is_match(code.trim())
    }

    /// Official tracking deep link for `code`
    pub fn official_link(&self, code: &str) -> String {
        self.link_template.replace("{code}", code.trim())
    }
}

/// Ordered carrier pattern table
///
/// More specific shapes come first so e.g. USPS 22-digit labels are not
/// swallowed by looser numeric patterns.
pub struct DetectTable {
    patterns: Vec<CarrierPattern>,
}

impl DetectTable {
    pub fn new() -> Self {
        let patterns = vec![
            CarrierPattern::new(
                "ups",
                "UPS",
                r"1Z[0-9A-Z]{16}",
                "https://www.ups.com/track?track=yes&trackNums={code}",
            ),
            CarrierPattern::new(
                "usps",
                "USPS",
                r"9[234]\d{20,24}",
                "https://tools.usps.com/go/TrackConfirmAction?tLabels={code}",
            ),
            CarrierPattern::new(
                "fedex",
                "FedEx",
                r"\d{15}",
                "https://www.fedex.com/fedextrack/?trknbr={code}",
            ),
            CarrierPattern::new(
                "fedex",
                "FedEx",
                r"\d{12}",
                "https://www.fedex.com/fedextrack/?trknbr={code}",
            ),
            CarrierPattern::new(
                "dhl",
                "DHL",
                r"\d{10}",
                "https://www.dhl.com/en/express/tracking.html?AWB={code}",
            ),
        ];
        Self { patterns }
    }

    /// First pattern fully matching `code`, if any
    pub fn detect(&self, code: &str) -> Option<&CarrierPattern> {
        self.patterns.iter().find(|p| p.matches(code))
    }

    /// True when `slug` names a known carrier
    pub fn knows_carrier(&self, slug: &str) -> bool {
        let slug = slug.to_ascii_lowercase();
        self.patterns.iter().any(|p| p.slug == slug)
    }

    /// Scan free text for candidate tracking codes, in order of appearance.
    /// Duplicates are collapsed.
    pub fn extract_candidates(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.scan.find_iter(text) {
                let code = m.as_str().to_uppercase();
                if !found.contains(&code) {
                    found.push(code);
                }
            }
        }
        found
    }
}

impl Default for DetectTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ups_shape() {
        let table = DetectTable::new();
        let hit = table.detect("1Z999AA10123456784").unwrap();
        assert_eq!(hit.slug, "ups");
        assert!(hit.official_link("1Z999AA10123456784").contains("ups.com"));
    }

    #[test]
    fn detects_usps_before_plain_digits() {
        let table = DetectTable::new();
        let hit = table.detect("9400111899223100000000").unwrap();
        assert_eq!(hit.slug, "usps");
    }

    #[test]
    fn detects_fedex_and_dhl_digit_lengths() {
        let table = DetectTable::new();
        assert_eq!(table.detect("123456789012").unwrap().slug, "fedex");
        assert_eq!(table.detect("123456789012345").unwrap().slug, "fedex");
        assert_eq!(table.detect("1234567890").unwrap().slug, "dhl");
    }

    #[test]
    fn unknown_shape_detects_nothing() {
        let table = DetectTable::new();
        assert!(table.detect("HELLO-WORLD").is_none());
        assert!(table.detect("12345").is_none());
    }

    #[test]
    fn extracts_codes_from_free_text() {
        let table = DetectTable::new();
        let text = "Your parcel 1z999aa10123456784 shipped. Ref 1Z999AA10123456784 again.";
        let codes = table.extract_candidates(text);
        assert_eq!(codes, vec!["1Z999AA10123456784".to_string()]);
    }

    #[test]
    fn knows_carrier_slugs() {
        let table = DetectTable::new();
        assert!(table.knows_carrier("ups"));
        assert!(table.knows_carrier("FEDEX"));
        assert!(!table.knows_carrier("pigeon"));
    }
}
