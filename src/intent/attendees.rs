//! Attendee name extraction from the raw request text using pattern
//! matching. Complements whatever the model reports so a mention like
//! "lunch with Alice" isn't lost.

use std::collections::BTreeSet;

use regex::Regex;

/// Common patterns for names in event requests
const NAME_PATTERNS: &[&str] = &[
    r"[Ww]ith\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
    r"@\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
    r"[Ii]nvite\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
];

pub fn extract_attendees(text: &str) -> BTreeSet<String> {
    let mut attendees = BTreeSet::new();
    for pattern in NAME_PATTERNS {
        let re = Regex::new(pattern).unwrap();
        for caps in re.captures_iter(text) {
            attendees.insert(caps[1].trim().to_string());
        }
    }
    attendees
}
