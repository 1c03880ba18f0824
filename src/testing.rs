//! Testing utilities and assertion helpers.
//!
//! ```rust,ignore
//! use loops_action::providers::LocalSender;
//! use loops_action::testing::*;
//!
//! #[tokio::test]
//! async fn test_signup_confirmation() {
//!     let sender = LocalSender::new();
//!
//!     // ... dispatch an entry event ...
//!
//!     assert_payload_sent(&sender);
//!     assert_payload_to(&sender, "user@example.com");
//!     assert_variable_eq(&sender, "trigger_type", "create");
//!     assert_subject_matches(&sender, r"^Welcome, .+!$");
//! }
//! ```

use regex::Regex;

use crate::providers::LocalSender;
use crate::storage::StoredPayload;

/// Format a list of payloads for error messages.
fn format_payload_summary(payloads: &[StoredPayload]) -> String {
    if payloads.is_empty() {
        return "  (no payloads sent)".to_string();
    }

    payloads
        .iter()
        .enumerate()
        .map(|(i, stored)| {
            let p = &stored.payload;
            format!(
                "  {}. To: {}, Template: \"{}\", Subject: {:?}",
                i + 1,
                p.email,
                p.transactional_id,
                p.subject()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn last_payload(sender: &LocalSender) -> StoredPayload {
    sender
        .last_payload()
        .expect("Expected at least one payload to be sent, but none were sent")
}

/// Assert that at least one payload was sent.
///
/// # Panics
///
/// Panics if nothing was sent.
pub fn assert_payload_sent(sender: &LocalSender) {
    assert!(
        sender.has_payloads(),
        "Expected at least one payload to be sent, but none were sent"
    );
}

/// Assert that nothing was sent.
///
/// # Panics
///
/// Panics if any payload was sent.
pub fn assert_no_payloads_sent(sender: &LocalSender) {
    let payloads = sender.payloads();
    assert!(
        payloads.is_empty(),
        "Expected no payloads to be sent, but {} were sent.\n\nPayloads sent:\n{}",
        payloads.len(),
        format_payload_summary(&payloads)
    );
}

/// Assert that exactly N payloads were sent.
///
/// # Panics
///
/// Panics if the count doesn't match.
pub fn assert_payload_count(sender: &LocalSender, expected: usize) {
    let actual = sender.payload_count();
    assert!(
        actual == expected,
        "Expected {} payload(s) to be sent, but {} were sent.\n\nPayloads sent:\n{}",
        expected,
        actual,
        format_payload_summary(&sender.payloads())
    );
}

/// Assert that a payload was sent to a specific address.
///
/// # Panics
///
/// Panics if nothing was sent to the address.
pub fn assert_payload_to(sender: &LocalSender, email: &str) {
    assert!(
        sender.sent_to(email),
        "Expected a payload to be sent to '{}'.\n\nPayloads sent:\n{}",
        email,
        format_payload_summary(&sender.payloads())
    );
}

/// Assert that the last payload carries `name` = `value`.
///
/// # Panics
///
/// Panics if nothing was sent or the variable differs.
pub fn assert_variable_eq(sender: &LocalSender, name: &str, value: &str) {
    let last = last_payload(sender);
    let actual = last.payload.data_variables.get(name);
    assert!(
        actual == Some(value),
        "Expected variable '{}' to be '{}', but was {:?}.\n\nLast payload:\n{}",
        name,
        value,
        actual,
        format_payload_summary(&[last.clone()])
    );
}

/// Assert the last payload's rendered subject matches a regex pattern.
///
/// # Panics
///
/// Panics if nothing was sent, no subject was rendered, or it doesn't match.
pub fn assert_subject_matches(sender: &LocalSender, pattern: &str) {
    let last = last_payload(sender);
    let re = Regex::new(pattern).expect("Invalid regex pattern");
    let subject = last.payload.subject();

    assert!(
        subject.is_some_and(|s| re.is_match(s)),
        "Expected subject to match pattern '{}', but was {:?}.\n\nLast payload:\n{}",
        pattern,
        subject,
        format_payload_summary(&[last.clone()])
    );
}
