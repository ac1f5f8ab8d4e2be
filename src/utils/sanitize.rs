//! Utilities for sanitizing error messages before they are stored in reports.
//!
//! Resolver and HTTP client messages are shown inline next to the record they
//! concern, so they are flattened to a single line and capped in length.

/// Sanitizes an error message for single-line display.
///
/// Control characters are removed, and newlines/tabs/carriage returns are
/// replaced by a single space each. Non-ASCII text is preserved.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncation counts characters, not bytes, so multi-byte text never splits.
/// A truncation note with the original length is appended when the message was cut.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let char_count = sanitized.chars().count();

    if char_count > crate::config::MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = crate::config::MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!("{truncated}... (truncated, original length: {char_count} chars)")
    } else {
        sanitized
    }
}
