//! HTML sanitization for description text.
//!
//! Descriptions arrive from two untrusted directions: interactive catalog
//! edits and the completion endpoint. Both paths pass through here before
//! anything is persisted.

/// Sanitize HTML in description text.
///
/// Keeps a conservative formatting tag set and strips scripts, styles, and
/// event handlers. Idempotent: sanitizing already-sanitized text yields the
/// same string, so re-saving a stored description never mangles it.
pub fn sanitize_html(input: &str) -> String {
    ammonia::clean(input)
}
