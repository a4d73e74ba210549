use std::sync::OnceLock;

use regex::Regex;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// A pragmatic email check: one `@`, a non-empty local part, and a dotted domain without spaces.
pub fn is_valid_email(email: &str) -> bool {
    let pattern = EMAIL_PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
    });
    pattern.is_match(email)
}
