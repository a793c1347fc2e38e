//! Keeps vendor responses and credentials from leaking into logs in full.

use std::borrow::Cow;

const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept by [`mask_secret`].
const MASK_VISIBLE: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Cut `s` down to `TRUNCATE_LIMIT` bytes, noting the original length.
pub fn truncate_for_log(s: &str) -> Cow<'_, str> {
    if s.len() <= TRUNCATE_LIMIT {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        ))
    }
}

/// Show only the first few characters of a credential, e.g. `AKID****`.
pub fn mask_secret(s: &str) -> String {
    let visible: String = s.chars().take(MASK_VISIBLE).collect();
    if visible.len() == s.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
