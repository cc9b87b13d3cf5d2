//! Whole-word assertions on error messages.

use regex::RegexBuilder;

/// Returns true if `needle` occurs in `haystack` with no word character
/// directly before or after it.
///
/// `"https"` does not satisfy a search for `"http"`, but `"\"http\""` does.
///
/// # Example
/// ```
/// use testbed_tests::contains_with_non_abutting_text;
///
/// assert!(contains_with_non_abutting_text("protocols: http, https", "http", false));
/// assert!(!contains_with_non_abutting_text("protocols: https", "http", false));
/// assert!(contains_with_non_abutting_text("Protocol FTP", "ftp", true));
/// ```
pub fn contains_with_non_abutting_text(haystack: &str, needle: &str, ignore_case: bool) -> bool {
    let pattern = format!(r"(^|\W){}($|\W)", regex::escape(needle));
    RegexBuilder::new(&pattern)
        .case_insensitive(ignore_case)
        .build()
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

/// Panics unless `needle` occurs in `haystack` as non-abutting text.
#[track_caller]
pub fn assert_contains_non_abutting(haystack: &str, needle: &str) {
    assert!(
        contains_with_non_abutting_text(haystack, needle, false),
        "expected {:?} to contain {:?} with no adjacent word characters",
        haystack,
        needle
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_at_boundaries() {
        assert!(contains_with_non_abutting_text("http", "http", false));
        assert!(contains_with_non_abutting_text("http and more", "http", false));
        assert!(contains_with_non_abutting_text("more and http", "http", false));
        assert!(contains_with_non_abutting_text("(http)", "http", false));
    }

    #[test]
    fn test_rejects_abutting_text() {
        assert!(!contains_with_non_abutting_text("https only", "http", false));
        assert!(!contains_with_non_abutting_text("xhttp", "http", false));
        assert!(!contains_with_non_abutting_text("http_", "http", false));
    }

    #[test]
    fn test_needle_with_metacharacters() {
        let message = "value ftp://abc:123 has an unsupported protocol";
        assert!(contains_with_non_abutting_text(message, "ftp://abc:123", false));
        assert!(!contains_with_non_abutting_text("a.b", "a?b", false));
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(!contains_with_non_abutting_text("HTTP", "http", false));
        assert!(contains_with_non_abutting_text("HTTP", "http", true));
    }

    #[test]
    #[should_panic(expected = "no adjacent word characters")]
    fn test_assert_panics_on_abutting() {
        assert_contains_non_abutting("https", "http");
    }
}
