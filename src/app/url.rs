//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::InputError;

/// First characters of an over-long URL, for log messages.
fn preview(url: &str) -> String {
    url.chars().take(50).collect()
}

fn is_http_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// Whether `scheme` is syntactically a URL scheme (`ftp`, `file`, `svn+ssh`, ...).
fn is_scheme_name(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Validates and normalizes a page URL.
///
/// Trims surrounding whitespace, adds an `https://` prefix if no scheme is given,
/// then validates that the URL is syntactically valid, has a host, and uses the
/// http or https scheme. URLs longer than `MAX_URL_LENGTH` (before or after
/// normalization) are rejected.
///
/// # Errors
///
/// - `InputError::EmptyUrl` for an empty or whitespace-only input
/// - `InputError::UnsupportedScheme` for schemes other than http/https
/// - `InputError::InvalidUrl` for over-long or unparseable URLs
pub fn validate_and_normalize_url(url: &str) -> Result<String, InputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InputError::EmptyUrl);
    }

    // Check URL length before normalization
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            preview(url)
        );
        return Err(InputError::InvalidUrl(format!(
            "URL exceeds {MAX_URL_LENGTH} characters"
        )));
    }

    // Normalize: add https:// prefix if missing
    let normalized = match url.split_once("://") {
        Some((scheme, _)) if is_http_scheme(scheme) => url.to_string(),
        Some((scheme, _)) if is_scheme_name(scheme) => {
            return Err(InputError::UnsupportedScheme(scheme.to_string()));
        }
        _ => format!("https://{url}"),
    };

    // Adding the prefix can push a URL over the limit
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            preview(&normalized)
        );
        return Err(InputError::InvalidUrl(format!(
            "URL exceeds {MAX_URL_LENGTH} characters after adding a scheme"
        )));
    }

    let parsed = url::Url::parse(&normalized)
        .map_err(|e| InputError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|host| !host.is_empty()) => {
            Ok(normalized)
        }
        "http" | "https" => Err(InputError::InvalidUrl(format!("{url}: missing host"))),
        other => Err(InputError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;
    use crate::error_handling::InputError;

    #[test]
    fn test_validate_and_normalize_url_adds_https() {
        let result = validate_and_normalize_url("example.com").unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn test_validate_and_normalize_url_preserves_scheme() {
        assert_eq!(
            validate_and_normalize_url("https://example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            validate_and_normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_validate_and_normalize_url_trims_whitespace() {
        assert_eq!(
            validate_and_normalize_url("  example.com/page \n").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_empty() {
        assert!(matches!(validate_and_normalize_url(""), Err(InputError::EmptyUrl)));
        assert!(matches!(validate_and_normalize_url("   "), Err(InputError::EmptyUrl)));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_invalid_url() {
        assert!(matches!(
            validate_and_normalize_url("not a valid url!!!"),
            Err(InputError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_and_normalize_url("://example.com"),
            Err(InputError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_and_normalize_url("https://"),
            Err(InputError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_unsupported_schemes() {
        for (url, scheme) in [
            ("ftp://example.com", "ftp"),
            ("file:///path/to/file", "file"),
        ] {
            match validate_and_normalize_url(url) {
                Err(InputError::UnsupportedScheme(found)) => assert_eq!(found, scheme),
                other => panic!("expected unsupported scheme for {url}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_and_normalize_url_with_path_and_port() {
        assert_eq!(
            validate_and_normalize_url("example.com/path?query=value").unwrap(),
            "https://example.com/path?query=value"
        );
        assert_eq!(
            validate_and_normalize_url("example.com:8080").unwrap(),
            "https://example.com:8080"
        );
        assert_eq!(
            validate_and_normalize_url("example.com/path#fragment").unwrap(),
            "https://example.com/path#fragment"
        );
    }

    #[test]
    fn test_validate_and_normalize_url_ipv6() {
        assert_eq!(
            validate_and_normalize_url("http://[2001:db8::1]").unwrap(),
            "http://[2001:db8::1]"
        );
        assert_eq!(
            validate_and_normalize_url("[2001:db8::1]/path").unwrap(),
            "https://[2001:db8::1]/path"
        );
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long_url() {
        let long_url = format!("https://example.com/{}", "a".repeat(2100));
        assert!(matches!(
            validate_and_normalize_url(&long_url),
            Err(InputError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_and_normalize_url_accepts_url_at_limit() {
        // "https://example.com/" is 20 chars
        let url_at_limit = format!("https://example.com/{}", "a".repeat(2028));
        assert_eq!(url_at_limit.len(), 2048);
        assert!(validate_and_normalize_url(&url_at_limit).is_ok());
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long_url_after_normalization() {
        // 2042 chars as given, 2050 once https:// is added
        let url = format!("example.com/{}", "a".repeat(2030));
        assert!(url.len() <= 2048);
        assert!(matches!(
            validate_and_normalize_url(&url),
            Err(InputError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let url = "é".repeat(60);
        assert_eq!(super::preview(&url).chars().count(), 50);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_url_normalization_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}(/[a-z]{0,8})?") {
            let normalized1 = validate_and_normalize_url(&url).unwrap();
            let normalized2 = validate_and_normalize_url(&normalized1).unwrap();
            prop_assert_eq!(normalized1, normalized2,
                "Normalizing twice should produce same result");
        }

        #[test]
        fn test_url_length_validation(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            path in prop::collection::vec("[a-z]{1,10}", 0..200)
        ) {
            let url = format!("https://{}/{}", domain, path.join("/"));
            let result = validate_and_normalize_url(&url);

            if url.len() <= 2048 {
                prop_assert!(result.is_ok(),
                    "Valid URL under limit should normalize successfully");
            } else {
                prop_assert!(result.is_err(),
                    "URL over 2048 chars should be rejected");
            }
        }

        #[test]
        fn test_url_arbitrary_input_no_panic(input in "\\PC{0,100}") {
            let _ = validate_and_normalize_url(&input);
        }
    }
}
