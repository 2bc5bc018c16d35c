use crate::{UrlError, UrlResult};
use url::Url;

/// Characters that disqualify a URL from being followed
///
/// Reference: <https://perishablepress.com/stop-using-unsafe-characters-in-urls>
pub const UNSAFE_CHARS: &[char] = &[
    '"', '<', '>', '#', '%', '{', '}', '|', '\\', '^', '~', '[', ']', '`',
];

/// Returns true if the URL contains any character from [`UNSAFE_CHARS`]
pub fn contains_unsafe_chars(url: &str) -> bool {
    url.contains(UNSAFE_CHARS)
}

/// Removes the fragment (everything from the first `#`)
pub fn strip_bookmark(url: &str) -> &str {
    url.split('#').next().unwrap_or_default()
}

/// Removes the fragment and a single trailing slash
///
/// # Examples
///
/// ```
/// use webcrawler::url::clean_up_url;
///
/// assert_eq!(clean_up_url("http://site.com/page/#anchor"), "http://site.com/page");
/// assert_eq!(clean_up_url("http://site.com/page"), "http://site.com/page");
/// ```
pub fn clean_up_url(url: &str) -> &str {
    let url = strip_bookmark(url);
    url.strip_suffix('/').unwrap_or(url)
}

/// Validates and cleans up a seed URL
///
/// The seed goes through the same serialization as discovered links
/// (parsed, then cleaned up), so a link pointing back at the seed hashes
/// to the seed's identity.
///
/// # Returns
///
/// * `Ok(String)` - The cleaned-up absolute URL
/// * `Err(UrlError)` - The seed is not an absolute HTTP(S) URL with a host
pub fn normalize_seed(seed: &str) -> UrlResult<String> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(clean_up_url(url.as_str()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bookmark() {
        assert_eq!(
            strip_bookmark("http://www.my-domain.com#anchor"),
            "http://www.my-domain.com"
        );
        assert_eq!(
            strip_bookmark("http://www.my-domain.com/items/123456#anchor?queryString=123"),
            "http://www.my-domain.com/items/123456"
        );
        assert_eq!(
            strip_bookmark("http://www.my-domain.com?queryString=123#anchor"),
            "http://www.my-domain.com?queryString=123"
        );
    }

    #[test]
    fn test_clean_up_url() {
        assert_eq!(clean_up_url(""), "");
        assert_eq!(clean_up_url("/"), "");
        assert_eq!(
            clean_up_url("http://www.my-domain.com/#anchor"),
            "http://www.my-domain.com"
        );
    }

    #[test]
    fn test_clean_up_removes_single_slash_only() {
        assert_eq!(clean_up_url("http://site.com/a//"), "http://site.com/a/");
    }

    #[test]
    fn test_fragment_and_slash_variants_converge() {
        assert_eq!(
            clean_up_url("http://site.com/page/#anchor"),
            clean_up_url("http://site.com/page")
        );
    }

    #[test]
    fn test_contains_unsafe_chars() {
        for c in UNSAFE_CHARS {
            let url = format!("http://my-domain.com?q={}abc", c);
            assert!(contains_unsafe_chars(&url), "expected '{}' to be unsafe", c);
        }
    }

    #[test]
    fn test_safe_url() {
        assert!(!contains_unsafe_chars("http://my-domain.com/items/1?a=b&c=d"));
    }

    #[test]
    fn test_normalize_seed() {
        assert_eq!(
            normalize_seed("http://127.0.0.1:8080").unwrap(),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            normalize_seed("https://Example.com/docs/").unwrap(),
            "https://example.com/docs"
        );
        assert_eq!(
            normalize_seed("http://site.com/#top").unwrap(),
            "http://site.com"
        );
    }

    #[test]
    fn test_normalize_seed_rejects_bad_input() {
        assert!(matches!(normalize_seed(""), Err(UrlError::Parse(_))));
        assert!(matches!(normalize_seed("/relative"), Err(UrlError::Parse(_))));
        assert!(matches!(
            normalize_seed("ftp://site.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
    }
}
