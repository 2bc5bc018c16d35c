/// Strips scheme, `www.` prefix, port and everything after the host
///
/// Works on bare host strings as well as full URLs, so both
/// `http://www.example.com:8080/a` and `www.example.com/a` reduce to
/// `example.com`.
///
/// # Examples
///
/// ```
/// use webcrawler::url::strip_domain;
///
/// assert_eq!(strip_domain("https://www.example.com:8080/path"), "example.com");
/// assert_eq!(strip_domain("example.com"), "example.com");
/// ```
pub fn strip_domain(url: &str) -> &str {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    let host_and_port = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    host_and_port.split(':').next().unwrap_or_default()
}

/// Returns true if `url` lives outside the domain of `base_url`
///
/// Both sides are reduced with [`strip_domain`] and compared
/// case-insensitively. Subdomains other than `www.` count as external.
pub fn is_external(url: &str, base_url: &str) -> bool {
    !strip_domain(url).eq_ignore_ascii_case(strip_domain(base_url))
}
