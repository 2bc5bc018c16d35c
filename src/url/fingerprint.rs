use sha2::{Digest, Sha256};

/// Hashes a string into a fixed-length fingerprint
///
/// Returns the lowercase hex SHA-256 digest of the UTF-8 bytes, always 64
/// characters long.
///
/// # Examples
///
/// ```
/// use webcrawler::url::fingerprint;
///
/// assert_eq!(fingerprint("abc"), fingerprint("abc"));
/// assert_eq!(fingerprint("abc").len(), 64);
/// ```
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_length() {
        assert_eq!(fingerprint("abc").len(), fingerprint("123456789").len());
        assert_eq!(fingerprint("").len(), 64);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_eq!(
            fingerprint("http://site.com/page"),
            fingerprint("http://site.com/page")
        );
    }

    #[test]
    fn test_distinct_inputs() {
        assert_ne!(fingerprint(""), fingerprint(" "));
        assert_ne!(fingerprint("abc"), fingerprint("Abc"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
