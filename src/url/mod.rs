//! URL handling module
//!
//! This module provides the URL utilities the crawl pipeline relies on:
//! - fingerprinting URLs into page identities
//! - reducing URLs to their bare domain and classifying links as
//!   internal or external
//! - cleaning up URLs (fragment and trailing slash) and rejecting URLs
//!   with unsafe characters

mod domain;
mod fingerprint;
mod normalize;

pub use domain::{is_external, strip_domain};
pub use fingerprint::fingerprint;
pub use normalize::{
    clean_up_url, contains_unsafe_chars, normalize_seed, strip_bookmark, UNSAFE_CHARS,
};
