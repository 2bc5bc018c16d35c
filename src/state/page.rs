//! The page record and its content-addressed identity

use crate::state::PageState;
use crate::url::fingerprint;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Content-addressed key of a page: the SHA-256 hex digest of its URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageIdentity(String);

impl PageIdentity {
    /// Computes the identity of a URL
    pub fn of(url: &str) -> Self {
        Self(fingerprint(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kinds of embedded media collected from a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    Plugin,
    Iframe,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Plugin => "plugin",
            Self::Iframe => "iframe",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One crawled resource
///
/// `id` and `url` are fixed at creation. Everything else is filled in as the
/// page moves through the fetch and parse stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: PageIdentity,
    url: String,

    /// Lifecycle state; only ever moves from `Pending` to `Ready`
    pub state: PageState,

    /// HTTP status code; 0 when no HTTP response was received
    pub status_code: u16,

    /// Content-Type reported by the server
    pub mime_type: Option<String>,

    /// Raw markup, present only for HTML resources
    pub raw_markup: Option<String>,

    pub title: Option<String>,

    /// Absolute, cleaned-up links on the same domain
    pub internal_links: HashSet<String>,

    /// Absolute, cleaned-up links to other domains
    pub external_links: HashSet<String>,

    /// Media sources as written in the markup, keyed by kind
    pub media: HashMap<MediaKind, HashSet<String>>,
}

impl Page {
    /// Creates an empty pending page for a URL
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: PageIdentity::of(&url),
            url,
            state: PageState::Pending,
            status_code: 0,
            mime_type: None,
            raw_markup: None,
            title: None,
            internal_links: HashSet::new(),
            external_links: HashSet::new(),
            media: HashMap::new(),
        }
    }

    pub fn id(&self) -> &PageIdentity {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true if the page was fetched and parsed as HTML
    pub fn is_html(&self) -> bool {
        self.raw_markup.is_some()
    }

    /// Returns the media sources of one kind, if any were found
    pub fn media_of(&self, kind: MediaKind) -> Option<&HashSet<String>> {
        self.media.get(&kind)
    }

    /// Total number of media sources across all kinds
    pub fn media_count(&self) -> usize {
        self.media.values().map(HashSet::len).sum()
    }

    /// Adds media sources of one kind, skipping empty values
    pub fn add_media<I>(&mut self, kind: MediaKind, sources: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut sources = sources.into_iter().filter(|s| !s.is_empty()).peekable();
        if sources.peek().is_none() {
            return;
        }
        self.media.entry(kind).or_default().extend(sources);
    }

    /// Marks the page as fully processed
    pub fn mark_ready(&mut self) {
        self.state = PageState::Ready;
    }
}
