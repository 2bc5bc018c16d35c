/// Page state definitions for tracking crawl progress
///
/// A page is `Pending` from the moment its URL is discovered until the
/// aggregation stage records its fetched and parsed data, after which it is
/// `Ready`. The transition is one-way.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageState {
    /// Page has been discovered and is waiting to be fetched and parsed
    #[default]
    Pending,

    /// Page has been fetched, parsed and recorded
    Ready,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if the page still awaits processing
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
