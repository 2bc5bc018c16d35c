//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: the two-state lifecycle of a discovered page
//! - `Page`: the record built up as a page moves through the pipeline
//! - `PageIdentity`: the content-addressed key of a page
//! - `MediaKind`: categories of embedded media

mod page;
mod page_state;

// Re-export main types
pub use page::{MediaKind, Page, PageIdentity};
pub use page_state::PageState;
