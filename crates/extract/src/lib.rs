//! Site providers and HTML extraction.
//!
//! A [`Provider`] describes one site: which links on its table of contents
//! are chapters, where the text lives on a chapter page, and how its URLs
//! need massaging. The [`Registry`] picks the provider for a URL.
//!
//! Everything in this crate is synchronous and side-effect free; fetching
//! pages and caching results is the crawler's job.

mod consts;
pub mod error;
pub mod models;
mod provider;
mod registry;
mod url;

pub use crate::models::{HttpMethod, Resource};
pub use crate::provider::{ListOrder, Provider, heading};
pub use crate::registry::{BOXNOVEL, EAT_APPLE_PIES, Registry, VOLARE_NOVELS, WUXIAWORLD_CO};
pub use crate::url::{normalize as normalize_url, qualify as qualify_url};
