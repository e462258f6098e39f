//! Resumable, concurrent chapter crawling.
//!
//! The pipeline is three steps, each reading and writing through the
//! content-addressed [`Store`]:
//!
//! 1. [`discover`] turns a table-of-contents URL into an ordered chapter list
//!    (cached, so it only ever hits the network once per novel),
//! 2. [`fetch`] downloads every chapter that isn't cached yet, a bounded
//!    number at a time,
//! 3. [`merge`] concatenates the cached chapters, in list order, into one
//!    document.
//!
//! Interrupting a run at any point loses nothing: the next run picks up from
//! whatever made it into the store.

mod discover;
pub mod error;
mod fetch;
mod merge;
pub mod transport;

pub use crate::discover::discover;
pub use crate::fetch::{FetchEvent, Outcome, Summary, fetch, fetch_all};
pub use crate::merge::{Merged, merge};
use crate::transport::TransportHandle;
use novelfetch_cache::Store;

/// Default number of chapters fetched at the same time.
pub const DEFAULT_WORKERS: usize = 4;

/// Everything the pipeline shares between steps.
///
/// [`fetch`] hands an `Arc<Context>` to every chapter task.
pub struct Context {
    pub store: Store,
    pub transport: TransportHandle,
    /// Upper bound on concurrently running chapter downloads.
    pub workers: usize,
}

impl Context {
    pub fn new(store: Store, transport: TransportHandle, workers: usize) -> Self {
        Self { store, transport, workers: workers.max(1) }
    }
}
