use crate::Context;
use crate::error::{Error, ErrorKind, Result};
use async_stream::stream;
use derive_more::Display;
use exn::ResultExt;
use futures::{Stream, StreamExt};
use novelfetch_extract::{HttpMethod, Provider, Resource, normalize_url};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;
use tracing::instrument;

/// Progress events emitted by [`fetch`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once, with the number of chapters.
/// 2. [`Progress`](Self::Progress), exactly once per chapter, in completion
///    order, with `count` running from 1 to `total`.
/// 3. [`Complete`](Self::Complete), exactly once.
///
/// A cache failure terminates the stream early with an `Err`, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug)]
pub enum FetchEvent {
    Started(usize),
    Progress {
        count: usize,
        total: usize,
        locator: String,
        outcome: Outcome,
    },
    Complete(Summary),
}

/// How a single chapter job ended.
#[derive(Debug, Display)]
pub enum Outcome {
    /// Already in the cache; no request was made.
    #[display("cached")]
    Cached,
    /// Downloaded and cached.
    #[display("fetched")]
    Fetched,
    /// The same chapter appeared earlier in the list.
    #[display("duplicate")]
    Duplicate,
    /// Download or extraction failed. The chapter stays uncached, so the
    /// next run tries it again.
    #[display("skipped")]
    Skipped(Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub cached: usize,
    pub fetched: usize,
    pub duplicate: usize,
    pub skipped: usize,
}
impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Cached => self.cached += 1,
            Outcome::Fetched => self.fetched += 1,
            Outcome::Duplicate => self.duplicate += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Streams [`FetchEvent`]s while making sure every chapter in `resources` is
/// in the cache.
///
/// Chapters are worked through in list order, at most `ctx.workers` at a
/// time, each on its own task so they run in parallel on a multi-threaded
/// runtime; another is started each time one completes. Chapters that are
/// already cached complete without a request. Failing to download or parse a
/// chapter is reported as [`Outcome::Skipped`] and doesn't stop the stream;
/// failing to read or write the cache does.
///
/// Dropping the stream aborts every chapter still in flight.
pub fn fetch<'a>(
    ctx: &'a Arc<Context>,
    provider: &'a Provider,
    resources: &'a [Resource],
) -> impl Stream<Item = Result<FetchEvent>> + 'a {
    stream!({
        let total = resources.len();
        yield Ok(FetchEvent::Started(total));

        let mut seen = HashSet::new();
        let mut pending: VecDeque<_> = resources
            .iter()
            .map(|resource| {
                let duplicate = !seen.insert(resource.locator.as_str());
                fetch_chapter(Arc::clone(ctx), *provider, resource.clone(), duplicate)
            })
            .collect();
        let mut processing = JoinSet::new();
        for job in pending.drain(..ctx.workers.min(pending.len())) {
            processing.spawn(job);
        }

        let mut summary = Summary { total, ..Summary::default() };
        let completed = AtomicUsize::new(0);
        while let Some(joined) = processing.join_next().await {
            let (resource, outcome) = match joined.or_raise(|| ErrorKind::Worker).and_then(|result| result) {
                Ok(done) => done,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
            summary.record(&outcome);
            yield Ok(FetchEvent::Progress { count, total, locator: resource.locator, outcome });
            // Pop-n-push, oldest first.
            if let Some(next) = pending.pop_front() {
                processing.spawn(next);
            }
        }

        yield Ok(FetchEvent::Complete(summary));
    })
}

/// Drives [`fetch`] to completion, logging progress along the way.
pub async fn fetch_all(ctx: &Arc<Context>, provider: &Provider, resources: &[Resource]) -> Result<Summary> {
    let mut events = std::pin::pin!(fetch(ctx, provider, resources));
    let mut summary = Summary::default();
    while let Some(event) = events.next().await {
        match event? {
            FetchEvent::Started(total) => tracing::info!(total, workers = ctx.workers, "Fetching chapters"),
            FetchEvent::Progress { count, total, locator, outcome: Outcome::Skipped(err) } => {
                tracing::warn!(count, total, %locator, retryable = err.is_retryable(), error = ?err, "Chapter skipped");
            },
            FetchEvent::Progress { count, total, locator, outcome } => {
                tracing::info!(count, total, %locator, %outcome, "Chapter ready");
            },
            FetchEvent::Complete(done) => summary = done,
        }
    }
    tracing::info!(
        total = summary.total,
        cached = summary.cached,
        fetched = summary.fetched,
        duplicate = summary.duplicate,
        skipped = summary.skipped,
        "Fetch complete"
    );
    Ok(summary)
}

#[instrument(level = "debug", skip(ctx, provider, resource), fields(locator = %resource.locator))]
async fn fetch_chapter(
    ctx: Arc<Context>,
    provider: Provider,
    resource: Resource,
    duplicate: bool,
) -> Result<(Resource, Outcome)> {
    if duplicate {
        return Ok((resource, Outcome::Duplicate));
    }
    let cached: Option<String> = ctx.store.get(&resource.locator).await.or_raise(|| ErrorKind::Cache)?;
    // An empty payload is what an earlier failed attempt may have left behind.
    if cached.is_some_and(|payload| !payload.is_empty()) {
        return Ok((resource, Outcome::Cached));
    }
    let payload = match download(&ctx, provider, &resource).await {
        Ok(payload) => payload,
        Err(e) => return Ok((resource, Outcome::Skipped(e))),
    };
    ctx.store.put(&resource.locator, &payload).await.or_raise(|| ErrorKind::Cache)?;
    Ok((resource, Outcome::Fetched))
}

async fn download(ctx: &Context, provider: Provider, resource: &Resource) -> Result<String> {
    // Chapter pages are always plain GETs, whatever the listing needs, and
    // the status code is ignored: the payload selector decides.
    let page = ctx.transport.send(HttpMethod::Get, &normalize_url(&resource.locator)).await?;
    // Parsing is CPU-bound; keep it off the runtime's worker threads.
    let resource = resource.clone();
    tokio::task::spawn_blocking(move || provider.chapter(&resource, &page.body))
        .await
        .or_raise(|| ErrorKind::Extract)?
        .or_raise(|| ErrorKind::Extract)
}
