use crate::Context;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use novelfetch_extract::{ListOrder, Provider, Resource};
use tracing::instrument;

/// Returns the chapters of the novel at `url`, oldest first.
///
/// The listing is requested once per novel: its chapters are cached (in the
/// order the site lists them) under the provider's list URL, and every later
/// call answers from the cache without touching the network.
#[instrument(skip(ctx, provider), fields(domain = provider.domain))]
pub async fn discover(ctx: &Context, provider: &Provider, url: &str) -> Result<Vec<Resource>> {
    let list_url = provider.list_url(url);
    let cached: Option<Vec<Resource>> = ctx.store.get(&list_url).await.or_raise(|| ErrorKind::Cache)?;
    let mut resources = match cached {
        Some(resources) => {
            tracing::debug!(%list_url, chapters = resources.len(), "Chapter list cached");
            resources
        },
        None => {
            let page = ctx.transport.send(provider.method, &list_url).await?;
            if page.status != 200 {
                tracing::debug!(%list_url, status = page.status, "Chapter list unavailable");
                exn::bail!(ErrorKind::Status(page.status));
            }
            let resources = provider.chapter_list(&list_url, &page.body).or_raise(|| ErrorKind::Extract)?;
            if resources.is_empty() {
                tracing::warn!(%list_url, selector = provider.list_selector, "No chapters found on the chapter list");
            }
            ctx.store.put(&list_url, &resources).await.or_raise(|| ErrorKind::Cache)?;
            tracing::info!(%list_url, chapters = resources.len(), "Chapter list discovered");
            resources
        },
    };
    if provider.order == ListOrder::NewestFirst {
        resources.reverse();
    }
    Ok(resources)
}
