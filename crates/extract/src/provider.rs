//! Per-site configuration describing how to crawl a novel.

use crate::consts::{CHAPTER_PREFIX, DOUBLED_PREFIX};
use crate::error::{ErrorKind, Result};
use crate::models::{HttpMethod, Resource};
use crate::url::{host, normalize, qualify};
use scraper::{Html, Selector};
use tracing::instrument;

/// Order in which a site lists its chapters on the table of contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Latest chapter at the top; discovery reverses the list.
    #[default]
    NewestFirst,
    /// Already in publication order.
    OldestFirst,
}

/// Everything the pipeline needs to know about one site.
///
/// A provider is plain data (selectors, HTTP method, URL rules) plus a small
/// function mapping the table-of-contents URL a user pastes to the URL that
/// actually lists the chapters. None of the fetching code branches on which
/// provider is in use.
///
/// ```
/// use novelfetch_extract::{HttpMethod, Provider};
///
/// let provider = Provider::new("example.com", "ul.toc a", "div.chapter")
///     .with_method(HttpMethod::Post)
///     .with_qualified_links(true);
/// assert!(provider.supports("https://www.example.com/novel/abc"));
/// assert!(!provider.supports("https://example.com.evil/novel/abc"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Provider {
    /// Domain handled by this provider (subdomains included).
    pub domain: &'static str,
    /// CSS selector matching every chapter link on the table of contents.
    pub list_selector: &'static str,
    /// CSS selector matching the chapter text on a chapter page.
    pub payload_selector: &'static str,
    /// Method used to request the chapter listing.
    pub method: HttpMethod,
    /// Chapter links are relative and need the listing's scheme and host.
    pub qualify_links: bool,
    /// Order of the chapter links in the listing's document.
    pub order: ListOrder,
    list_url: fn(&str) -> String,
}

impl Provider {
    pub const fn new(domain: &'static str, list_selector: &'static str, payload_selector: &'static str) -> Self {
        Self {
            domain,
            list_selector,
            payload_selector,
            method: HttpMethod::Get,
            qualify_links: false,
            order: ListOrder::NewestFirst,
            list_url: normalize,
        }
    }

    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub const fn with_qualified_links(mut self, qualify: bool) -> Self {
        self.qualify_links = qualify;
        self
    }

    pub const fn with_order(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }

    /// Replace the rule mapping a table-of-contents URL to the listing URL.
    pub const fn with_list_url(mut self, list_url: fn(&str) -> String) -> Self {
        self.list_url = list_url;
        self
    }

    /// Returns `true` if `url`'s host is this provider's domain or one of its
    /// subdomains.
    pub fn supports(&self, url: &str) -> bool {
        let Some(host) = host(url) else {
            return false;
        };
        let domain = self.domain.to_ascii_lowercase();
        host == domain || host.strip_suffix(domain.as_str()).is_some_and(|rest| rest.ends_with('.'))
    }

    /// URL to request for the chapter listing. This is also the key the
    /// listing is cached under.
    pub fn list_url(&self, url: &str) -> String {
        (self.list_url)(url)
    }

    /// Extracts the chapter links from a listing, in document order.
    ///
    /// Links without an `href` are dropped. Labels are the link text with
    /// whitespace collapsed.
    #[instrument(skip(self, html), fields(domain = self.domain, html_size = html.len()))]
    pub fn chapter_list(&self, list_url: &str, html: &str) -> Result<Vec<Resource>> {
        let selector = selector(self.list_selector)?;
        let document = Html::parse_document(html);
        let mut resources = Vec::new();
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
                continue;
            };
            let locator = match self.qualify_links {
                true => qualify(list_url, href)?,
                false => href.to_string(),
            };
            let label = element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
            resources.push(Resource::new(locator, label));
        }
        tracing::debug!(chapters = resources.len(), "Chapter links extracted");
        Ok(resources)
    }

    /// Extracts the chapter text for `resource` and prefixes it with a
    /// `Chapter <label>` heading.
    ///
    /// Sites often repeat the chapter title inside the text; every occurrence
    /// of the label is removed from the body so the title only appears once,
    /// in the heading. Both the heading and the match work on the label as it
    /// reads in serialized HTML, so `Q&A` is written and stripped as `Q&amp;A`.
    #[instrument(skip(self, html), fields(domain = self.domain, locator = %resource.locator))]
    pub fn chapter(&self, resource: &Resource, html: &str) -> Result<String> {
        let selector = selector(self.payload_selector)?;
        let document = Html::parse_document(html);
        let parts: Vec<String> = document.select(&selector).map(|element| element.inner_html()).collect();
        if parts.is_empty() {
            exn::bail!(ErrorKind::MissingPayload(resource.locator.clone()));
        }
        let mut body = parts.join("\n");
        if !resource.label.is_empty() {
            body = body.replace(&escape_text(&resource.label), "");
        }
        Ok(format!("<h1>{}</h1>\n{}", escape_text(&heading(&resource.label)), body))
    }
}

/// `Chapter <label>`, without doubling the prefix when the label already
/// carries it.
pub fn heading(label: &str) -> String {
    let heading = format!("{CHAPTER_PREFIX} {}", label.trim());
    DOUBLED_PREFIX.replace(&heading, CHAPTER_PREFIX).into_owned()
}

/// Escapes `text` the way text nodes are serialized.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn selector(css: &str) -> Result<Selector> {
    // Parse errors borrow the input and aren't `Send`, so they can't be kept
    // in the error tree.
    Ok(Selector::parse(css).map_err(|e| {
        tracing::debug!(error = ?e, css, "Selector failed to parse");
        ErrorKind::InvalidSelector(css.to_string())
    })?)
}
