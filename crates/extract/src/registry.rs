//! Built-in providers and provider lookup by URL.

use crate::models::HttpMethod;
use crate::provider::{ListOrder, Provider};
use crate::url::normalize;

/// Madara-themed site: the chapter list is only served by a `POST` to an AJAX
/// endpoint below the novel's page, newest chapter first.
pub const BOXNOVEL: Provider = Provider::new(
    "boxnovel.com",
    ".wp-manga-chapter a",
    ".read-container .reading-content .text-left",
)
.with_method(HttpMethod::Post)
.with_list_url(boxnovel_list_url);

pub const VOLARE_NOVELS: Provider =
    Provider::new("volarenovels.com", ".panel .list-chapters a", ".panel.panel-default .panel-body")
        .with_qualified_links(true)
        .with_order(ListOrder::OldestFirst)
        .with_list_url(https_list_url);

pub const WUXIAWORLD_CO: Provider = Provider::new("wuxiaworld.co", "ul.chapter-list a.chapter-item", "#chapter-entity")
    .with_qualified_links(true)
    .with_order(ListOrder::OldestFirst);

/// WordPress blog: chapter links are grouped in collapsible `<details>`
/// blocks on the table-of-contents post, in reading order.
pub const EAT_APPLE_PIES: Provider =
    Provider::new("eatapplepies.com", ".entry-content details p a", "article.post .entry-content")
        .with_order(ListOrder::OldestFirst);

fn boxnovel_list_url(url: &str) -> String {
    normalize(&format!("{}/ajax/chapters/", url.trim().trim_end_matches('/')))
}

fn https_list_url(url: &str) -> String {
    let url = url.trim();
    match url.strip_prefix("http://") {
        Some(rest) => normalize(&format!("https://{rest}")),
        None => normalize(url),
    }
}

/// Ordered set of providers. Lookups test each provider in declaration order
/// and return the first one that supports the URL.
///
/// ```
/// use novelfetch_extract::Registry;
///
/// let registry = Registry::default();
/// let provider = registry.find("https://boxnovel.com/novel/some-novel/").unwrap();
/// assert_eq!(provider.domain, "boxnovel.com");
/// assert!(registry.find("https://example.com/novel").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    providers: Vec<Provider>,
}
impl Registry {
    pub fn new(providers: impl IntoIterator<Item = Provider>) -> Self {
        Self { providers: providers.into_iter().collect() }
    }

    /// First provider (in declaration order) supporting `url`.
    pub fn find(&self, url: &str) -> Option<&Provider> {
        let provider = self.providers.iter().find(|provider| provider.supports(url));
        match provider {
            Some(p) => tracing::debug!(domain = p.domain, url, "Provider selected"),
            None => tracing::debug!(url, "No provider supports URL"),
        }
        provider
    }

    /// Domains of every registered provider, in declaration order.
    pub fn domains(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|provider| provider.domain)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}
impl Default for Registry {
    fn default() -> Self {
        Self::new([BOXNOVEL, VOLARE_NOVELS, WUXIAWORLD_CO, EAT_APPLE_PIES])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resource;
    use rstest::rstest;

    #[rstest]
    #[case("https://boxnovel.com", Some("boxnovel.com"))]
    #[case("https://test.boxnovel.com", Some("boxnovel.com"))]
    #[case("https://boxnovel.com/novel/i-might-be-a-fake-cultivator/", Some("boxnovel.com"))]
    #[case("https://boxnovel.com.nonsense/novel/i-might-be-a-fake-cultivator/", None)]
    #[case("http://www.volarenovels.com/novel/abc", Some("volarenovels.com"))]
    #[case("https://www.wuxiaworld.co/Rebirth-of-the-Thief/", Some("wuxiaworld.co"))]
    #[case("https://wuxiaworld.com/novel/abc", None)]
    #[case("https://test.eatapplepies.com", Some("eatapplepies.com"))]
    #[case("https://eatapplepies.com/trash-of-the-counts-family/table-of-contents/", Some("eatapplepies.com"))]
    #[case("https://eatapplepies.com.nonsense/trash-of-the-counts-family/", None)]
    #[case("https://example.com", None)]
    fn test_find(#[case] url: &str, #[case] expected: Option<&str>) {
        let registry = Registry::default();
        assert_eq!(registry.find(url).map(|p| p.domain), expected);
    }

    #[test]
    fn test_first_declared_provider_wins() {
        let first = Provider::new("example.com", "a.first", "div");
        let second = Provider::new("example.com", "a.second", "div");
        let registry = Registry::new([first, second]);
        assert_eq!(registry.find("https://example.com/x").unwrap().list_selector, "a.first");
    }

    #[test]
    fn test_domains() {
        let registry = Registry::default();
        let domains: Vec<_> = registry.domains().collect();
        assert_eq!(domains, vec!["boxnovel.com", "volarenovels.com", "wuxiaworld.co", "eatapplepies.com"]);
        assert_eq!(registry.providers().len(), 4);
    }

    #[test]
    fn test_provider_usable_from_other_threads() {
        let handle = std::thread::spawn(|| Registry::default().find("https://boxnovel.com").map(|p| p.domain));
        assert_eq!(handle.join().unwrap(), Some("boxnovel.com"));
    }

    #[rstest]
    #[case("https://boxnovel.com/novel/abc", "https://boxnovel.com/novel/abc/ajax/chapters/")]
    #[case("https://boxnovel.com/novel/abc/", "https://boxnovel.com/novel/abc/ajax/chapters/")]
    #[case("https://boxnovel.com/novel//abc//", "https://boxnovel.com/novel/abc/ajax/chapters/")]
    fn test_boxnovel_list_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(BOXNOVEL.list_url(url), expected);
        assert_eq!(BOXNOVEL.method, HttpMethod::Post);
    }

    #[rstest]
    #[case("http://www.volarenovels.com/novel/abc", "https://www.volarenovels.com/novel/abc")]
    #[case("https://www.volarenovels.com//novel/abc", "https://www.volarenovels.com/novel/abc")]
    fn test_volare_list_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(VOLARE_NOVELS.list_url(url), expected);
    }

    #[test]
    fn test_boxnovel_chapter_list() {
        let html = r#"
            <div id="oh">
              <ul class="main version-chap">
                <li class="wp-manga-chapter"><a href="https://test.com/5">Teste5</a></li>
                <li class="wp-manga-chapter"><a href="https://test.com/4">Teste4</a></li>
                <li class="wp-manga-chapter"><a href="https://test.com/3">Teste3</a></li>
              </ul>
            </div>
        "#;
        let resources = BOXNOVEL.chapter_list("https://boxnovel.com/novel/x/ajax/chapters/", html).unwrap();
        let locators: Vec<_> = resources.iter().map(|r| r.locator.as_str()).collect();
        assert_eq!(locators, vec!["https://test.com/5", "https://test.com/4", "https://test.com/3"]);
    }

    #[test]
    fn test_boxnovel_chapter() {
        let html = r#"<html><body>
            <div class="random"><h1>RANDOM</h1>
              <div class="entry-content_wrap"><div class="read-container"><div class="reading-content"><div class="text-left"><p>Paragraph 01</p><p>Paragraph 02</p></div></div></div></div>
            </div>
        </body></html>"#;
        let resource = Resource::new("https://boxnovel.com/novel/x/chapter-1", "Chapter 1");
        let payload = BOXNOVEL.chapter(&resource, html).unwrap();
        assert_eq!(payload, "<h1>Chapter 1</h1>\n<p>Paragraph 01</p><p>Paragraph 02</p>");
    }

    #[test]
    fn test_wuxiaworld_chapter_list() {
        let html = r#"
            <ul class="chapter-list clearfix">
              <a class="chapter-item" href="/Rebirth/1020876.html"><div class="chapter-info"><p class="chapter-name">Chapter 1 – Rebirth</p></div></a>
              <a class="chapter-item" href="/Rebirth/1020877.html"><div class="chapter-info"><p class="chapter-name">Chapter 2 – To Meet Once Again</p></div></a>
            </ul>
        "#;
        let resources = WUXIAWORLD_CO.chapter_list("https://www.wuxiaworld.co/Rebirth/", html).unwrap();
        assert_eq!(
            resources,
            vec![
                Resource::new("https://www.wuxiaworld.co/Rebirth/1020876.html", "Chapter 1 – Rebirth"),
                Resource::new("https://www.wuxiaworld.co/Rebirth/1020877.html", "Chapter 2 – To Meet Once Again"),
            ]
        );
    }

    #[test]
    fn test_eatapplepies_chapter_list() {
        let html = r#"
            <div class="entry-content">
              <details>
                <summary>Chapters 1-100</summary>
                <p>
                  <a href="https://eatapplepies.com/tcf-chapter-1/" target="_blank"> &#8212; Chapter 1: Prologue</a><br />
                  <a href="https://eatapplepies.com/tcf-chapter-2/" target="_blank"> &#8212; Chapter 2: When I Opened My Eyes (1)</a><br />
                </p>
              </details>
              <details>
                <summary>Chapters 101-200</summary>
                <p>
                  <a href="https://eatapplepies.com/tcf-chapter-101/" target="_blank"> &#8212; Chapter 101: It’s real (1)</a><br />
                </p>
              </details>
            </div>
            <div class="sidebar"><a href="https://eatapplepies.com/about/">About</a></div>
        "#;
        let resources = EAT_APPLE_PIES.chapter_list("https://eatapplepies.com/tcf/table-of-contents/", html).unwrap();
        let locators: Vec<_> = resources.iter().map(|r| r.locator.as_str()).collect();
        assert_eq!(
            locators,
            vec![
                "https://eatapplepies.com/tcf-chapter-1/",
                "https://eatapplepies.com/tcf-chapter-2/",
                "https://eatapplepies.com/tcf-chapter-101/",
            ]
        );
        assert_eq!(resources[0].label, "— Chapter 1: Prologue");
        assert_eq!(EAT_APPLE_PIES.order, ListOrder::OldestFirst);
    }

    #[test]
    fn test_eatapplepies_chapter() {
        let html = r#"<html><body><div id="primary"><div id="content" role="main">
            <nav id="nav-single"><span class="nav-next"><a href="https://eatapplepies.com/tcf-chapter-2/">Next</a></span></nav>
            <article id="post-11" class="post-11 post type-post status-publish"><header class="entry-header"><h1 class="entry-title">Chapter 1 &#8211; Prologue</h1></header><div class="entry-content"><p>When I opened my eyes, I was inside a novel.</p><p>[The Birth of a Hero].</p></div></article>
        </div></div></body></html>"#;
        let resource = Resource::new("https://eatapplepies.com/tcf-chapter-1/", "Chapter 1");
        let payload = EAT_APPLE_PIES.chapter(&resource, html).unwrap();
        assert_eq!(
            payload,
            "<h1>Chapter 1</h1>\n<p>When I opened my eyes, I was inside a novel.</p><p>[The Birth of a Hero].</p>"
        );
    }
}
