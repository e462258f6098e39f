//! URL helpers shared by every provider.

use crate::consts::{MANGLED_SCHEME, REPEATED_SLASHES};
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use url::Url;

/// Collapses repeated path separators, then repairs the scheme separator that
/// the collapse mangled (`https:/host` becomes `https://host` again).
///
/// ```
/// use novelfetch_extract::normalize_url;
/// assert_eq!(normalize_url("https://x.com//a//b/"), "https://x.com/a/b/");
/// assert_eq!(normalize_url("http:/x.com/a"), "http://x.com/a");
/// ```
pub fn normalize(url: &str) -> String {
    let collapsed = REPEATED_SLASHES.replace_all(url.trim(), "/");
    MANGLED_SCHEME.replace(&collapsed, "$1://").into_owned()
}

/// Turns a link found on `base` into an absolute URL by prepending the
/// scheme and host (and port) of `base`. Links that are already absolute are
/// returned untouched.
pub fn qualify(base: &str, href: &str) -> Result<String> {
    if Url::parse(href).is_ok() {
        return Ok(href.to_string());
    }
    let base_url = parse_lenient(base)?;
    let host = base_url.host_str().ok_or_raise(|| ErrorKind::InvalidUrl(base.to_string()))?;
    let origin = match base_url.port() {
        Some(port) => format!("{}://{host}:{port}", base_url.scheme()),
        None => format!("{}://{host}", base_url.scheme()),
    };
    Ok(normalize(&format!("{origin}/{href}")))
}

/// Returns the lowercase host of `url`, if it has one.
pub(crate) fn host(url: &str) -> Option<String> {
    parse_lenient(url).ok()?.host_str().map(str::to_ascii_lowercase)
}

/// Users paste table-of-contents URLs without a scheme surprisingly often.
fn parse_lenient(url: &str) -> Result<Url> {
    let url = url.trim();
    match Url::parse(url) {
        Ok(parsed) => Ok(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{url}")).or_raise(|| ErrorKind::InvalidUrl(url.to_string()))
        },
        Err(e) => Err(e).or_raise(|| ErrorKind::InvalidUrl(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://x.com//a//b/", "https://x.com/a/b/")]
    #[case("https://x.com/a/b/", "https://x.com/a/b/")]
    #[case("https:/x.com/a", "https://x.com/a")]
    #[case("http://x.com///a", "http://x.com/a")]
    #[case("https://boxnovel.com/novel/name//ajax/chapters/", "https://boxnovel.com/novel/name/ajax/chapters/")]
    #[case("  https://x.com/a  ", "https://x.com/a")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("https://x.com/novel/toc", "/c3", "https://x.com/c3")]
    #[case("https://x.com/novel/toc", "c3", "https://x.com/c3")]
    #[case("https://x.com:8080/toc", "/c1", "https://x.com:8080/c1")]
    #[case("http://x.com/toc", "/c1", "http://x.com/c1")]
    #[case("x.com/toc", "/c1", "https://x.com/c1")]
    #[case("https://x.com/toc", "https://cdn.x.com/c1", "https://cdn.x.com/c1")]
    fn test_qualify(#[case] base: &str, #[case] href: &str, #[case] expected: &str) {
        assert_eq!(qualify(base, href).unwrap(), expected);
    }

    #[test]
    fn test_qualify_without_host() {
        let err = qualify("", "/c1").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidUrl(_)));
    }

    #[rstest]
    #[case("https://www.BoxNovel.com/novel/x", Some("www.boxnovel.com"))]
    #[case("boxnovel.com/novel/x", Some("boxnovel.com"))]
    #[case("", None)]
    fn test_host(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(host(url).as_deref(), expected);
    }
}
