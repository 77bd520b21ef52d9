use crate::dom::selector;
use crate::error::{Result, ScanError};
use crate::result::PageRef;
use scraper::Html;
use tracing::debug;
use url::Url;

/// Anchors on the index page that open a function's page in the display frame
pub const INDEX_ANCHOR_SELECTOR: &str = r#"tr > td > a[target="pagedisp"][href]"#;

/// Collect the per-function page references from the index page, in document order.
pub fn discover_pages(html: &str, index_url: &str) -> Result<Vec<PageRef>> {
    let base = Url::parse(index_url)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", index_url, e)))?;
    let document = Html::parse_document(html);
    let anchor_selector = selector(INDEX_ANCHOR_SELECTOR)?;

    let mut pages = Vec::new();
    for element in document.select(&anchor_selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(url) = resolve_url(&base, href)
        {
            debug!("Found page link: {} -> {}", href, url);
            pages.push(PageRef {
                href: href.to_string(),
                url,
            });
        }
    }

    Ok(pages)
}

fn resolve_url(base: &Url, href: &str) -> Option<String> {
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    let mut url = base.join(href).ok()?;
    url.set_fragment(None);

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body><table>
        <tr><td><a target="pagedisp" href="glActiveTexture.xml">glActiveTexture</a></td></tr>
        <tr><td><a target="pagedisp" href="glBindBuffer.xml#top">glBindBuffer</a></td></tr>
        <tr><td><a href="elsewhere.html">not a page</a></td></tr>
        <tr><td><a target="pagedisp" href="">empty</a></td></tr>
        </table>
        <p><a target="pagedisp" href="outside-table.xml">outside</a></p>
        </body></html>"#;

    #[test]
    fn test_discover_pages_matches_anchor_pattern() {
        let pages = discover_pages(INDEX, "http://www.opengl.org/sdk/docs/man/xhtml/index.html").unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].href, "glActiveTexture.xml");
        assert_eq!(
            pages[0].url,
            "http://www.opengl.org/sdk/docs/man/xhtml/glActiveTexture.xml"
        );
        assert_eq!(
            pages[1].url,
            "http://www.opengl.org/sdk/docs/man/xhtml/glBindBuffer.xml"
        );
    }

    #[test]
    fn test_discover_pages_absolute_href() {
        let html = r#"<table><tr><td><a target="pagedisp" href="https://other.example/glFoo.xml">x</a></td></tr></table>"#;
        let pages = discover_pages(html, "http://example.com/docs/index.html").unwrap();
        assert_eq!(pages[0].url, "https://other.example/glFoo.xml");
    }

    #[test]
    fn test_discover_pages_invalid_index_url() {
        let err = discover_pages(INDEX, "not a url").unwrap_err();
        assert!(matches!(err, ScanError::InvalidUrl(_)));
    }
}
