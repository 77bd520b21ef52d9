use crate::dom::scan_page_dom;
use crate::error::{Result, ScanError};
use crate::fragment::{find_content_start, find_fragment_end};
use crate::normalize::normalize_fragment;
use crate::result::PageExtract;
use tracing::debug;

/// Marker for the function prototype block
pub const SYNOPSIS_MARKER: &str = "funcsynopsis";
/// Marker for the error conditions section
pub const ERRORS_MARKER: &str = "<h2>Errors</h2>";
/// Container element both sections live in
pub const CONTAINER_TAG: &str = "div";

/// How reference pages are turned into text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// Parse the page into a tree and read the marked subtrees
    #[default]
    Dom,
    /// Scan the raw markup line by line, balancing container tags by hand
    Legacy,
}

impl ExtractStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dom" => Some(ExtractStrategy::Dom),
            "legacy" => Some(ExtractStrategy::Legacy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractStrategy::Dom => "dom",
            ExtractStrategy::Legacy => "legacy",
        }
    }
}

/// Extract one page's signatures and errors with the chosen strategy
pub fn extract_page(body: &str, strategy: ExtractStrategy) -> Result<PageExtract> {
    match strategy {
        ExtractStrategy::Dom => scan_page_dom(body),
        ExtractStrategy::Legacy => scan_page_legacy(body),
    }
}

/// Scan a page line by line for the two markers.
///
/// A line holding the synopsis marker feeds the signature list, a line holding
/// the errors heading feeds the error list. Lines consumed while balancing a
/// fragment are not scanned for markers again.
pub fn scan_page_legacy(body: &str) -> Result<PageExtract> {
    let mut extract = PageExtract::default();
    let mut lines = body.lines();

    while let Some(line) = lines.next() {
        if line.contains(SYNOPSIS_MARKER) {
            let found = extract_marked(line, SYNOPSIS_MARKER, &mut lines)?;
            debug!("synopsis block produced {} strings", found.len());
            extract.signatures.extend(found);
        } else if line.contains(ERRORS_MARKER) {
            let found = extract_marked(line, ERRORS_MARKER, &mut lines)?;
            debug!("errors block produced {} strings", found.len());
            extract.errors.extend(found);
        }
    }

    Ok(extract)
}

/// Pull and normalize every fragment introduced by `marker` on `line`
fn extract_marked<'a, I>(line: &str, marker: &str, lines: &mut I) -> Result<Vec<String>>
where
    I: Iterator<Item = &'a str>,
{
    let mut buf = String::from(line);
    let mut strings = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = buf.get(search_from..).and_then(|rest| rest.find(marker)) {
        let marker_at = search_from + offset;
        let start = find_content_start(&mut buf, marker_at, marker, lines)?;
        let end = find_fragment_end(&mut buf, start, CONTAINER_TAG, lines)?;
        let fragment = buf
            .get(start..end)
            .ok_or_else(|| ScanError::ParseError(format!("fragment bounds {}..{} out of range", start, end)))?;
        strings.extend(normalize_fragment(fragment));
        search_from = end;
    }

    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="refsynopsisdiv"><h2>C Specification</h2>
<div class="funcsynopsis"><table><tr><td><code class="funcdef">void <b class="fsfunc">glBindBuffer</b>(</code></td>
<td>GLenum <var class="pdparam">target</var>, </td></tr>
<tr><td> </td><td>GLuint <var class="pdparam">buffer</var><code>)</code>;</td></tr>
</table><div class="funcprototype-spacer"> </div></div>
</div>
<div class="refsect1" id="errors"><h2>Errors</h2><p><code>GL_INVALID_ENUM</code> is generated if
<var>target</var> is not one of the allowable values.
</p><p><code>GL_INVALID_VALUE</code> is generated if <var>size</var> &lt; 0.
</p></div>
</body></html>"#;

    #[test]
    fn test_legacy_scan_finds_signature_and_errors() {
        let extract = scan_page_legacy(PAGE).unwrap();
        assert_eq!(
            extract.signatures,
            vec!["void glBindBuffer( GLenum target, GLuint buffer);"]
        );
        assert_eq!(
            extract.errors,
            vec![
                "GL_INVALID_ENUM is generated if target is not one of the allowable values.",
                "GL_INVALID_VALUE is generated if size < 0.",
            ]
        );
    }

    #[test]
    fn test_legacy_scan_reports_truncated_page() {
        let page = "<div class=\"refsect1\"><h2>Errors</h2><p>GL_INVALID_ENUM\n<div>";
        let err = scan_page_legacy(page).unwrap_err();
        assert!(matches!(err, ScanError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_legacy_and_dom_agree_on_simple_page() {
        let legacy = extract_page(PAGE, ExtractStrategy::Legacy).unwrap();
        let dom = extract_page(PAGE, ExtractStrategy::Dom).unwrap();
        assert_eq!(legacy.signatures, dom.signatures);
        assert_eq!(legacy.errors, dom.errors);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(ExtractStrategy::from_str("dom"), Some(ExtractStrategy::Dom));
        assert_eq!(ExtractStrategy::from_str("LEGACY"), Some(ExtractStrategy::Legacy));
        assert_eq!(ExtractStrategy::from_str("regex"), None);
        assert_eq!(ExtractStrategy::default().as_str(), "dom");
    }
}
