// Tree-based extraction: locate the marked nodes in a parsed document and take
// their subtrees as fragments.

use crate::error::{Result, ScanError};
use crate::normalize::collapse_whitespace;
use crate::result::PageExtract;
use scraper::{ElementRef, Html, Node, Selector};

/// Extract signatures and errors from a reference page parsed as a DOM tree.
///
/// Each prototype table inside a `div.funcsynopsis` becomes one signature.
/// Each element following an `<h2>Errors</h2>` heading becomes one error entry,
/// with lists split into one entry per item.
pub fn scan_page_dom(html: &str) -> Result<PageExtract> {
    let document = Html::parse_document(html);

    Ok(PageExtract {
        signatures: extract_signatures(&document)?,
        errors: extract_errors(&document)?,
    })
}

fn extract_signatures(document: &Html) -> Result<Vec<String>> {
    let synopsis_selector = selector("div.funcsynopsis")?;
    let table_selector = selector("table")?;

    let mut signatures = Vec::new();
    for synopsis in document.select(&synopsis_selector) {
        let mut tables = synopsis.select(&table_selector).peekable();
        if tables.peek().is_none() {
            push_text(&mut signatures, synopsis);
            continue;
        }
        for table in tables {
            push_text(&mut signatures, table);
        }
    }

    Ok(signatures)
}

fn extract_errors(document: &Html) -> Result<Vec<String>> {
    let heading_selector = selector("h2")?;
    let item_selector = selector("li")?;

    let mut errors = Vec::new();
    for heading in document.select(&heading_selector) {
        if element_text(heading) != "Errors" {
            continue;
        }

        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            match sibling.value().name() {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => break,
                "ul" | "ol" => {
                    for item in sibling.select(&item_selector) {
                        push_text(&mut errors, item);
                    }
                }
                _ => push_text(&mut errors, sibling),
            }
        }
    }

    Ok(errors)
}

/// Text content of an element with block and cell boundaries turned into
/// spaces, whitespace collapsed.
pub fn element_text(element: ElementRef) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) => {
                if matches!(
                    el.name(),
                    "td" | "th" | "tr" | "br" | "p" | "div" | "li" | "dt" | "dd"
                ) {
                    raw.push(' ');
                }
            }
            _ => {}
        }
    }
    collapse_whitespace(&raw)
}

fn push_text(out: &mut Vec<String>, element: ElementRef) {
    let text = element_text(element);
    if !text.is_empty() {
        out.push(text);
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::ParseError(format!("bad selector {}: {:?}", css, e)))
}
