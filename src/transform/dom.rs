//! Parse/serialize helpers shared by the DOM-based stages.

use crate::error::{Error, Result};
use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

/// Parse an HTML string into a document tree.
///
/// Never fails: html5ever recovers from malformed markup and wraps bare
/// fragments in `<html><head></head><body>`.
pub(crate) fn parse(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Serialize a node (including the node itself) back to HTML.
pub(crate) fn serialize(node: &NodeRef) -> Result<String> {
    let mut output = Vec::new();
    node.serialize(&mut output)
        .map_err(|e| Error::Html(format!("failed to serialize HTML: {}", e)))?;
    String::from_utf8(output).map_err(|e| Error::Html(format!("serialized HTML is not UTF-8: {}", e)))
}

/// Collect every element matching `selector`.
pub(crate) fn select_all(document: &NodeRef, selector: &str) -> Result<Vec<NodeDataRef<ElementData>>> {
    let matches = document
        .select(selector)
        .map_err(|()| Error::Html(format!("invalid selector: {}", selector)))?;
    Ok(matches.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wraps_fragment() {
        let document = parse("<p>Hi</p>");
        let html = serialize(&document).unwrap();
        assert_eq!(html, "<html><head></head><body><p>Hi</p></body></html>");
    }

    #[test]
    fn test_parse_recovers_from_unclosed_tags() {
        let document = parse("<div><p>one<p>two");
        let html = serialize(&document).unwrap();
        assert!(html.contains("<p>one</p><p>two</p></div>"));
    }

    #[test]
    fn test_select_all() {
        let document = parse(r#"<a href="1">x</a><span></span><a>y</a>"#);
        assert_eq!(select_all(&document, "a").unwrap().len(), 2);
        assert!(select_all(&document, "a[").is_err());
    }
}
