//! Body-only extraction.

use super::dom;
use crate::error::{Error, Result};

/// Serialize the children of `<body>`, concatenated and trimmed.
pub fn body_content(html: &str) -> Result<String> {
    let document = dom::parse(html);
    let body = document
        .select_first("body")
        .map_err(|()| Error::Html("document has no <body>".to_string()))?;

    let mut content = String::new();
    for child in body.as_node().children() {
        content.push_str(&dom::serialize(&child)?);
    }

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_content() {
        let result = body_content("<html><body><p>X</p></body></html>").unwrap();
        assert_eq!(result, "<p>X</p>");
    }

    #[test]
    fn test_body_content_drops_head() {
        let html = "<!DOCTYPE html><html><head><title>t</title></head>\n<body>\n  <div>a</div>\n  text &amp; more\n</body></html>";
        let result = body_content(html).unwrap();
        assert_eq!(result, "<div>a</div>\n  text &amp; more");
    }

    #[test]
    fn test_body_content_of_fragment() {
        let result = body_content("  <b>bold</b> tail ").unwrap();
        assert_eq!(result, "<b>bold</b> tail");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(body_content("").unwrap(), "");
    }
}
