//! Link localization: links to sibling pages become in-page anchors.

use super::dom;
use crate::error::Result;
use std::path::Path;

/// Class added to every `<a>` element.
pub const LINK_CLASS: &str = "linkToPage";

/// Mark every `<a>` with [`LINK_CLASS`] and point links into `output_dir`
/// at `#<page>` anchors.
///
/// A link is local when its `href` contains `output_dir` as a substring.
/// An empty `output_dir` matches no link.
pub fn localize_links(html: &str, output_dir: &Path) -> Result<String> {
    let document = dom::parse(html);
    let dir = output_dir.to_string_lossy();
    let mut rewritten = 0usize;

    for anchor in dom::select_all(&document, "a")? {
        let mut attributes = anchor.attributes.borrow_mut();

        let class = add_class(attributes.get("class"), LINK_CLASS);
        attributes.insert("class", class);

        let target = attributes
            .get("href")
            .filter(|href| !dir.is_empty() && href.contains(&*dir))
            .map(page_anchor);
        if let Some(target) = target {
            attributes.insert("href", format!("#{}", target));
            rewritten += 1;
        }
    }

    log::debug!("Rewrote {} local links", rewritten);
    dom::serialize(&document)
}

/// Extract the page anchor from a link to a generated page.
///
/// Takes the last path component, drops its extension, and keeps the part
/// after the last `-` (the whole stem when there is none).
///
/// # Example
/// ```
/// use pdfhtml::transform::page_anchor;
///
/// assert_eq!(page_anchor("/out/report-12.html"), "12");
/// assert_eq!(page_anchor("/out/index.html"), "index");
/// ```
pub fn page_anchor(href: &str) -> String {
    let filename = href.rsplit('/').next().unwrap_or(href);
    let stem = match filename.rfind('.') {
        Some(dot) if dot > 0 => &filename[..dot],
        _ => filename,
    };
    stem.rsplit('-').next().unwrap_or(stem).to_string()
}

fn add_class(existing: Option<&str>, class: &str) -> String {
    match existing {
        Some(classes) if classes.split_whitespace().any(|c| c == class) => classes.to_string(),
        Some(classes) if !classes.trim().is_empty() => format!("{} {}", classes.trim(), class),
        _ => class.to_string(),
    }
}
