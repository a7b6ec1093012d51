//! # pdfhtml
//!
//! Post-processing for HTML pages produced by PDF-to-HTML converters such as
//! `pdftohtml`.
//!
//! Each page added to a [`PageCollection`] runs through a fixed pipeline of
//! optional rewrites, then is stored under its page number.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfhtml::{PageCollection, PageOptions};
//!
//! fn main() -> pdfhtml::Result<()> {
//!     let options = PageOptions::new()
//!         .with_output_dir("./converted")
//!         .with_change_links(true)
//!         .with_only_content(true);
//!
//!     let mut pages = PageCollection::new(options);
//!     let html = std::fs::read_to_string("./converted/report-1.html")?;
//!     pages.add_page(1, &html)?;
//!
//!     println!("{}", pages.get_page(1).unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Stages run in this order, each on the previous stage's output:
//!
//! 1. **inlineCss** (default on): `<style>` rules become `style` attributes
//! 2. **inlineImages** (default on): `<img src>` becomes a base64 data URI
//! 3. **removeFontFamily**: `font-family` declarations are stripped
//! 4. **changeLinks**: links to sibling pages become `#page` anchors
//! 5. **onlyContent**: only the children of `<body>` are kept

pub mod collection;
pub mod detect;
pub mod error;
pub mod options;
pub mod transform;

// Re-export commonly used types
pub use collection::{JsonFormat, Page, PageCollection};
pub use error::{Error, Result};
pub use options::{ErrorMode, PageOptions, Stage};
pub use transform::PagePipeline;

/// Run the pipeline over a single page without storing it.
///
/// # Example
///
/// ```
/// use pdfhtml::{process_page, PageOptions};
///
/// let options = PageOptions::passthrough().with_remove_font_family(true);
/// let html = process_page(r#"<p style="font-family: Arial; color:red;">x</p>"#, &options)?;
/// assert_eq!(html, r#"<p style=" color:red;">x</p>"#);
/// # Ok::<(), pdfhtml::Error>(())
/// ```
pub fn process_page(content: &str, options: &PageOptions) -> Result<String> {
    PagePipeline::new(options.clone()).process(content)
}

/// Build a collection from pages in one call.
///
/// Pages are added in iteration order; the first failure is returned.
pub fn collect_pages<'a, I>(pages: I, options: PageOptions) -> Result<PageCollection>
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    let mut collection = PageCollection::new(options);
    for (number, content) in pages {
        collection.add_page(number, content)?;
    }
    Ok(collection)
}
