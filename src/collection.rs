//! Page collection: processed pages keyed by page number.

use crate::error::{Error, Result};
use crate::options::PageOptions;
use crate::transform::PagePipeline;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A single processed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Processed HTML
    pub content: String,
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Processed HTML pages in insertion order.
///
/// Every page added goes through the configured [`PagePipeline`] before it
/// is stored. Adding a number that already exists replaces its content but
/// keeps its original position.
///
/// # Example
///
/// ```
/// use pdfhtml::{PageCollection, PageOptions};
///
/// let options = PageOptions::passthrough().with_only_content(true);
/// let mut pages = PageCollection::new(options);
/// pages
///     .add_page(1, "<html><body><p>One</p></body></html>")?
///     .add_page(2, "<html><body><p>Two</p></body></html>")?;
///
/// assert_eq!(pages.get_page(2), Some("<p>Two</p>"));
/// assert_eq!(pages.get_page(3), None);
/// # Ok::<(), pdfhtml::Error>(())
/// ```
pub struct PageCollection {
    pipeline: PagePipeline,
    pages: Vec<Page>,
    index: HashMap<u32, usize>,
}

impl PageCollection {
    /// Create an empty collection with the given options.
    pub fn new(options: PageOptions) -> Self {
        Self {
            pipeline: PagePipeline::new(options),
            pages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty collection from a JSON option bag.
    pub fn from_json_options(json: &str) -> Result<Self> {
        Ok(Self::new(PageOptions::from_json(json)?))
    }

    /// The options pages are processed with.
    pub fn options(&self) -> &PageOptions {
        self.pipeline.options()
    }

    /// Process `content` and store it as page `number`.
    ///
    /// On error nothing is stored and any previous content for `number`
    /// is kept.
    pub fn add_page(&mut self, number: u32, content: &str) -> Result<&mut Self> {
        if number == 0 {
            return Err(Error::InvalidPageNumber(number));
        }

        let content = self.pipeline.process(content)?;
        log::debug!("Stored page {} ({} bytes)", number, content.len());

        match self.index.get(&number).copied() {
            Some(position) => self.pages[position].content = content,
            None => {
                self.index.insert(number, self.pages.len());
                self.pages.push(Page { number, content });
            }
        }

        Ok(self)
    }

    /// Get the processed content of a page.
    pub fn get_page(&self, number: u32) -> Option<&str> {
        self.index
            .get(&number)
            .map(|&position| self.pages[position].content.as_str())
    }

    /// All pages in insertion order.
    pub fn get_all_pages(&self) -> &[Page] {
        &self.pages
    }

    /// Iterate over `(number, content)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.pages
            .iter()
            .map(|page| (page.number, page.content.as_str()))
    }

    /// Get the number of stored pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if no page has been added.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Consume the collection and return its pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Serialize as a JSON object mapping page number to content.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Json(e.to_string()))
    }
}

impl Default for PageCollection {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}

impl Serialize for PageCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl std::fmt::Debug for PageCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCollection")
            .field("options", self.options())
            .field("pages", &self.pages)
            .finish()
    }
}
