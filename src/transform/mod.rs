//! Page transform pipeline.
//!
//! Each stage takes the previous stage's HTML and returns new HTML. The
//! DOM-based stages parse, query, mutate and re-serialize independently.

mod body;
mod css;
mod dom;
mod fonts;
mod images;
mod links;
pub mod stylesheet;

pub use body::body_content;
pub use css::{inline_css, strip_comment_markers};
pub use fonts::FontFamilyStripper;
pub use images::{data_uri, inline_images, resolve_image_path};
pub use links::{localize_links, page_anchor, LINK_CLASS};

use crate::error::Result;
use crate::options::{PageOptions, Stage};

/// Runs the enabled stages over page content in their fixed order.
pub struct PagePipeline {
    options: PageOptions,
    fonts: FontFamilyStripper,
}

impl PagePipeline {
    /// Create a new pipeline with the given options.
    pub fn new(options: PageOptions) -> Self {
        Self {
            options,
            fonts: FontFamilyStripper::new(),
        }
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Process page content through every enabled stage.
    pub fn process(&self, content: &str) -> Result<String> {
        let mut result = content.to_string();

        for stage in self.options.enabled_stages() {
            let before = result.len();
            result = self.run_stage(stage, &result)?;
            log::debug!("Stage {}: {} -> {} bytes", stage, before, result.len());
        }

        Ok(result)
    }

    /// Run a single stage regardless of whether it is enabled.
    pub fn run_stage(&self, stage: Stage, html: &str) -> Result<String> {
        match stage {
            Stage::InlineCss => inline_css(html),
            Stage::InlineImages => {
                inline_images(html, self.options.output_dir(), self.options.image_errors)
            }
            Stage::RemoveFontFamily => Ok(self.fonts.strip(html)),
            Stage::ChangeLinks => localize_links(html, self.options.output_dir()),
            Stage::OnlyContent => body_content(html),
        }
    }
}

impl Default for PagePipeline {
    fn default() -> Self {
        Self::new(PageOptions::default())
    }
}
