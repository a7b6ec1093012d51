//! Page processing options and configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options controlling which rewrites run on each page.
///
/// The JSON form uses camelCase keys (`inlineCss`, `outputDir`, ...).
/// Missing keys keep their defaults and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PageOptions {
    /// Move `<style>` rules onto matching elements
    pub inline_css: bool,

    /// Replace `<img src>` with base64 data URIs
    pub inline_images: bool,

    /// Strip `font-family` declarations
    pub remove_font_family: bool,

    /// Rewrite links to other generated pages into in-page anchors
    pub change_links: bool,

    /// Keep only the children of `<body>`
    pub only_content: bool,

    /// Directory holding the converted pages and their images
    pub output_dir: PathBuf,

    /// What to do when an image cannot be read
    pub image_errors: ErrorMode,
}

impl PageOptions {
    /// Create new page options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object, merging over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Options with every stage turned off.
    pub fn passthrough() -> Self {
        Self {
            inline_css: false,
            inline_images: false,
            remove_font_family: false,
            change_links: false,
            only_content: false,
            ..Self::default()
        }
    }

    /// Enable or disable CSS inlining.
    pub fn with_inline_css(mut self, inline: bool) -> Self {
        self.inline_css = inline;
        self
    }

    /// Enable or disable image inlining.
    pub fn with_inline_images(mut self, inline: bool) -> Self {
        self.inline_images = inline;
        self
    }

    /// Enable or disable font-family removal.
    pub fn with_remove_font_family(mut self, remove: bool) -> Self {
        self.remove_font_family = remove;
        self
    }

    /// Enable or disable link localization.
    pub fn with_change_links(mut self, change: bool) -> Self {
        self.change_links = change;
        self
    }

    /// Enable or disable body-only extraction.
    pub fn with_only_content(mut self, only: bool) -> Self {
        self.only_content = only;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the image error mode.
    pub fn with_image_errors(mut self, mode: ErrorMode) -> Self {
        self.image_errors = mode;
        self
    }

    /// Leave unreadable images untouched instead of failing.
    pub fn lenient_images(mut self) -> Self {
        self.image_errors = ErrorMode::Lenient;
        self
    }

    /// The output directory as a path.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Enabled stages, in the order they run.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }

    /// Check if a stage is enabled.
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::InlineCss => self.inline_css,
            Stage::InlineImages => self.inline_images,
            Stage::RemoveFontFamily => self.remove_font_family,
            Stage::ChangeLinks => self.change_links,
            Stage::OnlyContent => self.only_content,
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            inline_css: true,
            inline_images: true,
            remove_font_family: false,
            change_links: false,
            only_content: false,
            output_dir: PathBuf::new(),
            image_errors: ErrorMode::Strict,
        }
    }
}

/// Error handling mode for image inlining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Fail the page on any unreadable image
    #[default]
    Strict,
    /// Keep the original `src` and continue
    Lenient,
}

/// A pipeline stage. Stages always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Inline `<style>` rules as `style` attributes
    InlineCss,
    /// Embed images as data URIs
    InlineImages,
    /// Strip `font-family` declarations
    RemoveFontFamily,
    /// Turn links to sibling pages into anchors
    ChangeLinks,
    /// Keep only `<body>` children
    OnlyContent,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::InlineCss,
        Stage::InlineImages,
        Stage::RemoveFontFamily,
        Stage::ChangeLinks,
        Stage::OnlyContent,
    ];

    /// Option key that toggles this stage.
    pub fn option_name(&self) -> &'static str {
        match self {
            Stage::InlineCss => "inlineCss",
            Stage::InlineImages => "inlineImages",
            Stage::RemoveFontFamily => "removeFontFamily",
            Stage::ChangeLinks => "changeLinks",
            Stage::OnlyContent => "onlyContent",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.option_name())
    }
}
