//! Image inlining: `<img src>` references become base64 data URIs.

use super::dom;
use crate::detect;
use crate::error::{Error, Result};
use crate::options::ErrorMode;
use base64::Engine;
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};

/// Replace every `<img src>` with a `data:` URI read from `output_dir`.
///
/// Only the basename of `src` is used, so images are always looked up
/// directly inside `output_dir`. Sources that are already data URIs are
/// left alone.
pub fn inline_images(html: &str, output_dir: &Path, mode: ErrorMode) -> Result<String> {
    let document = dom::parse(html);

    for img in dom::select_all(&document, "img[src]")? {
        let src = img
            .attributes
            .borrow()
            .get("src")
            .map(|src| src.to_string());
        let Some(src) = src else {
            continue;
        };
        if src.starts_with("data:") {
            continue;
        }

        let path = resolve_image_path(output_dir, &src);
        match data_uri(&path) {
            Ok(uri) => {
                log::debug!("Inlined image {} ({} bytes as base64)", path.display(), uri.len());
                img.attributes.borrow_mut().insert("src", uri);
            }
            Err(e) => match mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => log::warn!("Keeping original src {}: {}", src, e),
            },
        }
    }

    dom::serialize(&document)
}

/// Resolve an `<img src>` value to the file it names inside `output_dir`.
///
/// An empty `output_dir` resolves to the bare basename, relative to the
/// current directory, not `/basename` at the filesystem root.
///
/// # Example
/// ```
/// use pdfhtml::transform::resolve_image_path;
/// use std::path::{Path, PathBuf};
///
/// let path = resolve_image_path(Path::new("/out"), "../img/page%201+a.png");
/// assert_eq!(path, PathBuf::from("/out/page 1 a.png"));
/// ```
pub fn resolve_image_path(output_dir: &Path, src: &str) -> PathBuf {
    let basename = src.rsplit('/').next().unwrap_or(src);
    output_dir.join(url_decode(basename))
}

/// Read a file and encode it as `data:<mime>;base64,<payload>`.
pub fn data_uri(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|source| Error::ImageResolution {
        path: path.to_path_buf(),
        source,
    })?;
    let mime = detect::mime_type(path, &data);

    let encoded_len = base64::encoded_len(data.len(), true).unwrap_or(0);
    let mut uri = String::with_capacity(encoded_len + mime.len() + 13);
    uri.push_str("data:");
    uri.push_str(mime);
    uri.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(&data, &mut uri);
    Ok(uri)
}

/// Decode `%XX` escapes and `+` as a space.
fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}
