//! Image MIME type detection.

use std::path::Path;

/// Fallback MIME type for unrecognized content.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// How many leading bytes are scanned for an SVG root element.
const SVG_SNIFF_LEN: usize = 512;

/// Detect the MIME type of an image file.
///
/// Magic bytes take precedence over the file extension, since converters
/// occasionally write images with a misleading suffix.
///
/// # Example
/// ```
/// use pdfhtml::detect::mime_type;
///
/// let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// assert_eq!(mime_type("page-1_1.jpg", &png), "image/png");
/// assert_eq!(mime_type("logo.svg", b""), "image/svg+xml");
/// ```
pub fn mime_type<P: AsRef<Path>>(path: P, data: &[u8]) -> &'static str {
    detect_mime_from_bytes(data)
        .or_else(|| mime_from_extension(path.as_ref()))
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Detect MIME type from data magic bytes.
pub fn detect_mime_from_bytes(data: &[u8]) -> Option<&'static str> {
    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return Some("image/tiff");
    }

    // WEBP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // ICO: 00 00 01 00
    if data.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some("image/x-icon");
    }

    // BMP: BM followed by a little-endian file size
    if data.len() >= 14 && data.starts_with(b"BM") {
        return Some("image/bmp");
    }

    if looks_like_svg(data) {
        return Some("image/svg+xml");
    }

    None
}

/// Guess MIME type from a file extension (case-insensitive).
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "ppm" => "image/x-portable-pixmap",
        "pbm" => "image/x-portable-bitmap",
        "jp2" => "image/jp2",
        _ => return None,
    };
    Some(mime)
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(SVG_SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{FEFF}').trim_start();
    (text.starts_with("<?xml") || text.starts_with("<svg") || text.starts_with("<!--"))
        && text.contains("<svg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime_from_bytes() {
        let jpeg_data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_mime_from_bytes(&jpeg_data), Some("image/jpeg"));

        let png_data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_mime_from_bytes(&png_data), Some("image/png"));

        assert_eq!(detect_mime_from_bytes(b"GIF89a\x01\x00"), Some("image/gif"));
        assert_eq!(
            detect_mime_from_bytes(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            Some("image/webp")
        );

        let unknown = [0x13, 0x37, 0x00, 0x00];
        assert_eq!(detect_mime_from_bytes(&unknown), None);
    }

    #[test]
    fn test_detect_svg() {
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        assert_eq!(detect_mime_from_bytes(svg), Some("image/svg+xml"));
        assert_eq!(detect_mime_from_bytes(b"<?xml version=\"1.0\"?><note/>"), None);
    }

    #[test]
    fn test_short_bmp_header_is_not_bmp() {
        assert_eq!(detect_mime_from_bytes(b"BM"), None);
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(mime_from_extension(Path::new("dir/b.png")), Some("image/png"));
        assert_eq!(mime_from_extension(Path::new("noext")), None);
        assert_eq!(mime_from_extension(Path::new("c.txt")), None);
    }

    #[test]
    fn test_mime_type_fallbacks() {
        assert_eq!(mime_type("x.gif", b"not really"), "image/gif");
        assert_eq!(mime_type("x.bin", b"not really"), DEFAULT_MIME_TYPE);
    }
}
