//! Integration tests for page collections.

use pdfhtml::{Error, ErrorMode, JsonFormat, PageCollection, PageOptions};
use std::fs;
use tempfile::TempDir;

const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

fn image_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page-1_1.gif"), GIF_BYTES).unwrap();
    dir
}

#[test]
fn test_processed_content_is_stored() {
    let mut pages = PageCollection::new(PageOptions::passthrough().with_only_content(true));
    let input = "<html><body><p>X</p></body></html>";
    pages.add_page(1, input).unwrap();

    assert_ne!(pages.get_page(1), Some(input));
    assert_eq!(pages.get_page(1), Some("<p>X</p>"));
}

#[test]
fn test_second_add_overwrites() {
    let mut pages = PageCollection::new(PageOptions::passthrough());
    pages.add_page(7, "first").unwrap();
    pages.add_page(7, "second").unwrap();

    assert_eq!(pages.get_page(7), Some("second"));
    assert_eq!(pages.get_all_pages().len(), 1);
}

#[test]
fn test_all_disabled_is_identity() {
    let mut pages = PageCollection::new(PageOptions::passthrough());
    let input = "<!-- raw --><p style=\"font-family: Arial;\"><a href=\"/out/x-2.html\">l</a><img src=\"nope.png\"></p>";
    pages.add_page(1, input).unwrap();
    assert_eq!(pages.get_page(1), Some(input));
}

#[test]
fn test_change_links() {
    let options = PageOptions::passthrough()
        .with_change_links(true)
        .with_output_dir("/out");
    let mut pages = PageCollection::new(options);
    pages.add_page(1, r#"<a href="/out/page-3.html">go</a>"#).unwrap();

    let page = pages.get_page(1).unwrap();
    assert!(page.contains(r#"class="linkToPage""#));
    assert!(page.contains(r##"href="#3""##));
}

#[test]
fn test_remove_font_family() {
    let options = PageOptions::passthrough().with_remove_font_family(true);
    let mut pages = PageCollection::new(options);
    pages
        .add_page(1, r#"<p style="font-family: Arial; color:red;">x</p>"#)
        .unwrap();

    let page = pages.get_page(1).unwrap();
    assert!(!page.contains("font-family"));
    assert!(page.contains("color:red;"));
}

#[test]
fn test_inline_images() {
    let dir = image_dir();
    let options = PageOptions::passthrough()
        .with_inline_images(true)
        .with_only_content(true)
        .with_output_dir(dir.path());
    let mut pages = PageCollection::new(options);
    pages
        .add_page(1, r#"<img src="page-1_1.gif" width="10">"#)
        .unwrap();

    assert_eq!(
        pages.get_page(1),
        Some(r#"<img src="data:image/gif;base64,R0lGODlhAQABAAAAADs=" width="10">"#)
    );
}

#[test]
fn test_missing_image_strict_is_consistent() {
    let dir = TempDir::new().unwrap();
    let options = PageOptions::new().with_output_dir(dir.path());
    let mut pages = PageCollection::new(options);

    for _ in 0..3 {
        let result = pages.add_page(1, r#"<img src="absent.png">"#);
        assert!(matches!(result, Err(Error::ImageResolution { .. })));
    }
    assert_eq!(pages.get_page(1), None);
}

#[test]
fn test_missing_image_lenient_is_consistent() {
    let dir = TempDir::new().unwrap();
    let options = PageOptions::passthrough()
        .with_inline_images(true)
        .with_only_content(true)
        .with_image_errors(ErrorMode::Lenient)
        .with_output_dir(dir.path());
    let mut pages = PageCollection::new(options);

    for number in 1..=3 {
        pages.add_page(number, r#"<img src="absent.png">"#).unwrap();
        assert_eq!(pages.get_page(number), Some(r#"<img src="absent.png">"#));
    }
}

#[test]
fn test_untouched_page_is_none() {
    let mut pages = PageCollection::new(PageOptions::passthrough());
    pages.add_page(1, "a").unwrap();
    assert_eq!(pages.get_page(2), None);
    assert_eq!(pages.get_page(u32::MAX), None);
}

#[test]
fn test_insertion_order_not_sorted() {
    let mut pages = PageCollection::new(PageOptions::passthrough());
    for number in [10, 2, 7] {
        pages.add_page(number, &number.to_string()).unwrap();
    }

    let numbers: Vec<u32> = pages.get_all_pages().iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![10, 2, 7]);

    let json = pages.to_json(JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"10":"10","2":"2","7":"7"}"#);
}

#[test]
fn test_options_from_json_bag() {
    let pages = PageCollection::from_json_options(
        r#"{"inlineCss": false, "changeLinks": true, "outputDir": "/srv/out"}"#,
    )
    .unwrap();

    let options = pages.options();
    assert!(!options.inline_css);
    assert!(options.inline_images);
    assert!(options.change_links);
    assert!(!options.remove_font_family);
    assert_eq!(options.output_dir.to_str(), Some("/srv/out"));
}

#[test]
fn test_options_from_json_rejects_unknown() {
    let result = PageCollection::from_json_options(r#"{"singlePage": true}"#);
    assert!(matches!(result, Err(Error::InvalidOptions(_))));
}
