// Tests for sitemap serialization and file chunking

use sitesmith_core::sitemap::{SitemapWriter, MAX_URLS_PER_SITEMAP};
use std::fs;
use tempfile::TempDir;

fn urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("http://example.com/page/{}", i))
        .collect()
}

// ============================================================================
// Chunking Tests
// ============================================================================

#[test]
fn test_empty_url_set_produces_no_files() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path());

    let outcome = writer.write(&[]).unwrap();

    assert!(outcome.files.is_empty());
    assert!(outcome.errors.is_empty());
    // Not even the output directory gets touched.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_single_page_has_no_index() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path());

    let outcome = writer.write(&urls(3)).unwrap();

    assert_eq!(outcome.files.len(), 1);
    assert!(outcome.errors.is_empty());
    let name = &outcome.files[0].file_name;
    assert!(name.starts_with("sitemap_"));
    assert!(name.ends_with(".xml"));
    assert!(!name.contains("index"));
}

#[test]
fn test_exactly_one_page_size_stays_single_file() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path()).with_page_size(5);

    let outcome = writer.write(&urls(5)).unwrap();

    assert_eq!(outcome.files.len(), 1);
    assert!(!outcome.files[0].file_name.contains("index"));
}

#[test]
fn test_one_over_page_size_yields_two_pages_and_index() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path()).with_page_size(5);

    let outcome = writer.write(&urls(6)).unwrap();

    // Index surfaces first, then the two pages.
    assert_eq!(outcome.files.len(), 3);
    assert!(outcome.files[0].file_name.ends_with("_index.xml"));
    assert!(outcome.files[1].file_name.ends_with("1.xml"));
    assert!(outcome.files[2].file_name.ends_with("2.xml"));
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_default_page_size_boundary() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path());

    let outcome = writer.write(&urls(MAX_URLS_PER_SITEMAP)).unwrap();
    assert_eq!(outcome.files.len(), 1);

    let dir2 = TempDir::new().unwrap();
    let writer2 = SitemapWriter::new(dir2.path());
    let outcome2 = writer2.write(&urls(MAX_URLS_PER_SITEMAP + 1)).unwrap();
    assert_eq!(outcome2.files.len(), 3);
    assert!(outcome2.files[0].file_name.ends_with("_index.xml"));
}

#[test]
fn test_pages_preserve_input_order() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path()).with_page_size(2);

    let input = urls(4);
    let outcome = writer.write(&input).unwrap();

    let page1 = fs::read_to_string(&outcome.files[1].path).unwrap();
    let page2 = fs::read_to_string(&outcome.files[2].path).unwrap();

    assert!(page1.contains("http://example.com/page/0"));
    assert!(page1.contains("http://example.com/page/1"));
    assert!(!page1.contains("http://example.com/page/2</loc>"));
    assert!(page2.contains("http://example.com/page/2"));
    assert!(page2.contains("http://example.com/page/3"));

    let pos0 = page1.find("page/0").unwrap();
    let pos1 = page1.find("page/1").unwrap();
    assert!(pos0 < pos1);
}

// ============================================================================
// XML Schema Tests
// ============================================================================

#[test]
fn test_urlset_document_shape() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path());

    let outcome = writer
        .write(&["http://example.com/a".to_string()])
        .unwrap();
    let xml = fs::read_to_string(&outcome.files[0].path).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    assert!(xml.contains("<loc>http://example.com/a</loc>"));
    assert!(xml.contains("<lastmod>"));
    assert!(xml.trim_end().ends_with("</urlset>"));

    // lastmod is the run date in YYYY-MM-DD form
    let lastmod_start = xml.find("<lastmod>").unwrap() + "<lastmod>".len();
    let lastmod = &xml[lastmod_start..lastmod_start + 10];
    assert_eq!(lastmod.len(), 10);
    assert_eq!(lastmod.chars().filter(|c| *c == '-').count(), 2);
}

#[test]
fn test_pre_escaped_locs_are_written_verbatim() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path());

    let outcome = writer
        .write(&["http://example.com/p?a=1&amp;b=2".to_string()])
        .unwrap();
    let xml = fs::read_to_string(&outcome.files[0].path).unwrap();

    assert!(xml.contains("<loc>http://example.com/p?a=1&amp;b=2</loc>"));
    assert!(!xml.contains("&amp;amp;"));
}

#[test]
fn test_index_references_pages_under_serving_prefix() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path())
        .with_page_size(1)
        .with_serving_prefix("https://example.com/sitemaps/");

    let outcome = writer.write(&urls(2)).unwrap();
    let index_xml = fs::read_to_string(&outcome.files[0].path).unwrap();

    assert!(index_xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
    for page in &outcome.files[1..] {
        let expected = format!(
            "<loc>https://example.com/sitemaps/{}</loc>",
            page.file_name
        );
        assert!(index_xml.contains(&expected), "missing {}", expected);
    }
    assert!(index_xml.contains("<lastmod>"));
    assert!(index_xml.trim_end().ends_with("</sitemapindex>"));
}

#[test]
fn test_index_without_prefix_uses_bare_file_names() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path()).with_page_size(1);

    let outcome = writer.write(&urls(2)).unwrap();
    let index_xml = fs::read_to_string(&outcome.files[0].path).unwrap();

    assert!(index_xml.contains(&format!("<loc>{}</loc>", outcome.files[1].file_name)));
}

// ============================================================================
// Filename Tests
// ============================================================================

#[test]
fn test_page_names_share_run_stamp_and_number_from_one() {
    let dir = TempDir::new().unwrap();
    let writer = SitemapWriter::new(dir.path()).with_page_size(1);

    let outcome = writer.write(&urls(3)).unwrap();

    let index = &outcome.files[0].file_name;
    let stamp = index.strip_suffix("_index.xml").unwrap();
    assert_eq!(outcome.files[1].file_name, format!("{}1.xml", stamp));
    assert_eq!(outcome.files[2].file_name, format!("{}2.xml", stamp));
    assert_eq!(outcome.files[3].file_name, format!("{}3.xml", stamp));
}

// ============================================================================
// Error Accumulation Tests
// ============================================================================

#[test]
fn test_blocked_page_write_is_accumulated_not_fatal() {
    let dir = TempDir::new().unwrap();
    // Occupy every candidate name for the first page with a directory so
    // its write fails while the second page and the index still go through.
    let t0 = chrono::Local::now().timestamp();
    for t in t0..=t0 + 2 {
        fs::create_dir(dir.path().join(format!("sitemap_{}1.xml", t))).unwrap();
    }

    let writer = SitemapWriter::new(dir.path()).with_page_size(1);
    let outcome = writer.write(&urls(2)).unwrap();

    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("1.xml"));
    // Index first, then the one page that made it to disk.
    assert_eq!(outcome.files.len(), 2);
    assert!(outcome.files[0].file_name.ends_with("_index.xml"));
    assert!(outcome.files[1].file_name.ends_with("2.xml"));

    // The index only references the page that was actually written.
    let index_xml = fs::read_to_string(&outcome.files[0].path).unwrap();
    assert!(index_xml.contains(&format!("<loc>{}</loc>", outcome.files[1].file_name)));
    assert!(!index_xml.contains("1.xml</loc>"));
}

#[test]
fn test_unwritable_output_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").unwrap();

    let writer = SitemapWriter::new(&blocker);
    let result = writer.write(&urls(1));

    assert!(result.is_err());
}
