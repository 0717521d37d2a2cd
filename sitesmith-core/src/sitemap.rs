use chrono::Local;
use sitesmith_scanner::extract::escape_entities;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// sitemaps.org hard limit on entries per file.
pub const MAX_URLS_PER_SITEMAP: usize = 10_000;

const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("failed to prepare output directory {dir}: {source}")]
    OutputDir {
        dir: String,
        source: std::io::Error,
    },
}

/// One sitemap file on disk, referenced back to the caller by name so it
/// can be surfaced as a relative download path.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub file_name: String,
    pub path: PathBuf,
}

/// Files written plus any per-file failures. A failed page never aborts
/// the remaining pages; partial output is surfaced, not discarded.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub files: Vec<GeneratedFile>,
    pub errors: Vec<String>,
}

/// Serializes an ordered URL set into sitemaps.org 0.9 XML files.
///
/// The set is partitioned into consecutive pages of at most `page_size`
/// entries; when more than one page results, a `sitemapindex` document is
/// written as well and surfaced first in the returned file list. Filenames
/// embed a run-scoped Unix timestamp so successive runs never collide, and
/// page N's name is derivable from the stamp and page number.
pub struct SitemapWriter {
    output_dir: PathBuf,
    serving_prefix: String,
    page_size: usize,
}

impl SitemapWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            serving_prefix: String::new(),
            page_size: MAX_URLS_PER_SITEMAP,
        }
    }

    /// Absolute URL prefix under which the generated files will be served;
    /// used for `loc` entries in the index document.
    pub fn with_serving_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.serving_prefix = prefix.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Write the URL set out as one or more sitemap files.
    ///
    /// An empty set produces no files. Only a failure to create the output
    /// directory is fatal; individual file write failures are accumulated
    /// in the outcome.
    pub fn write(&self, urls: &[String]) -> Result<WriteOutcome, SitemapError> {
        let mut outcome = WriteOutcome::default();
        if urls.is_empty() {
            return Ok(outcome);
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| SitemapError::OutputDir {
            dir: self.output_dir.display().to_string(),
            source,
        })?;

        let stamp = Local::now().timestamp();
        let today = Local::now().format("%Y-%m-%d").to_string();
        let base_name = format!("sitemap_{}", stamp);

        let pages: Vec<&[String]> = urls.chunks(self.page_size).collect();
        let multi = pages.len() > 1;

        // Index entries only reference pages that actually made it to disk.
        let mut written_pages: Vec<String> = Vec::new();

        for (i, page) in pages.iter().enumerate() {
            let file_name = if multi {
                format!("{}{}.xml", base_name, i + 1)
            } else {
                format!("{}.xml", base_name)
            };
            let path = self.output_dir.join(&file_name);
            let xml = render_urlset(page, &today);

            match fs::write(&path, xml) {
                Ok(()) => {
                    info!("wrote sitemap {} ({} URLs)", path.display(), page.len());
                    written_pages.push(file_name.clone());
                    outcome.files.push(GeneratedFile { file_name, path });
                }
                Err(e) => {
                    warn!("sitemap write failed: {}: {}", path.display(), e);
                    outcome
                        .errors
                        .push(format!("Failed to write sitemap: {}", path.display()));
                }
            }
        }

        if multi {
            let index_name = format!("{}_index.xml", base_name);
            let index_path = self.output_dir.join(&index_name);
            let xml = self.render_index(&written_pages, &today);

            match fs::write(&index_path, xml) {
                Ok(()) => {
                    info!("wrote sitemap index {}", index_path.display());
                    outcome.files.insert(
                        0,
                        GeneratedFile {
                            file_name: index_name,
                            path: index_path,
                        },
                    );
                }
                Err(e) => {
                    warn!("sitemap index write failed: {}: {}", index_path.display(), e);
                    outcome.errors.push(format!(
                        "Failed to write sitemap index: {}",
                        index_path.display()
                    ));
                }
            }
        }

        Ok(outcome)
    }

    fn render_index(&self, page_files: &[String], today: &str) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_XMLNS));
        for file_name in page_files {
            let loc = if self.serving_prefix.is_empty() {
                file_name.clone()
            } else {
                format!("{}/{}", self.serving_prefix.trim_end_matches('/'), file_name)
            };
            xml.push_str("  <sitemap>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_entities(&loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", today));
            xml.push_str("  </sitemap>\n");
        }
        xml.push_str("</sitemapindex>\n");
        xml
    }
}

/// Page `loc` values arrive pre-escaped from the extraction pipeline and
/// are written verbatim.
fn render_urlset(urls: &[String], today: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_XMLNS));
    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", url));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", today));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}
