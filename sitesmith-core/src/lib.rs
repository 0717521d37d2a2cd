pub mod progress_store;
pub mod sitemap;

pub use progress_store::ProgressStore;
pub use sitemap::{GeneratedFile, SitemapError, SitemapWriter, WriteOutcome, MAX_URLS_PER_SITEMAP};

pub fn print_banner() {
    println!(
        r#"
  ___ _ _                    _ _   _
 / __(_) |_ ___ ___ _ __ ___(_) |_| |__
 \__ \ | __/ _ / __| '_ ` _ \ | __| '_ \
 |__) | | ||  __\__ \ | | | | | |_| | | |
 |___/_|\__\___|___/_| |_| |_|_|\__|_| |_|

 seed-driven XML sitemap generator v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
