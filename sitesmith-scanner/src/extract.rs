use crate::resolve::resolve;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Href prefixes that can never become sitemap entries.
const SKIPPED_SCHEMES: [&str; 5] = ["javascript:", "mailto:", "tel:", "#", "data:"];

/// Extract same-domain links from a fetched page.
///
/// Every `a[href]` is resolved against `base_url`, kept only when its host
/// contains `target_domain` as a substring, stripped of any fragment, and
/// matched against the keyword filters (an empty filter list passes
/// everything). Returned URLs are entity-escaped and deduplicated in
/// first-seen order. Malformed markup is parsed best-effort and never
/// aborts extraction.
pub fn extract_links(
    html: &str,
    base_url: &str,
    keyword_filters: &[String],
    target_domain: &str,
) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    let filters: Vec<&str> = keyword_filters
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || has_skipped_scheme(href) {
            continue;
        }

        let mut absolute = resolve(href, base_url);

        let Ok(parsed) = Url::parse(&absolute) else {
            continue;
        };
        let Some(host) = parsed.host_str() else {
            continue;
        };
        if !host.contains(target_domain) {
            debug!("off-domain link dropped: {}", absolute);
            continue;
        }

        if let Some(idx) = absolute.find('#') {
            absolute.truncate(idx);
        }

        if !filters.is_empty() && !filters.iter().any(|k| absolute.contains(k)) {
            continue;
        }

        let escaped = escape_entities(&absolute);
        if seen.insert(escaped.clone()) {
            links.push(escaped);
        }
    }

    links
}

fn has_skipped_scheme(href: &str) -> bool {
    let lowered = href.to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|s| lowered.starts_with(s))
}

/// HTML-entity-escape a URL for embedding in XML output.
pub fn escape_entities(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
