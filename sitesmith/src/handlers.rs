use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitesmith_core::{ProgressStore, SitemapWriter};
use sitesmith_scanner::fetcher::FetcherConfig;
use sitesmith_scanner::progress::ProgressState;
use sitesmith_scanner::Crawler;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// Helper functions for the generate handler

/// Collect seed URLs from either repeated --url arguments or a seeds file.
///
/// Tokens are not validated here - the crawl loop owns validation so that
/// bad seeds show up as diagnostics instead of silently vanishing.
pub fn load_seed_urls(
    urls: Vec<String>,
    seeds_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    let seeds = if let Some(path) = seeds_file {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read seeds file {}: {}", path.display(), e))?;
        content.split_whitespace().map(str::to_string).collect()
    } else {
        urls
    };

    if seeds.is_empty() {
        return Err("Please enter at least one URL.".to_string());
    }
    Ok(seeds)
}

/// Collect keyword filters from repeated --keyword arguments or a file
/// (one filter per line, blank lines dropped).
pub fn load_keyword_filters(
    keywords: Vec<String>,
    keywords_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(path) = keywords_file {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read keywords file {}: {}", path.display(), e))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    } else {
        Ok(keywords)
    }
}

/// Scheme and host of the first parseable seed, used as the default
/// serving prefix for sitemap index loc entries.
pub fn default_serving_prefix(seed_urls: &[String]) -> Option<String> {
    seed_urls.iter().find_map(|u| {
        let parsed = Url::parse(u).ok()?;
        let host = parsed.host_str()?;
        Some(match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        })
    })
}

pub async fn handle_generate(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let urls: Vec<String> = sub_matches
        .get_many::<String>("url")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let seeds_file = sub_matches.get_one::<PathBuf>("seeds-file");
    let keywords: Vec<String> = sub_matches
        .get_many::<String>("keyword")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let keywords_file = sub_matches.get_one::<PathBuf>("keywords-file");

    let seeds = match load_seed_urls(urls, seeds_file) {
        Ok(seeds) => seeds,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };
    let keywords = match load_keyword_filters(keywords, keywords_file) {
        Ok(keywords) => keywords,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let output = sub_matches.get_one::<String>("output").unwrap();
    let output_dir = PathBuf::from(shellexpand::tilde(output).as_ref());
    let serving_prefix = sub_matches
        .get_one::<String>("serving-url")
        .cloned()
        .or_else(|| default_serving_prefix(&seeds))
        .unwrap_or_default();
    let fallback_domain = sub_matches.get_one::<String>("fallback-domain").unwrap();
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&15);
    let verify_tls = sub_matches.get_flag("verify-tls");
    let page_size = *sub_matches.get_one::<usize>("page-size").unwrap_or(&10_000);
    let progress_file = sub_matches.get_one::<PathBuf>("progress-file").cloned();

    println!("\n🗺  Generating sitemap from {} seed URL(s)", seeds.len());
    println!("Output directory: {}", output_dir.display());
    if !keywords.is_empty() {
        println!("Keyword filters: {}", keywords.join(", "));
    }
    println!(
        "TLS verification: {}\n",
        if verify_tls {
            "enabled"
        } else {
            "disabled (legacy default)"
        }
    );

    let fetcher = match FetcherConfig::new()
        .with_timeout(timeout)
        .with_tls_verification(verify_tls)
        .build()
    {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("{} Failed to build HTTP client: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let store = ProgressStore::new();
    let crawler = Crawler::new(fetcher)
        .with_keyword_filters(keywords)
        .with_fallback_domain(fallback_domain.clone())
        .with_progress_callback(store.callback());

    // The crawl loop writes into the store; this poller is the independent
    // read side, driving the spinner and the optional JSON snapshot file.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let poller_store = store.clone();
    let poller_file = progress_file.clone();
    let poller_spinner = spinner.clone();
    let poller = tokio::spawn(async move {
        loop {
            let state = poller_store
                .snapshot()
                .unwrap_or_else(ProgressState::initializing);
            poller_spinner.set_message(format!("{}% {}", state.percentage, state.message));
            write_progress_snapshot(poller_file.as_ref(), &state);
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    let outcome = match crawler.run(&seeds).await {
        Ok(outcome) => outcome,
        Err(e) => {
            poller.abort();
            spinner.finish_and_clear();
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    // Flush the terminal snapshot before the slot is cleared so a late
    // poll still sees 100%.
    let final_state = store.snapshot();
    poller.abort();
    spinner.finish_and_clear();
    if let Some(ref state) = final_state {
        write_progress_snapshot(progress_file.as_ref(), state);
    }
    // The slot and its on-disk snapshot are cleared together; a poll after
    // run end sees the initializing default again.
    store.clear();
    clear_progress_snapshot(progress_file.as_ref());

    for diagnostic in &outcome.diagnostics {
        println!("{} {}", "⚠".yellow(), diagnostic);
    }

    if outcome.is_empty() {
        println!(
            "\n{} No URLs matching the criteria were found or could be extracted from the \
            provided pages.",
            "ℹ".blue()
        );
        return;
    }

    println!(
        "\n{} Crawl complete! {} unique URLs on {}",
        "✓".green().bold(),
        outcome.urls.len(),
        outcome.target_domain
    );

    let writer = SitemapWriter::new(&output_dir)
        .with_serving_prefix(serving_prefix)
        .with_page_size(page_size);

    let written = match writer.write(&outcome.urls) {
        Ok(written) => written,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!("\nGenerated files:");
    for file in &written.files {
        println!("  {} {}", "•".green(), file.path.display());
    }
    for error in &written.errors {
        eprintln!("  {} {}", "✗".red(), error);
    }
}

pub fn handle_progress(sub_matches: &ArgMatches) {
    let path = sub_matches.get_one::<PathBuf>("file").unwrap();
    match fs::read_to_string(path) {
        Ok(json) => println!("{}", json.trim()),
        Err(_) => {
            // No snapshot yet - report the same default payload a poll
            // before the first progress event would see.
            let state = ProgressState::initializing();
            println!(
                "{}",
                serde_json::to_string(&state).expect("progress state serializes")
            );
        }
    }
}

/// Drop the snapshot file at run end so later polls fall back to the
/// initializing default instead of a stale terminal state.
pub fn clear_progress_snapshot(path: Option<&PathBuf>) {
    if let Some(path) = path {
        let _ = fs::remove_file(path);
    }
}

fn write_progress_snapshot(path: Option<&PathBuf>, state: &ProgressState) {
    if let Some(path) = path
        && let Ok(json) = serde_json::to_string(state)
    {
        // Whole-file replacement; a torn read just re-polls.
        let _ = fs::write(path, json);
    }
}
