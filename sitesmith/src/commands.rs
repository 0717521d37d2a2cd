use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitesmith")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitesmith")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("generate")
                .about(
                    "Crawl the seed pages, extract same-domain links and write them out as \
                XML sitemap files.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("A seed URL to mine for links; may be given multiple times")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("seeds-file"),
                )
                .arg(
                    arg!(-s --"seeds-file" <PATH>)
                        .required(false)
                        .help("Path to a whitespace-delimited file of seed URLs")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-k --"keyword" <KEYWORD>)
                        .required(false)
                        .help("Keep only URLs containing this substring; may be repeated")
                        .action(clap::ArgAction::Append)
                        .conflicts_with("keywords-file"),
                )
                .arg(
                    arg!(--"keywords-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of keyword filters")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("keyword"),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory the sitemap files are written into")
                        .default_value("./generated_sitemaps"),
                )
                .arg(
                    arg!(--"serving-url" <URL>)
                        .required(false)
                        .help(
                            "Public URL prefix for index loc entries \
                        (default: the first seed's scheme and host)",
                        ),
                )
                .arg(
                    arg!(--"fallback-domain" <HOST>)
                        .required(false)
                        .help("Target domain to filter against when no seed URL validates")
                        .default_value("localhost"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                )
                .arg(
                    arg!(--"verify-tls")
                        .required(false)
                        .help(
                            "Verify TLS certificates (disabled by default, matching the \
                        legacy tool this replaces)",
                        )
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"page-size" <NUM>)
                        .required(false)
                        .help("Maximum URLs per sitemap file")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10000"),
                )
                .arg(
                    arg!(--"progress-file" <PATH>)
                        .required(false)
                        .help("Write progress snapshots as JSON for external polling")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("progress")
                .about("Print the latest progress snapshot written by a running generate")
                .arg(
                    arg!(-f --"file" <PATH>)
                        .required(true)
                        .help("Path to the progress snapshot file")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
