// ABOUTME: CLI binary for list extraction.
// ABOUTME: Extracts the item list of URLs or a local HTML file and prints it as JSON, markdown or text.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use digests_lists::{Client, ExtractError, ListPage, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lists")]
#[command(about = "Extract the repeated item list of an index page")]
struct Args {
    /// Output format: json (default), markdown/md, text/txt
    #[arg(short = 'f', long = "format", default_value = "json")]
    format: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// HTML file to extract from (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Page URL for the HTML file (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// Minimum number of items a list must have
    #[arg(long = "min-number")]
    min_number: Option<usize>,

    /// Shortest acceptable title length
    #[arg(long = "min-length")]
    min_length: Option<usize>,

    /// Longest acceptable title length
    #[arg(long = "max-length")]
    max_length: Option<usize>,

    /// Minimum similarity between an item and its siblings
    #[arg(long = "similarity-threshold")]
    similarity_threshold: Option<f64>,

    /// Log pipeline decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// URLs to extract from (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("digests_lists=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_client(args: &Args) -> Client {
    let mut builder = Client::builder().allow_private_networks(args.allow_private_networks);
    if let Some(n) = args.min_number {
        builder = builder.min_number(n);
    }
    if let Some(n) = args.min_length {
        builder = builder.min_length(n);
    }
    if let Some(n) = args.max_length {
        builder = builder.max_length(n);
    }
    if let Some(t) = args.similarity_threshold {
        builder = builder.similarity_threshold(t);
    }
    builder.build()
}

/// Turn "no list on this page" into an empty page; everything else stays an error.
fn recover_not_found(
    result: Result<ListPage, ExtractError>,
    url: &str,
) -> Result<ListPage, ExtractError> {
    match result {
        Err(e) if e.is_not_found() => {
            eprintln!("warning: {}", e);
            let domain = url::Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
                .unwrap_or_default();
            Ok(ListPage {
                url: url.to_string(),
                domain,
                items: Vec::new(),
            })
        }
        other => other,
    }
}

fn format_output(pages: &[ListPage], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            if pages.len() == 1 {
                serde_json::to_string_pretty(&pages[0])
            } else {
                serde_json::to_string_pretty(pages)
            }
        }
        OutputFormat::Markdown => Ok(pages
            .iter()
            .map(ListPage::format_markdown)
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Text => Ok(pages
            .iter()
            .map(ListPage::format_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let format = OutputFormat::from(args.format.as_str());
    let client = build_client(&args);

    let start = Instant::now();
    let mut pages: Vec<ListPage> = Vec::new();
    let mut had_error = false;

    match (&args.html, &args.url) {
        (Some(html_path), Some(url)) => match fs::read_to_string(html_path) {
            Ok(html) => match recover_not_found(client.extract_html(&html, url), url) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    eprintln!("error extracting HTML: {}", e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                had_error = true;
            }
        },
        _ => {
            for url in &args.urls {
                match recover_not_found(client.extract(url).await, url) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        eprintln!("error extracting {}: {}", url, e);
                        had_error = true;
                    }
                }
            }
        }
    }

    let elapsed = start.elapsed();

    if !pages.is_empty() {
        match format_output(&pages, format) {
            Ok(output_str) => {
                if let Some(output_path) = &args.output {
                    if let Err(e) = fs::write(output_path, &output_str) {
                        eprintln!("error writing to {:?}: {}", output_path, e);
                        had_error = true;
                    }
                } else {
                    println!("{}", output_str);
                }
            }
            Err(e) => {
                eprintln!("error serializing output: {}", e);
                had_error = true;
            }
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
