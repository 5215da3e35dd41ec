use clap::Parser;
use drone_scraper::{config::Config, crawler, output};
use log::info;
use std::path::PathBuf;

/// Scrape product records from a paginated listing
///
/// Walks the listing starting at URL, follows next-page links until at
/// least MIN_COUNT product links are gathered, then visits each product
/// page and writes the extracted records to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "drone-scraper", version, about)]
struct Cli {
    /// Root listing-page URL to start from
    url: String,

    /// Minimum number of product links to gather before extraction
    min_count: usize,

    /// Verbose logging and a visible browser window
    #[arg(short, long)]
    debug: bool,

    /// Where to write the extracted records
    #[arg(short, long, default_value = "products.csv")]
    output: PathBuf,

    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.min_count == 0 {
        return Err("MIN_COUNT must be a positive integer".into());
    }

    let mut config = Config::load(&cli.config);
    if cli.debug {
        // Debug runs get a visible browser window
        config.browser.headless = false;
    }

    let drones = crawler::scrape(&config, &cli.url, cli.min_count)?;
    output::write_csv(&cli.output, &drones)?;

    info!("done, records saved to {}", cli.output.display());
    Ok(())
}
