use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use wherein::core::config::{self, CliOverrides, WhereinConfig};
use wherein::core::filter::Region;

#[derive(Parser)]
#[command(name = "wherein", about = "Browse the countries of the world from your terminal")]
struct Args {
    /// REST Countries base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Initial region filter (Africa, Americas, Asia, Europe, Oceania)
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,

    /// Initial search text
    #[arg(long)]
    query: Option<String>,

    /// Open this country's detail view directly
    country: Option<String>,
}

fn parse_region(s: &str) -> Result<Region, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wherein.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wherein.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config load failed, using defaults: {}", e);
        WhereinConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            dark: args.dark,
            region: args.region,
            query: args.query,
            country: args.country,
        },
    );

    log::info!(
        "Wherein starting up against {} (theme: {:?})",
        resolved.base_url,
        resolved.theme
    );

    wherein::tui::run(resolved)
}
