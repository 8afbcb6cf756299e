//! # CLI - newsbin
//!
//! Builds the hourly news container from the fetch side's hand-off file and
//! inspects finished containers.
//!
//! ## Commands
//!
//! ```text
//! newsbin build --articles <json> [--logo <jpg>] [--output <dir>]
//!               [--cache <dir>] [--hour <0-23>]
//! newsbin inspect <file>
//! ```
//!
//! ## Configuration
//!
//! Defaults come from the environment (see the `config` crate); flags
//! override them for a single run.
//!
//! ```text
//! NEWS_OUTPUT_DIR    artifact root            (default: "out")
//! NEWS_CACHE_DIR     hourly history           (default: "cache")
//! NEWS_LOGO_PATH     provider logo            (default: none)
//! NEWS_MAX_ARTICLES  overall cap              (default: 15)
//! NEWS_MAX_PER_TOPIC per-topic cap            (default: 3)
//! NEWS_LANGUAGE      language code            (default: 1)
//! NEWS_COUNTRY       country code             (default: 49)
//! RUST_LOG           log filter               (default: "info")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ newsbin build --articles fetched/articles.json --hour 7
//! out/v2/1/049/news.bin.07 (5412 bytes, 12 articles, 9 images, 3 screened out)
//! $ newsbin inspect out/v2/1/049/news.bin.07
//! ```

mod input;
mod inspect;

use anyhow::{bail, Context, Result};
use chrono::{Timelike, Utc};
use clap::{Parser, Subcommand};
use config::NewsConfig;
use container::ContainerReader;
use engine::{NewsEngine, RunInput};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "newsbin", version, about = "News channel container builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and publish the container for the current hour
    Build {
        /// JSON file with the fetched articles
        #[arg(long)]
        articles: PathBuf,

        /// Provider logo picture (overrides NEWS_LOGO_PATH)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Artifact root directory (overrides NEWS_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Hourly cache directory (overrides NEWS_CACHE_DIR)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Hour of day to build for (defaults to the current UTC hour)
        #[arg(long)]
        hour: Option<u8>,
    },

    /// Print the header and tables of a container
    Inspect {
        /// Container file
        file: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            articles,
            logo,
            output,
            cache,
            hour,
        } => {
            let mut config = NewsConfig::from_env().context("reading configuration")?;
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(cache) = cache {
                config.cache_dir = cache;
            }
            if logo.is_some() {
                config.logo_path = logo;
            }
            build(config, &articles, hour)
        }
        Command::Inspect { file } => {
            let reader =
                ContainerReader::open(&file).with_context(|| format!("reading {}", file.display()))?;
            print!("{}", inspect::describe(&reader)?);
            Ok(())
        }
    }
}

fn build(config: NewsConfig, articles: &Path, hour: Option<u8>) -> Result<()> {
    let now = Utc::now();
    let hour = match hour {
        Some(h) if h >= 24 => bail!("--hour must be in 0..24, got {}", h),
        Some(h) => h,
        // `hour()` is always below 24.
        None => now.hour() as u8,
    };

    let logo = match &config.logo_path {
        Some(path) => std::fs::read(path).with_context(|| format!("reading logo {}", path.display()))?,
        None => Vec::new(),
    };
    let candidates = input::load_articles(articles)?;
    info!(candidates = candidates.len(), hour, "starting build");

    let engine = NewsEngine::new(config);
    let report = engine.run(RunInput {
        now,
        hour,
        logo,
        candidates,
    })?;

    println!(
        "{} ({} bytes, {} articles, {} images, {} screened out)",
        report.path.display(),
        report.bytes,
        report.accepted,
        report.images,
        report.rejected.len()
    );
    Ok(())
}
