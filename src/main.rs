//! CLI entry point for copydesk

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "copydesk")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "Content assembly for headless-CMS blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the post feed
    #[command(alias = "ls")]
    List {
        /// Posts per page (overrides the configured page size)
        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        /// Additional pages to load after the first
        #[arg(long, default_value = "0", conflicts_with = "all")]
        pages: usize,

        /// Keep loading until the feed is exhausted
        #[arg(long)]
        all: bool,

        /// Print the feed as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the pre-render path manifest
    Paths {
        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one assembled post
    Show {
        /// Post slug (uid)
        slug: String,

        /// Print the assembled view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "copydesk=debug,info"
    } else {
        "copydesk=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::List {
            page_size,
            pages,
            all,
            json,
        } => {
            let app = copydesk::Copydesk::new(&base_dir)?;
            copydesk::commands::list::run(&app, page_size, pages, all, json).await?;
        }

        Commands::Paths { json } => {
            let app = copydesk::Copydesk::new(&base_dir)?;
            tracing::info!("Enumerating pre-render paths...");
            copydesk::commands::paths::run(&app, json).await?;
        }

        Commands::Show { slug, json } => {
            let app = copydesk::Copydesk::new(&base_dir)?;
            tracing::info!("Assembling post '{}'", slug);
            copydesk::commands::show::run(&app, &slug, json).await?;
        }

        Commands::Version => {
            println!("copydesk version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
