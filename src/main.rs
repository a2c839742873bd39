//! CLI entry point for letters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "letters")]
#[command(author = "Driss Nafii")]
#[command(version)]
#[command(about = "Load, render and generate the letters of a personal site", long_about = None)]
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
    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Slug for the new article (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate page props
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the props of one article page
    Show {
        /// Article slug
        slug: String,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (letters, paths)
        #[arg(default_value = "letters")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "letters=debug,info"
    } else {
        "letters=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::New { title, slug } => {
            let site = letters::Site::new(&base_dir)?;
            tracing::info!("Creating new article with title: {}", title);
            let path = site.new_article(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = letters::Site::new(&base_dir)?;
            tracing::info!("Generating page props...");

            site.generate().await?;
            println!("Generated successfully!");

            if watch {
                letters::commands::generate::watch(&site).await?;
            }
        }

        Commands::Show { slug } => {
            let site = letters::Site::new(&base_dir)?;
            letters::commands::show::run(&site, &slug).await?;
        }

        Commands::Clean => {
            let site = letters::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = letters::Site::new(&base_dir)?;
            letters::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("letters version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
