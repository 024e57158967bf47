//! Fino Integrino CLI - migrations, seeding and content tooling.
//!
//! # Usage
//!
//! ```bash
//! # Run content database migrations
//! fino-cli migrate
//!
//! # Load the seed file into the content store
//! fino-cli seed --file seed/content.yaml
//!
//! # Check the published section documents
//! fino-cli content validate --dir crates/storefront/content
//!
//! # Print the CMS authoring schema
//! fino-cli content schema
//!
//! # Hash the admin panel password (reads stdin)
//! fino-cli admin hash-password
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fino-cli")]
#[command(author, version, about = "Fino Integrino CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run content database migrations
    Migrate,
    /// Load a YAML seed file into the content store
    Seed {
        /// Seed file path
        #[arg(short, long, default_value = "seed/content.yaml")]
        file: PathBuf,
    },
    /// Work with the published section documents
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Admin panel tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Strictly parse every section document
    Validate {
        /// Directory holding `<section>.json` files
        #[arg(short, long, default_value = "crates/storefront/content")]
        dir: PathBuf,
    },
    /// Print the CMS authoring schema as JSON
    Schema,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Read a password from stdin and print its argon2 hash
    HashPassword,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fino_integrino_cli=info,fino_integrino_content=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
        Commands::Content { action } => match action {
            ContentAction::Validate { dir } => commands::content::validate(&dir).await?,
            ContentAction::Schema => commands::content::schema()?,
        },
        Commands::Admin { action } => match action {
            AdminAction::HashPassword => commands::admin::hash_password()?,
        },
    }
    Ok(())
}
