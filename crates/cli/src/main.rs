//! EchoEats CLI - browse the menu, talk to the assistant, manage locations.
//!
//! # Usage
//!
//! ```bash
//! # Print the whole menu, or one section
//! echoeats menu
//! echoeats menu --category south-indian
//!
//! # Chat with the ordering assistant in the terminal
//! echoeats chat
//!
//! # Saved delivery locations (stored under ECHOEATS_DATA_DIR)
//! echoeats locations
//! echoeats locations add --label Office --address "1 Main St" --kind work
//! echoeats locations select 2
//! echoeats locations delete 3
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "echoeats")]
#[command(author, version, about = "EchoEats command-line tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print menu items
    Menu {
        /// Category id, e.g. `biryani` or `street-food` (default: all)
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Chat with the ordering assistant
    Chat,
    /// Manage saved delivery locations
    Locations {
        /// Directory holding the durable store
        #[arg(long, env = "ECHOEATS_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        #[command(subcommand)]
        action: Option<LocationAction>,
    },
}

#[derive(Subcommand)]
enum LocationAction {
    /// List saved locations (default)
    List,
    /// Save a new location and select it
    Add {
        #[arg(short, long)]
        label: String,

        #[arg(short, long)]
        address: String,

        /// `home`, `work` or `other`
        #[arg(short, long, default_value = "other")]
        kind: String,
    },
    /// Select a location for delivery
    Select { id: i32 },
    /// Delete a location
    Delete { id: i32 },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Keep logs off stdout, which carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
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
        Commands::Menu { category } => commands::menu::print(&category)?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Locations { data_dir, action } => {
            let action = action.unwrap_or(LocationAction::List);
            match action {
                LocationAction::List => commands::locations::list(&data_dir)?,
                LocationAction::Add {
                    label,
                    address,
                    kind,
                } => commands::locations::add(&data_dir, &label, &address, &kind)?,
                LocationAction::Select { id } => commands::locations::select(&data_dir, id)?,
                LocationAction::Delete { id } => commands::locations::delete(&data_dir, id)?,
            }
        }
    }
    Ok(())
}
