//! Ayva - Terminal front-end entry point
//!
//! CLI-based entry point that dispatches each command to its view.

mod app;
mod args;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Commands};
use error::CommandError;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Listings { category } => commands::browse::listings(category).await,
        Commands::Categories => {
            commands::browse::categories();
            Ok(())
        }
        Commands::Login { email, password } => commands::account::login(email, password).await,
        Commands::Signup {
            email,
            password,
            full_name,
        } => commands::account::signup(email, password, full_name).await,
        Commands::Logout => commands::account::logout().await,
        Commands::Create(args) => commands::listing::create(args).await,
        Commands::Profile => commands::profile::show().await,
        Commands::Delete { id, yes } => commands::listing::delete(id, yes).await,
        Commands::EditProfile(args) => commands::profile::edit(args).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        // Notices were already rendered by the view
        if !matches!(e, CommandError::Failed(_)) {
            eprintln!("Hata: {}", e);
        }
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
