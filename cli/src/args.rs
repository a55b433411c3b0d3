//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Ayva - find and offer local services from the terminal
#[derive(Parser, Debug)]
#[command(name = "ayva")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show listings, newest first
    Listings {
        /// Only show one category ("Tümü" shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the category catalog
    Categories,

    /// Sign in with email and password
    Login { email: String, password: String },

    /// Create an account
    Signup {
        email: String,
        password: String,
        full_name: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Publish a new listing
    Create(CreateArgs),

    /// Show your profile and your listings
    Profile,

    /// Delete one of your listings
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Update your profile; omitted fields keep their current value
    EditProfile(EditProfileArgs),
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "Ev & Tadilat")]
    pub category: String,

    /// Price in TL; a decimal comma is accepted
    #[arg(long)]
    pub price: String,

    /// One of sabit, saat, m², gün
    #[arg(long, default_value = "sabit")]
    pub price_type: String,

    #[arg(long)]
    pub location: String,
}

/// Arguments for the edit-profile command
#[derive(Parser, Debug)]
pub struct EditProfileArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub avatar_url: Option<String>,
}
