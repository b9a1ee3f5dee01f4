//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paisa - Student expense tracker with savings suggestions
#[derive(Parser)]
#[command(name = "paisa")]
#[command(about = "Track expenses and get budget suggestions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "paisa.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Act as this user (email). Optional when only one user exists.
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record an expense
    Add {
        /// What the money went on
        description: String,

        /// Amount in rupees, e.g. 85.50
        amount: String,

        /// Category, e.g. "Food & Snacks"
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Payment mode: Cash, UPI, Card, Net Banking
        #[arg(short, long)]
        payment_mode: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List expenses
    List {
        /// Month (1-12), requires --year
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, requires --month
        #[arg(short, long)]
        year: Option<i32>,

        /// Restrict to one category
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum rows to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// Show per-category spending statistics
    Stats {
        /// Month (1-12), requires --year
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, requires --month
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Show savings suggestions for a month (defaults to the current month)
    Suggest {
        /// Month (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Generate a monthly report (defaults to the current month)
    Report {
        /// Month (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year
        #[arg(short, long)]
        year: Option<i32>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenses as CSV or JSON
    Export {
        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Month (1-12), requires --year
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, requires --month
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: do not use this flag when exposing the server to a
        /// network. All requests act as the user given with --user.
        #[arg(long)]
        no_auth: bool,

        /// Allowed CORS origin (repeatable)
        #[arg(long)]
        allow_origin: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user
    Add {
        /// Display name
        name: String,

        /// Email address (login identifier)
        email: String,

        /// Password, prompted for via stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List registered users
    List,
}
