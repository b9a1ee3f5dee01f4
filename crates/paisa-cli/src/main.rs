//! Paisa CLI - Student expense tracker
//!
//! Usage:
//!   paisa init                      Initialize database
//!   paisa user add NAME EMAIL       Register a user
//!   paisa add "Mess lunch" 85.50 -c "Food & Snacks"
//!   paisa suggest                   Savings suggestions for this month
//!   paisa serve --port 5000         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::User { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                UserAction::Add {
                    name,
                    email,
                    password,
                } => commands::cmd_user_add(&db, &name, &email, password.as_deref()),
                UserAction::List => commands::cmd_user_list(&db),
            }
        }
        Commands::Add {
            description,
            amount,
            category,
            date,
            payment_mode,
            notes,
        } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_add(
                &db,
                &user,
                &description,
                &amount,
                &category,
                date.as_deref(),
                payment_mode.as_deref(),
                notes,
            )
        }
        Commands::List {
            month,
            year,
            category,
            limit,
        } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_list(&db, &user, month, year, category.as_deref(), limit)
        }
        Commands::Stats { month, year } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_stats(&db, &user, month, year)
        }
        Commands::Suggest { month, year } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_suggest(&db, &user, month, year)
        }
        Commands::Report {
            month,
            year,
            output,
        } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_report(&db, &user, month, year, output.as_deref())
        }
        Commands::Export {
            format,
            output,
            month,
            year,
        } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_export(&db, &user, &format, output.as_deref(), month, year)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            allow_origin,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.user.as_deref(),
                allow_origin,
            )
            .await
        }
    }
}
