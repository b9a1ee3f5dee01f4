//! User management commands

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use paisa_core::Database;
use paisa_server::handlers::hash_password;

pub fn cmd_user_add(
    db: &Database,
    name: &str,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') || !email.contains('.') {
        bail!("'{}' does not look like an email address", email);
    }

    let password = match password {
        Some(p) => p.to_string(),
        None => prompt_password()?,
    };
    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let hash = hash_password(&password)?;
    let user = db.create_user(name, &email, &hash)?;

    println!("✅ Registered {} <{}> (id {})", user.name, user.email, user.id);
    Ok(())
}

pub fn cmd_user_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;
    if users.is_empty() {
        println!("No users registered yet.");
        return Ok(());
    }

    println!();
    println!("   {:<5} {:<20} {:<30} {}", "ID", "Name", "Email", "Since");
    println!("   {}", "─".repeat(70));
    for user in users {
        println!(
            "   {:<5} {:<20} {:<30} {}",
            user.id,
            super::truncate(&user.name, 20),
            super::truncate(&user.email, 30),
            user.created_at.format("%Y-%m-%d")
        );
    }
    println!();
    Ok(())
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
