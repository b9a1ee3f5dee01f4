//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    dev_user: Option<&str>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Paisa web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    if no_auth {
        tracing::warn!("Serving with authentication disabled");
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
        match dev_user {
            Some(email) => println!("   All requests act as {}", email),
            None => println!("   Pass --user EMAIL to pick the acting user"),
        }
    } else {
        println!("   🔒 Authentication: bearer token (PAISA_JWT_SECRET)");
    }
    if !allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let config = paisa_server::ServerConfig {
        bind: format!("{}:{}", host, port),
        require_auth: !no_auth,
        allowed_origins,
        dev_user: dev_user.map(|s| s.to_string()),
        ..paisa_server::ServerConfig::from_env()
    };

    paisa_server::serve(db, config).await
}
