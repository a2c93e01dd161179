use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use slowpoke::app::{spawn_fetch, App, AppEvent};
use slowpoke::bookmarks::BookmarkStore;
use slowpoke::config::Config;
use slowpoke::news::{Category, NewsClient};
use slowpoke::storage::{Database, DatabaseError, THEME_KEY};
use slowpoke::theme::ThemeVariant;
use slowpoke::ui;

/// Get the config directory path (~/.config/slowpoke/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("slowpoke");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "slowpoke", about = "Terminal news reader for newsdata.io")]
struct Args {
    /// Reset database (delete and recreate)
    #[arg(long)]
    reset_db: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix: the directory holds the API key and database
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config_path = config_dir.join("config.toml");
    let db_path = config_dir.join("slowpoke.db");

    // Handle --reset-db flag
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        println!("Database reset.");
    }

    // Load config; a broken file falls back to defaults rather than refusing
    // to start.
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            eprintln!("Warning: {}", e);
            Config::default()
        }
    };

    // Resolve the API key before touching the terminal
    let Some(api_key) = config.resolve_api_key() else {
        eprintln!("Error: No newsdata.io API key configured.");
        eprintln!();
        eprintln!("Either set the environment variable:");
        eprintln!("  export NEWSDATA_API_KEY=your-key");
        eprintln!();
        eprintln!("Or add it to {}:", config_path.display());
        eprintln!("  api_key = \"your-key\"");
        std::process::exit(1);
    };

    // Open database
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of slowpoke appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    // Theme: persisted preference wins over the config file.
    let theme = match db.get_preference(THEME_KEY).await {
        Ok(Some(stored)) => ThemeVariant::from_str_name(&stored).unwrap_or_else(|| {
            tracing::warn!(value = %stored, "Unrecognized stored theme, using config");
            ThemeVariant::from_str_name(&config.theme).unwrap_or_default()
        }),
        Ok(None) => ThemeVariant::from_str_name(&config.theme).unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read theme preference");
            ThemeVariant::default()
        }
    };

    let category = Category::from_str_name(&config.category).unwrap_or(Category::Technology);

    let bookmarks = BookmarkStore::load(&db)
        .await
        .context("Failed to load bookmarks")?;

    let client = reqwest::Client::new();
    let news = NewsClient::new(client, api_key, config.country.clone());

    let mut app = App::new(db, news, theme, category, bookmarks);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Kick off the initial fetch before entering the loop
    spawn_fetch(&mut app, category, event_tx.clone());

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
