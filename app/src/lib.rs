pub mod app;
pub mod config;
pub mod server;

use qr_store::Database;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load config, create the data directory and open the database.
pub fn init_foundation() -> Result<(Database, AppConfig), anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load();

    std::fs::create_dir_all(&config.data_dir)?;
    let db_path = config.db_path();
    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    tracing::info!(
        "Settings loaded (addr={}, size={}, corner={})",
        config.bind_addr(),
        config.default_size,
        config.default_corner.as_str()
    );
    Ok((db, config))
}
