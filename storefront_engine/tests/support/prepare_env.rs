use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use storefront_engine::SqliteDatabase;

/// Creates a fresh, migrated database in the system temp directory. Every call gets its own file, so tests can run
/// in parallel.
pub async fn prepare_test_env() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = random_db_url();
    create_database(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub fn random_db_url() -> String {
    let path = std::env::temp_dir().join(format!("sf_test_store_{}.db", rand::random::<u64>()));
    format!("sqlite://{}", path.display())
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(url).await {
            warn!("Error dropping database {url}: {e:?}");
        }
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}
