//! Shared test harness: an in-memory SQLite database with migrations
//! applied, one connection so every query sees the same memory store.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use fundtrack_db::migration::Migrator;

/// Connects to a fresh in-memory database and applies all migrations.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}
