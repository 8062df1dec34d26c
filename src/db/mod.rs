use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::time::Duration;

use crate::{auth::password, models::user::Role};

pub mod balance_store;
pub mod product_store;
pub mod purchase_store;
pub mod sale_store;
pub mod user_store;

pub type DbPool = Pool<Sqlite>;

/// Username of the account seeded on first run
pub const DEFAULT_ADMIN: &str = "admin";

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, admin_password: &str) -> Result<DbPool> {
    // Create the database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    // Create connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    setup_database(&pool, admin_password).await?;

    Ok(pool)
}

/// Set up the database schema and seed the administrator
async fn setup_database(pool: &DbPool, admin_password: &str) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            total REAL NOT NULL,
            date TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            total REAL NOT NULL,
            date TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            role INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(DEFAULT_ADMIN)
        .fetch_optional(pool)
        .await?;

    if existing.is_none() {
        let hash = password::hash_password(admin_password)
            .map_err(|e| anyhow::anyhow!("hashing the administrator password: {}", e))?;
        sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
            .bind(DEFAULT_ADMIN)
            .bind(hash)
            .bind(Role::Admin)
            .execute(pool)
            .await?;
        tracing::info!("Seeded default administrator account '{}'", DEFAULT_ADMIN);
    }

    Ok(())
}
