use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::models::LogRow;

/// How many of the latest readings the dashboard routes serve.
pub const DASHBOARD_LIMIT: i64 = 100;

const CREATE_LOGS: &str = "CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ts INTEGER NOT NULL,
    count INTEGER NOT NULL,
    capacity INTEGER NOT NULL
)";

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::query(CREATE_LOGS).execute(&pool).await?;
    Ok(pool)
}

pub async fn insert_log(pool: &SqlitePool, ts: i64, count: i64, capacity: i64) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO logs (ts, count, capacity) VALUES (?, ?, ?)")
        .bind(ts)
        .bind(count)
        .bind(capacity)
        .execute(pool)
        .await?;
    Ok(())
}

// newest first; id breaks ties between same-second readings
pub async fn recent_logs(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<LogRow>> {
    sqlx::query_as::<_, LogRow>(
        "SELECT ts, count, capacity FROM logs ORDER BY ts DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
