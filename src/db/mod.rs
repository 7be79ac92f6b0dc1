//! Direct MySQL side-channel used to hard-reset the nursery tables.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Executor};
use tracing::info;

use crate::env::DbConfig;
use crate::error::QaResult;

/// Tables truncated by [`reset_database`], in order.
pub const RESET_TABLES: &[&str] = &["sales", "inventory", "plants", "categories"];

/// Connection options for `config`. `host` may carry a port (`db.local:3307`).
pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    let (host, port) = split_host(&config.host);
    let options = MySqlConnectOptions::new()
        .host(host)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);
    match port {
        Some(port) => options.port(port),
        None => options,
    }
}

/// Truncate every nursery table with foreign-key checks disabled.
///
/// All statements run on one connection: `FOREIGN_KEY_CHECKS` is session
/// scoped. Checks are re-enabled before returning, also when a truncate fails.
pub async fn reset_database(config: &DbConfig) -> QaResult<()> {
    info!(host = %config.host, database = %config.name, "resetting database");
    let mut conn = MySqlConnection::connect_with(&connect_options(config)).await?;

    conn.execute("SET FOREIGN_KEY_CHECKS = 0").await?;
    let truncated = truncate_all(&mut conn).await;
    let restored = conn.execute("SET FOREIGN_KEY_CHECKS = 1").await;
    let closed = conn.close().await;

    truncated?;
    restored?;
    closed?;
    info!(tables = RESET_TABLES.len(), "database reset completed");
    Ok(())
}

async fn truncate_all(conn: &mut MySqlConnection) -> QaResult<()> {
    for table in RESET_TABLES {
        let sql = format!("TRUNCATE TABLE {table}");
        (&mut *conn).execute(sql.as_str()).await?;
    }
    Ok(())
}

fn split_host(host: &str) -> (&str, Option<u16>) {
    match host.rsplit_once(':') {
        Some((name, port)) => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        None => (host, None),
    }
}
