use std::time::Duration;

use anyhow::{anyhow, Context};
use diesel::{
    connection::SimpleConnection, r2d2::ConnectionManager, Connection, SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::PooledConnection;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const IN_MEMORY_URL: &str = ":memory:";

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub fn get_db_conn(pool: &DbPool) -> anyhow::Result<DbConn> {
    pool.get().context("DB connection")
}

/// Applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Opens the database at `url`, builds the pool and applies pending
/// migrations.
///
/// Every `:memory:` connection is a separate database, so such a pool is
/// limited to a single connection that is never recycled.
pub fn init_pool(url: &str, pool_size: u32) -> anyhow::Result<DbPool> {
    // Fail early: r2d2 would keep retrying an unusable URL.
    SqliteConnection::establish(url)
        .with_context(|| format!("Failed to open database {url}"))?;

    let in_memory = url == IN_MEMORY_URL;
    let max_size = if in_memory { 1 } else { pool_size.max(1) };
    let mut builder = DbPool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: BUSY_TIMEOUT,
        }));
    if in_memory {
        // Dropping the only connection would drop the database with it.
        builder = builder.idle_timeout(None).max_lifetime(None);
    }
    let pool = builder
        .build(ConnectionManager::new(url))
        .context("Failed to create pool")?;

    let mut conn = get_db_conn(&pool)?;
    if !in_memory {
        conn.batch_execute("PRAGMA journal_mode = WAL;")
            .context("DB error")?;
    }
    run_migrations(&mut conn)?;

    Ok(pool)
}

fn run_migrations(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    for version in applied {
        tracing::info!(%version, "Applied database migration");
    }
    Ok(())
}
