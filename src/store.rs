use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbSession = PooledConnection<SqliteConnectionManager>;

const CREATE_USERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id     INTEGER PRIMARY KEY,
    username    TEXT,
    full_name   TEXT,
    role        TEXT NOT NULL DEFAULT 'free',
    date_joined TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS ix_users_user_id ON users (user_id);
";

/// User profile storage. Lives beside the webhook flow; dispatch never touches it.
#[derive(Clone, Debug)]
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Opens a pool over `path`, `:memory:` gives a single shared in-memory connection.
    pub fn open(path: &str) -> crate::Result<Self> {
        let builder = Pool::builder();
        let (manager, builder, max_size) = if path == ":memory:" {
            // recycling the only connection would drop the whole database
            let builder = builder.idle_timeout(None).max_lifetime(None);
            (SqliteConnectionManager::memory(), builder, 1)
        } else {
            (SqliteConnectionManager::file(path), builder, 10)
        };
        let pool = builder
            .max_size(max_size)
            .build(manager)
            .map_err(crate::Error::context("build sqlite pool"))?;
        tracing::debug!(path, max_size, "user store opened");
        Ok(Self { pool })
    }

    /// Creates the `users` table when missing
    pub fn init_schema(&self) -> crate::Result<()> {
        let session = self.session()?;
        session
            .execute_batch(CREATE_USERS_TABLE)
            .map_err(crate::Error::context("create users table"))?;
        Ok(())
    }

    /// Connection returned to the pool when dropped
    pub fn session(&self) -> crate::Result<DbSession> {
        self.pool
            .get()
            .map_err(crate::Error::context("acquire db session"))
    }
}
