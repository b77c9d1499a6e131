use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::{Result, StoreError, UserStore};
use crate::models::{User, UserDraft};

const USER_COLUMNS: &str =
    "id, federated_id, email, first_name, last_name, password, created_at, updated_at";

/// SQLite-backed user store.
///
/// Email uniqueness is enforced by a UNIQUE constraint, so the insert itself
/// is the atomic check.
pub struct SqliteUserStore {
    conn: Mutex<Connection>,
}

/// Raw row before timestamp parsing.
struct UserRow {
    id: String,
    federated_id: Option<String>,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            federated_id: row.get(1)?,
            email: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            password: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_user(self) -> Result<User> {
        Ok(User {
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            id: self.id,
            federated_id: self.federated_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password: self.password,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::DatabaseError(format!("bad timestamp '{}': {}", value, e)))
}

fn db_error(e: rusqlite::Error) -> StoreError {
    StoreError::DatabaseError(e.to_string())
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation)
}

impl SqliteUserStore {
    pub fn new(database_url: &str) -> Result<Self> {
        // Parse sqlite: prefix if present
        let path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        let conn = if path == ":memory:" {
            Connection::open_in_memory().map_err(db_error)?
        } else {
            // Create parent directories if needed
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::IoError(e.to_string()))?;
                }
            }
            Connection::open(path).map_err(db_error)?
        };

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                federated_id TEXT,
                email TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        ).map_err(db_error)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_federated_id ON users(federated_id)",
            [],
        ).map_err(db_error)?;

        tracing::info!("User store initialized with database: {}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    fn select_one(conn: &Connection, column: &str, value: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?1", USER_COLUMNS, column);
        conn.query_row(&sql, params![value], UserRow::from_row)
            .optional()
            .map_err(db_error)?
            .map(UserRow::into_user)
            .transpose()
    }

    fn exists(conn: &Connection, column: &str, value: &str) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {} = ?1)", column);
        conn.query_row(&sql, params![value], |row| row.get::<_, bool>(0))
            .map_err(db_error)
    }

    fn insert(conn: &Connection, draft: UserDraft) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            federated_id: draft.federated_id,
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            password: draft.password,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            "INSERT INTO users (id, federated_id, email, first_name, last_name, password, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user.id,
                user.federated_id,
                user.email,
                user.first_name,
                user.last_name,
                user.password,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        ).map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::EmailTaken(user.email.clone())
            } else {
                db_error(e)
            }
        })?;

        tracing::debug!("Inserted user: {}", user.id);
        Ok(user)
    }

    fn update(conn: &Connection, id: String, draft: UserDraft) -> Result<User> {
        let now = Utc::now();
        let changed = conn.execute(
            "UPDATE users SET federated_id = ?1, email = ?2, first_name = ?3, last_name = ?4,
                password = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                draft.federated_id,
                draft.email,
                draft.first_name,
                draft.last_name,
                draft.password,
                now.to_rfc3339(),
                id,
            ],
        ).map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::EmailTaken(draft.email.clone())
            } else {
                db_error(e)
            }
        })?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Updated user: {}", id);
        Self::select_one(conn, "id", &id)?.ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let conn = self.lock()?;
        Self::exists(&conn, "email", email)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        Self::select_one(&conn, "email", email)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let conn = self.lock()?;
        Self::select_one(&conn, "id", id)
    }

    async fn exists_by_federated_id(&self, federated_id: &str) -> Result<bool> {
        let conn = self.lock()?;
        Self::exists(&conn, "federated_id", federated_id)
    }

    async fn save(&self, mut draft: UserDraft) -> Result<User> {
        let conn = self.lock()?;
        match draft.id.take() {
            None => Self::insert(&conn, draft),
            Some(id) => Self::update(&conn, id, draft),
        }
    }

    async fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(db_error)?;
        Ok(count as u64)
    }
}
