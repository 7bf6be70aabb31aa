use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

use super::Role;

/// A row of the `users` table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub date_joined: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            username: None,
            full_name: None,
            role: Role::default(),
            date_joined: Utc::now(),
            is_active: true,
        }
    }
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn insert(&self, conn: &Connection) -> crate::Result<()> {
        conn.execute(
            "INSERT INTO users (user_id, username, full_name, role, date_joined, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.user_id,
                self.username,
                self.full_name,
                self.role.as_str(),
                self.date_joined.to_rfc3339(),
                self.is_active,
            ],
        )
        .map_err(crate::Error::context("insert user"))?;
        Ok(())
    }

    pub fn find(conn: &Connection, user_id: i64) -> crate::Result<Option<Self>> {
        let row = conn
            .query_row(
                "SELECT user_id, username, full_name, role, date_joined, is_active
                 FROM users WHERE user_id = ?1",
                [user_id],
                RawUserRow::from_row,
            )
            .optional()
            .map_err(crate::Error::context("find user"))?;
        row.map(RawUserRow::into_record).transpose()
    }
}

struct RawUserRow {
    user_id: i64,
    username: Option<String>,
    full_name: Option<String>,
    role: String,
    date_joined: String,
    is_active: bool,
}

impl RawUserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user_id: row.get(0)?,
            username: row.get(1)?,
            full_name: row.get(2)?,
            role: row.get(3)?,
            date_joined: row.get(4)?,
            is_active: row.get(5)?,
        })
    }

    fn into_record(self) -> crate::Result<UserRecord> {
        let date_joined = DateTime::parse_from_rfc3339(&self.date_joined)
            .map_err(|_| crate::Error::unexpected("malformed date_joined column"))?
            .with_timezone(&Utc);
        Ok(UserRecord {
            user_id: self.user_id,
            username: self.username,
            full_name: self.full_name,
            role: self.role.parse()?,
            date_joined,
            is_active: self.is_active,
        })
    }
}
