use sqlx::{MySqlConnection, MySqlPool};

use crate::database::models::SystemConfig;
use crate::database::DatabaseError;
use crate::services::unix_now;
use crate::state::AppState;

/// `(type, name) -> value` settings kept in the `system_config` table.
pub struct ConfigStore<'a> {
    pool: &'a MySqlPool,
    table: String,
}

impl<'a> ConfigStore<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            pool: &state.pool,
            table: state.table("system_config"),
        }
    }

    /// Stored value, or `default` when the key has never been set.
    pub async fn get_val(&self, kind: &str, name: &str, default: &str) -> Result<String, DatabaseError> {
        let sql = format!(
            "SELECT id, type, name, value, create_time, update_time FROM {} \
             WHERE type = ? AND name = ? LIMIT 1",
            self.table
        );
        let row: Option<SystemConfig> = sqlx::query_as(&sql)
            .bind(kind)
            .bind(name)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map_or_else(|| default.to_string(), |config| config.value))
    }

    /// Insert or update one key. Takes a connection so callers can include it
    /// in their transaction.
    pub async fn set(
        &self,
        conn: &mut MySqlConnection,
        kind: &str,
        name: &str,
        value: &str,
    ) -> Result<(), DatabaseError> {
        let now = unix_now();
        let find = format!("SELECT id FROM {} WHERE type = ? AND name = ? LIMIT 1", self.table);
        let existing: Option<u32> = sqlx::query_scalar(&find)
            .bind(kind)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        match existing {
            Some(id) => {
                let sql = format!("UPDATE {} SET value = ?, update_time = ? WHERE id = ?", self.table);
                sqlx::query(&sql)
                    .bind(value)
                    .bind(now)
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
            }
            None => {
                let sql = format!(
                    "INSERT INTO {} (type, name, value, create_time, update_time) VALUES (?, ?, ?, ?, ?)",
                    self.table
                );
                sqlx::query(&sql)
                    .bind(kind)
                    .bind(name)
                    .bind(value)
                    .bind(now)
                    .bind(now)
                    .execute(&mut *conn)
                    .await?;
            }
        }
        tracing::debug!("Config {}.{} updated", kind, name);
        Ok(())
    }
}
