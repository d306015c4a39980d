use serde_json::Value;

use crate::database::models::DecorateTabbar;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::schemas::admin::decorate::{
    DecorateTabbarList, DecorateTabbarOut, DecorateTabbarSaveIn, DecorateTabbarStyle,
};
use crate::services::{unix_now, ConfigStore, UrlUtil};
use crate::state::AppState;

const STYLE_KIND: &str = "tabbar";
const STYLE_NAME: &str = "style";

/// Bottom navigation of the mobile client.
pub struct TabbarService<'a> {
    state: &'a AppState,
    table: String,
    urls: UrlUtil,
}

impl<'a> TabbarService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            table: state.table("decorate_tabbar"),
            urls: UrlUtil::new(&state.settings),
        }
    }

    pub async fn detail(&self) -> Result<DecorateTabbarOut, ApiError> {
        let sql = format!(
            "SELECT id, name, selected, unselected, link, create_time, update_time FROM {} ORDER BY id ASC",
            self.table
        );
        let rows: Vec<DecorateTabbar> = sqlx::query_as(&sql)
            .fetch_all(&self.state.pool)
            .await
            .map_err(DatabaseError::from)?;

        let list = rows
            .into_iter()
            .map(|row| DecorateTabbarList {
                name: row.name,
                selected: self.urls.to_absolute_url(&row.selected),
                unselected: self.urls.to_absolute_url(&row.unselected),
                link: parse_link(&row.link),
            })
            .collect();

        let raw = ConfigStore::new(self.state)
            .get_val(STYLE_KIND, STYLE_NAME, "{}")
            .await?;
        let style = serde_json::from_str::<DecorateTabbarStyle>(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored tabbar style is not valid JSON: {}", e);
            DecorateTabbarStyle::default()
        });

        Ok(DecorateTabbarOut { style, list })
    }

    /// Replace every item and, when given, the style, in one transaction.
    pub async fn save(&self, input: &DecorateTabbarSaveIn) -> Result<(), ApiError> {
        let mut tx = self.state.pool.begin().await.map_err(DatabaseError::from)?;
        let now = unix_now();

        let delete = format!("DELETE FROM {} WHERE id > 0", self.table);
        sqlx::query(&delete)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        let insert = format!(
            "INSERT INTO {} (name, selected, unselected, link, create_time, update_time) \
             VALUES (?, ?, ?, ?, ?, ?)",
            self.table
        );
        for item in &input.list {
            sqlx::query(&insert)
                .bind(item.name.trim())
                .bind(self.urls.to_relative_url(&item.selected))
                .bind(self.urls.to_relative_url(&item.unselected))
                .bind(item.link.to_string())
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(DatabaseError::from)?;
        }

        if let Some(style) = &input.style {
            let value = serde_json::to_string(style).map_err(ApiError::system)?;
            ConfigStore::new(self.state)
                .set(&mut *tx, STYLE_KIND, STYLE_NAME, &value)
                .await?;
        }

        tx.commit().await.map_err(DatabaseError::from)?;
        tracing::info!("Saved {} tabbar items", input.list.len());
        Ok(())
    }
}

/// Stored links are JSON documents; anything else is passed through as text.
fn parse_link(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
