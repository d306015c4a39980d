use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `{prefix}system_config`: one `(type, name) -> value` setting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SystemConfig {
    pub id: u32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub value: String,
    pub create_time: u32,
    pub update_time: u32,
}
