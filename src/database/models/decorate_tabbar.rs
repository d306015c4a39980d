use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `{prefix}decorate_tabbar`. `link` holds a JSON document as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DecorateTabbar {
    pub id: u32,
    pub name: String,
    pub selected: String,
    pub unselected: String,
    pub link: String,
    pub create_time: u32,
    pub update_time: u32,
}
