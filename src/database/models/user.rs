use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of `{prefix}user`. Times are unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: u32,
    pub sn: u32,
    pub avatar: String,
    pub real_name: String,
    pub nickname: String,
    pub username: String,
    pub password: String,
    pub mobile: String,
    pub sex: u8,
    pub channel: u8,
    pub is_disable: u8,
    pub last_login_ip: String,
    pub last_login_time: u32,
    pub create_time: u32,
}

impl User {
    /// Column list matching the struct, for `SELECT`s.
    pub const COLUMNS: &'static str = "id, sn, avatar, real_name, nickname, username, password, \
         mobile, sex, channel, is_disable, last_login_ip, last_login_time, create_time";
}
