use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::normalize::Timestamp;
use crate::schemas::{empty_str_as_none, LoginClientEnum, Validate};

/// Filters for the admin user list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListIn {
    /// Matched against sn, nickname, username and mobile.
    #[serde(default)]
    pub keyword: String,
    #[serde(default, deserialize_with = "empty_str_as_none")]
    pub channel: Option<LoginClientEnum>,
    #[serde(default, deserialize_with = "empty_str_as_none")]
    pub start_time: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_str_as_none")]
    pub end_time: Option<NaiveDate>,
}

impl Validate for UserListIn {
    fn validate(&self) -> Result<(), ApiError> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(ApiError::params_valid("开始时间不能晚于结束时间"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDetailIn {
    pub id: u32,
}

impl Validate for UserDetailIn {
    fn validate(&self) -> Result<(), ApiError> {
        check_id(self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEditIn {
    pub id: u32,
    pub field: String,
    pub value: String,
}

impl Validate for UserEditIn {
    fn validate(&self) -> Result<(), ApiError> {
        check_id(self.id)?;
        if self.field.trim().is_empty() {
            return Err(ApiError::params_valid("field 不能为空"));
        }
        Ok(())
    }
}

fn check_id(id: u32) -> Result<(), ApiError> {
    if id == 0 {
        return Err(ApiError::params_valid("id 必须大于0"));
    }
    Ok(())
}

/// User row as the admin list and detail pages show it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoOut {
    pub id: u32,
    pub sn: u32,
    pub avatar: String,
    pub real_name: String,
    pub nickname: String,
    pub username: String,
    pub mobile: String,
    pub sex: u8,
    pub channel: u8,
    pub last_login_ip: String,
    pub last_login_time: Timestamp,
    pub create_time: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_filters_accept_blank_values() {
        let q: UserListIn = serde_json::from_value(serde_json::json!({
            "keyword": "ann",
            "channel": "",
            "startTime": "2024-01-01",
            "endTime": ""
        }))
        .unwrap();
        assert_eq!(q.keyword, "ann");
        assert_eq!(q.channel, None);
        assert_eq!(q.start_time, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(q.end_time, None);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn reversed_window_is_rejected() {
        let q = UserListIn {
            start_time: NaiveDate::from_ymd_opt(2024, 2, 1),
            end_time: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(UserDetailIn { id: 0 }.validate().is_err());
        assert!(UserDetailIn { id: 1 }.validate().is_ok());
        let edit = UserEditIn { id: 3, field: " ".into(), value: "x".into() };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn info_out_uses_camel_case() {
        let out = UserInfoOut {
            id: 1,
            sn: 10000001,
            avatar: String::new(),
            real_name: "Ann".into(),
            nickname: "ann".into(),
            username: "ann1".into(),
            mobile: String::new(),
            sex: 0,
            channel: 3,
            last_login_ip: "127.0.0.1".into(),
            last_login_time: Timestamp::from_unix(0),
            create_time: Timestamp::from_unix(0),
        };
        let v = serde_json::to_value(&out).unwrap();
        for key in ["realName", "lastLoginIp", "lastLoginTime", "createTime"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
    }
}
