use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::normalize::Timestamp;
use crate::schemas::Validate;

/// Personal centre summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCenterOut {
    pub id: u32,
    pub sn: u32,
    pub avatar: String,
    pub real_name: String,
    pub nickname: String,
    pub username: String,
    pub mobile: String,
}

/// Personal information page: the centre fields plus account details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoOut {
    #[serde(flatten)]
    pub center: UserCenterOut,
    pub sex: u8,
    pub is_password: bool,
    pub is_bind_mnp: bool,
    pub version: Option<String>,
    pub create_time: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEditIn {
    pub field: String,
    pub value: String,
}

impl Validate for UserEditIn {
    fn validate(&self) -> Result<(), ApiError> {
        if self.field.trim().is_empty() {
            return Err(ApiError::params_valid("field 不能为空"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserChangePwdIn {
    pub password: String,
    #[serde(rename = "oldPassword", default)]
    pub old_password: String,
}

/// 6-20 letters and digits, not all of one kind.
pub fn is_strong_password(value: &str) -> bool {
    (6..=20).contains(&value.len())
        && value.chars().all(|c| c.is_ascii_alphanumeric())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_alphabetic())
}

impl Validate for UserChangePwdIn {
    fn validate(&self) -> Result<(), ApiError> {
        if !is_strong_password(&self.password) {
            return Err(ApiError::params_valid(
                "密码必须是6-20位字母和数字的组合（不能全是字母或全是数字）",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_flattens_center_fields() {
        let info = UserInfoOut {
            center: UserCenterOut {
                id: 7,
                sn: 10000007,
                avatar: String::new(),
                real_name: String::new(),
                nickname: "n".into(),
                username: "u1".into(),
                mobile: String::new(),
            },
            sex: 1,
            is_password: true,
            is_bind_mnp: false,
            version: Some("v1.1.0".into()),
            create_time: Timestamp::from_unix(0),
        };
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["isPassword"], true);
        assert_eq!(v["isBindMnp"], false);
        assert!(v.get("center").is_none());
    }

    #[test]
    fn password_strength() {
        assert!(is_strong_password("abc123"));
        assert!(!is_strong_password("abcdef"));
        assert!(!is_strong_password("123456"));
        assert!(!is_strong_password("ab12"));
        assert!(!is_strong_password("abc 123"));
        assert!(!is_strong_password(&"a1".repeat(11)));
    }

    #[test]
    fn change_pwd_reads_old_password_alias() {
        let input: UserChangePwdIn =
            serde_json::from_value(json!({"password": "abc123", "oldPassword": "old111"})).unwrap();
        assert_eq!(input.old_password, "old111");
        assert!(input.validate().is_ok());
    }
}
