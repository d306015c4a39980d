use serde::Deserialize;

use crate::error::ApiError;
use crate::schemas::{LoginClientEnum, Validate};

#[derive(Debug, Clone, Deserialize)]
pub struct FrontRegisterIn {
    pub username: String,
    pub password: String,
    pub client: LoginClientEnum,
}

impl Validate for FrontRegisterIn {
    fn validate(&self) -> Result<(), ApiError> {
        let name = &self.username;
        if !(3..=12).contains(&name.chars().count()) {
            return Err(ApiError::params_valid("用户名必须包含字母和数字，3-12位"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::params_valid("用户名只能包含字母和数字"));
        }
        if !name.chars().any(|c| c.is_ascii_digit()) {
            return Err(ApiError::params_valid("用户名必须包含至少一个数字"));
        }
        if !name.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(ApiError::params_valid("用户名必须包含至少一个字母"));
        }
        if !(6..=12).contains(&self.password.chars().count()) {
            return Err(ApiError::params_valid("密码长度必须在6-12位之间"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str) -> FrontRegisterIn {
        FrontRegisterIn {
            username: username.into(),
            password: password.into(),
            client: LoginClientEnum::H5,
        }
    }

    #[test]
    fn register_username_rules() {
        assert!(register("abc123", "secret1").validate().is_ok());
        assert_eq!(
            register("ab", "secret1").validate().unwrap_err().message(),
            "用户名必须包含字母和数字，3-12位"
        );
        assert_eq!(
            register("abc_12", "secret1").validate().unwrap_err().message(),
            "用户名只能包含字母和数字"
        );
        assert_eq!(
            register("abcdef", "secret1").validate().unwrap_err().message(),
            "用户名必须包含至少一个数字"
        );
        assert_eq!(
            register("123456", "secret1").validate().unwrap_err().message(),
            "用户名必须包含至少一个字母"
        );
        assert!(register("abc123", "short").validate().is_err());
    }
}
