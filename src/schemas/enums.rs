use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Client a user signed up or logged in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum LoginClientEnum {
    Mnp = 1,
    Oa = 2,
    H5 = 3,
    Pc = 4,
    Ios = 5,
    Android = 6,
}

impl LoginClientEnum {
    pub fn label(self) -> &'static str {
        match self {
            LoginClientEnum::Mnp => "微信小程序",
            LoginClientEnum::Oa => "微信公众号",
            LoginClientEnum::H5 => "手机H5",
            LoginClientEnum::Pc => "电脑PC",
            LoginClientEnum::Ios => "苹果APP",
            LoginClientEnum::Android => "安卓APP",
        }
    }
}

impl TryFrom<u8> for LoginClientEnum {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LoginClientEnum::Mnp),
            2 => Ok(LoginClientEnum::Oa),
            3 => Ok(LoginClientEnum::H5),
            4 => Ok(LoginClientEnum::Pc),
            5 => Ok(LoginClientEnum::Ios),
            6 => Ok(LoginClientEnum::Android),
            other => Err(format!("unknown client type {other}")),
        }
    }
}

impl From<LoginClientEnum> for u8 {
    fn from(value: LoginClientEnum) -> Self {
        value as u8
    }
}

impl FromStr for LoginClientEnum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.parse().map_err(|_| format!("invalid client type {s:?}"))?;
        Self::try_from(n)
    }
}

impl fmt::Display for LoginClientEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_round_trips_as_number() {
        let c: LoginClientEnum = serde_json::from_str("3").unwrap();
        assert_eq!(c, LoginClientEnum::H5);
        assert_eq!(serde_json::to_string(&c).unwrap(), "3");
        assert!(serde_json::from_str::<LoginClientEnum>("7").is_err());
    }

    #[test]
    fn client_parses_from_query_text() {
        assert_eq!("6".parse::<LoginClientEnum>(), Ok(LoginClientEnum::Android));
        assert!("pc".parse::<LoginClientEnum>().is_err());
    }
}
