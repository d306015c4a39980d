use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Validate;
use crate::error::ApiError;

pub const MAX_PAGE_SIZE: u32 = 60;

/// `?pageNo=&pageSize=` paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default = "PageParams::default_page_no")]
    pub page_no: u32,
    #[serde(default = "PageParams::default_page_size")]
    pub page_size: u32,
}

impl PageParams {
    fn default_page_no() -> u32 {
        1
    }

    fn default_page_size() -> u32 {
        20
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_no.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_no: Self::default_page_no(),
            page_size: Self::default_page_size(),
        }
    }
}

impl Validate for PageParams {
    fn validate(&self) -> Result<(), ApiError> {
        if self.page_no < 1 {
            return Err(ApiError::params_valid("pageNo 必须大于等于1"));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(ApiError::params_valid(format!(
                "pageSize 必须在1到{MAX_PAGE_SIZE}之间"
            )));
        }
        Ok(())
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub count: i64,
    pub page_no: u32,
    pub page_size: u32,
    pub lists: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn create(lists: Vec<T>, count: i64, params: &PageParams) -> Self {
        Self {
            count,
            page_no: params.page_no,
            page_size: params.page_size,
            lists,
        }
    }
}

/// Optional field where `""` (or whitespace) means absent. Non-string values
/// are stringified before parsing, so `1` and `"1"` decode alike.
pub fn empty_str_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(de::Error::custom)
}
