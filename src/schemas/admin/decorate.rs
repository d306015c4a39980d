use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::schemas::Validate;

pub const MAX_TABBAR_ITEMS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecorateTabbarStyle {
    pub default_color: String,
    pub selected_color: String,
}

/// One tabbar entry. Icons are absolute URLs on the way out and relative on
/// the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorateTabbarList {
    pub name: String,
    pub selected: String,
    pub unselected: String,
    #[serde(default)]
    pub link: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecorateTabbarOut {
    pub style: DecorateTabbarStyle,
    pub list: Vec<DecorateTabbarList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecorateTabbarSaveIn {
    #[serde(default)]
    pub style: Option<DecorateTabbarStyle>,
    pub list: Vec<DecorateTabbarList>,
}

impl Validate for DecorateTabbarSaveIn {
    fn validate(&self) -> Result<(), ApiError> {
        if self.list.is_empty() {
            return Err(ApiError::params_valid("导航不能为空"));
        }
        if self.list.len() > MAX_TABBAR_ITEMS {
            return Err(ApiError::params_valid(format!("导航最多{MAX_TABBAR_ITEMS}个")));
        }
        if self.list.iter().any(|item| item.name.trim().is_empty()) {
            return Err(ApiError::params_valid("导航名称不能为空"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str) -> DecorateTabbarList {
        DecorateTabbarList {
            name: name.into(),
            selected: "a.png".into(),
            unselected: "b.png".into(),
            link: json!({"path": "/pages/index/index"}),
        }
    }

    #[test]
    fn style_tolerates_missing_keys() {
        let style: DecorateTabbarStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(style, DecorateTabbarStyle::default());
        let style: DecorateTabbarStyle =
            serde_json::from_str(r##"{"defaultColor": "#999", "selectedColor": "#f00"}"##).unwrap();
        assert_eq!(style.selected_color, "#f00");
    }

    #[test]
    fn save_requires_named_items() {
        let ok = DecorateTabbarSaveIn { style: None, list: vec![item("首页"), item("我的")] };
        assert!(ok.validate().is_ok());
        assert!(DecorateTabbarSaveIn { style: None, list: vec![] }.validate().is_err());
        assert!(DecorateTabbarSaveIn { style: None, list: vec![item(" ")] }.validate().is_err());
        let too_many = DecorateTabbarSaveIn { style: None, list: vec![item("x"); 6] };
        assert!(too_many.validate().is_err());
    }
}
