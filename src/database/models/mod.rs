pub mod decorate_tabbar;
pub mod system_config;
pub mod user;

pub use decorate_tabbar::DecorateTabbar;
pub use system_config::SystemConfig;
pub use user::User;
