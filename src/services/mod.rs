pub mod admin_user_service;
pub mod config_store;
pub mod front_user_service;
pub mod tabbar_service;
pub mod url_util;

pub use admin_user_service::AdminUserService;
pub use config_store::ConfigStore;
pub use front_user_service::FrontUserService;
pub use tabbar_service::TabbarService;
pub use url_util::UrlUtil;

use chrono::Utc;
use sha2::{Digest, Sha256};

/// Current unix time in the width of the `*_time` columns.
pub fn unix_now() -> u32 {
    u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX)
}

/// Stored password digest: hex sha256 of secret followed by password.
pub fn hash_password(secret: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_depends_on_secret() {
        let a = hash_password("UVTIyzCy", "abc123");
        assert_eq!(a.len(), 64);
        assert_eq!(a, hash_password("UVTIyzCy", "abc123"));
        assert_ne!(a, hash_password("other", "abc123"));
    }
}
