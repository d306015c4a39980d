use crate::config::Settings;

/// Converts stored upload paths to public URLs and back.
#[derive(Debug, Clone)]
pub struct UrlUtil {
    base: String,
}

impl UrlUtil {
    pub fn new(settings: &Settings) -> Self {
        Self::with_parts(&settings.domain, &settings.upload_prefix)
    }

    pub fn with_parts(domain: &str, upload_prefix: &str) -> Self {
        let prefix = upload_prefix.trim_matches('/');
        let base = if prefix.is_empty() {
            format!("{}/", domain.trim_end_matches('/'))
        } else {
            format!("{}/{}/", domain.trim_end_matches('/'), prefix)
        };
        Self { base }
    }

    /// `image/a.png` -> `http://host/api/uploads/image/a.png`. Empty and
    /// already-absolute values are returned as given.
    pub fn to_absolute_url(&self, path: &str) -> String {
        if path.is_empty() || is_absolute(path) {
            return path.to_string();
        }
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Inverse of [`to_absolute_url`](Self::to_absolute_url). URLs on other
    /// hosts are kept whole.
    pub fn to_relative_url(&self, url: &str) -> String {
        if !is_absolute(url) {
            return url.to_string();
        }
        url.strip_prefix(&self.base).unwrap_or(url).to_string()
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
