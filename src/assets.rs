//! Asset URLs

/// Base URL that relative image paths are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBase {
    base: String,
}

impl AssetBase {
    /// Create from a base URL such as `http://localhost:5000`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();

        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Prefix a relative asset path with the base URL.
    ///
    /// Absolute `http://` and `https://` URLs are returned unchanged.
    #[must_use]
    pub fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_relative_paths() {
        let assets = AssetBase::new("http://localhost:5000/");

        assert_eq!(
            assets.image_url("uploads/a.jpg"),
            "http://localhost:5000/uploads/a.jpg"
        );
        assert_eq!(
            assets.image_url("/uploads/a.jpg"),
            "http://localhost:5000/uploads/a.jpg"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let assets = AssetBase::new("http://localhost:5000");

        assert_eq!(
            assets.image_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
