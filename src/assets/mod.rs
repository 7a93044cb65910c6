/// Image asset handling
///
/// This module handles:
/// - Resolving catalog image references to files under the asset root
/// - Falling back to the placeholder when a reference is missing
/// - Generating and caching card thumbnails (thumbnail.rs)

pub mod thumbnail;

use std::path::PathBuf;

/// Maps opaque image references (as written in the catalog, e.g.
/// `/images/game.png?height=300`) to files on disk.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
    placeholder: String,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>, placeholder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            placeholder: placeholder.into(),
        }
    }

    /// The reference itself, or the placeholder when absent or empty
    pub fn reference_or_placeholder<'a>(&'a self, reference: Option<&'a str>) -> &'a str {
        reference
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(self.placeholder.as_str())
    }

    /// Path a reference points at, whether or not the file exists.
    ///
    /// Query strings are dropped and a leading `/` is taken as relative to
    /// the asset root. Remote URLs have no local path.
    pub fn to_path(&self, reference: &str) -> Option<PathBuf> {
        if reference.contains("://") {
            return None;
        }
        let without_query = reference.split('?').next().unwrap_or_default();
        let relative = without_query.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Existing file for a reference, falling back to the placeholder.
    ///
    /// `None` when neither exists; the UI then draws an empty frame.
    pub fn resolve(&self, reference: Option<&str>) -> Option<PathBuf> {
        let reference = self.reference_or_placeholder(reference);
        self.to_path(reference)
            .filter(|path| path.is_file())
            .or_else(|| self.to_path(&self.placeholder).filter(|path| path.is_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reference_or_placeholder() {
        let resolver = AssetResolver::new("public", "/placeholder.png");
        assert_eq!(resolver.reference_or_placeholder(Some("/a.png")), "/a.png");
        assert_eq!(resolver.reference_or_placeholder(Some("  ")), "/placeholder.png");
        assert_eq!(resolver.reference_or_placeholder(None), "/placeholder.png");
    }

    #[test]
    fn test_to_path_strips_slash_and_query() {
        let resolver = AssetResolver::new("public", "/placeholder.png");
        assert_eq!(
            resolver.to_path("/placeholder.svg?height=300&width=500"),
            Some(PathBuf::from("public/placeholder.svg"))
        );
        assert_eq!(resolver.to_path("https://cdn.example.com/a.png"), None);
        assert_eq!(resolver.to_path("/"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("placeholder.png"), b"png").unwrap();
        fs::write(dir.path().join("real.png"), b"png").unwrap();
        let resolver = AssetResolver::new(dir.path(), "/placeholder.png");

        assert_eq!(resolver.resolve(Some("/real.png")), Some(dir.path().join("real.png")));
        assert_eq!(
            resolver.resolve(Some("/gone.png")),
            Some(dir.path().join("placeholder.png"))
        );
        assert_eq!(resolver.resolve(None), Some(dir.path().join("placeholder.png")));
    }

    #[test]
    fn test_resolve_without_any_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path(), "/placeholder.png");
        assert_eq!(resolver.resolve(Some("/gone.png")), None);
    }
}
