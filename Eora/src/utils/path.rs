//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    normalize_separators(&path.as_ref().to_string_lossy())
}

/// Replace backslashes with forward slashes in a raw path string
///
/// Conversation files store Windows-style fragments such as
/// `conversations\companions\companion_eder.conversation`.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators(r"a\b/c"), "a/b/c");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/data/conversations/a/b.conversation"), Path::new("/data/conversations")),
            Some("a/b.conversation".to_string())
        );
        assert_eq!(relative_path(Path::new("/elsewhere/x"), Path::new("/data")), None);
    }
}
