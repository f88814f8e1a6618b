//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::resolver::ImportResolver;

/// Context provided to per-file rules.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Resolver shared by every file of the current run.
    pub resolver: &'a ImportResolver,
    relative: &'a Path,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(
        path: &'a Path,
        content: &'a str,
        root: &Path,
        resolver: &'a ImportResolver,
    ) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        Self {
            path,
            content,
            resolver,
            relative,
        }
    }

    /// Path relative to the project root, as reported in violations.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.relative.to_path_buf()
    }

    /// The file path as a string, for pattern classification.
    #[must_use]
    pub fn filename(&self) -> std::borrow::Cow<'a, str> {
        self.path.to_string_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_strips_root() {
        let resolver = ImportResolver::new();
        let ctx = FileContext::new(
            Path::new("/repo/src/App.tsx"),
            "",
            Path::new("/repo"),
            &resolver,
        );
        assert_eq!(ctx.relative_path(), PathBuf::from("src/App.tsx"));
        assert_eq!(ctx.filename(), "/repo/src/App.tsx");
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let resolver = ImportResolver::new();
        let ctx = FileContext::new(
            Path::new("/elsewhere/a.ts"),
            "",
            Path::new("/repo"),
            &resolver,
        );
        assert_eq!(ctx.relative_path(), PathBuf::from("/elsewhere/a.ts"));
    }
}
