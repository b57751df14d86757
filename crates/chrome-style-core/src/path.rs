//! Path normalization ahead of banned-directory matching.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How raw filenames are turned into absolute paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RealPathMode {
    /// Resolve through the filesystem to a canonical, symlink-free path.
    #[default]
    Resolve,
    /// Prepend a separator without touching the filesystem.
    ///
    /// Turns a build-relative `gen/dir/file.cc` into `/gen/dir/file.cc` so
    /// that separator-anchored markers still match in sandboxed builds.
    Skip,
}

impl RealPathMode {
    /// Mode selected by the `no_realpath` option.
    #[must_use]
    pub fn from_no_realpath(no_realpath: bool) -> Self {
        if no_realpath {
            Self::Skip
        } else {
            Self::Resolve
        }
    }
}

/// Converts raw filenames into a canonical form for substring matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathNormalizer {
    mode: RealPathMode,
}

impl PathNormalizer {
    /// Creates a normalizer using the given mode.
    #[must_use]
    pub fn new(mode: RealPathMode) -> Self {
        Self { mode }
    }

    /// The configured mode.
    #[must_use]
    pub fn mode(&self) -> RealPathMode {
        self.mode
    }

    /// Normalizes `raw`. Never fails: an unresolvable path is kept as is.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let absolute = match self.mode {
            RealPathMode::Skip => format!("/{raw}"),
            RealPathMode::Resolve => match std::fs::canonicalize(Path::new(raw)) {
                Ok(resolved) => strip_verbatim_prefix(&resolved.to_string_lossy()).to_string(),
                Err(e) => {
                    tracing::trace!("Keeping unresolved path {}: {}", raw, e);
                    raw.to_string()
                }
            },
        };
        absolute.replace('\\', "/")
    }
}

/// Drops the `\\?\` prefix Windows attaches to canonicalized paths.
fn strip_verbatim_prefix(path: &str) -> &str {
    path.strip_prefix(r"\\?\").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_mode_prepends_separator() {
        let normalizer = PathNormalizer::new(RealPathMode::Skip);
        assert_eq!(normalizer.normalize("gen/dir/file.cc"), "/gen/dir/file.cc");
    }

    #[test]
    fn skip_mode_converts_backslashes() {
        let normalizer = PathNormalizer::new(RealPathMode::Skip);
        assert_eq!(
            normalizer.normalize(r"third_party\WebKit\Source\Foo.h"),
            "/third_party/WebKit/Source/Foo.h"
        );
    }

    #[test]
    fn resolve_mode_keeps_missing_path() {
        let normalizer = PathNormalizer::new(RealPathMode::Resolve);
        assert_eq!(
            normalizer.normalize("does/not/exist/anywhere.h"),
            "does/not/exist/anywhere.h"
        );
    }

    #[test]
    fn resolve_mode_makes_path_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("foo.h");
        std::fs::write(&file, "").unwrap();

        let normalized = PathNormalizer::new(RealPathMode::Resolve)
            .normalize(&dir.path().join(".").join("foo.h").to_string_lossy());
        assert!(normalized.ends_with("/foo.h"));
        assert!(!normalized.contains("/./"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_mode_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("third_party").join("lib");
        std::fs::create_dir_all(&real).unwrap();
        std::fs::write(real.join("x.h"), "").unwrap();
        let link = dir.path().join("src_link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let normalized = PathNormalizer::new(RealPathMode::Resolve)
            .normalize(&link.join("x.h").to_string_lossy());
        assert!(normalized.contains("/third_party/lib/x.h"));
        assert!(!normalized.contains("src_link"));
    }

    #[test]
    fn verbatim_prefix_is_stripped() {
        assert_eq!(strip_verbatim_prefix(r"\\?\C:\src\a.h"), r"C:\src\a.h");
        assert_eq!(strip_verbatim_prefix("/src/a.h"), "/src/a.h");
    }

    #[test]
    fn mode_from_option() {
        assert_eq!(RealPathMode::from_no_realpath(true), RealPathMode::Skip);
        assert_eq!(RealPathMode::from_no_realpath(false), RealPathMode::Resolve);
    }
}
