//! Classification policy: banned directories and ignore lists.
//!
//! The policy is built once when the checker is constructed and never
//! mutated afterward.

use std::collections::BTreeSet;

/// Directories whose code is never checked.
const DEFAULT_BANNED_DIRECTORIES: &[&str] = &[
    "/third_party/",
    "/native_client/",
    "/breakpad/",
    "/courgette/",
    "/ppapi/",
    "/testing/",
    "/v8/",
    "/sdch/",
    "/frameworks/",
    // Autogenerated headers: make uses gen and geni, ninja uses gen,
    // xcode has a fixed output directory.
    "/gen/",
    "/geni/",
    "/xcodebuild/",
];

/// Simple type names that are exempt from every check.
const DEFAULT_IGNORED_RECORD_NAMES: &[&str] = &[
    // Low level threading code that should not be out of lined.
    "ThreadLocalBoolean",
    // Pickle header, all packed integers.
    "Header",
    // GPU validators with multiple-include tricks.
    "Validators",
    // UNIT_TEST only constructors.
    "AutocompleteController",
    "HistoryURLProvider",
    // Net unittest bundle of integers with one non-pod member.
    "MockTransaction",
    // Enum whose _LAST member is not the last value.
    "ServerFieldType",
    "TestAnimationDelegate",
    // Public interface used by nacl.
    "PluginVersionInfo",
    // Measured performance win on cc_perftests.
    "QuadF",
    // Enum whose _LAST member is not the last value.
    "ViewID",
];

/// Qualified base-class names that exempt all derived classes.
const DEFAULT_IGNORED_BASE_CLASSES: &[&str] = &[
    // Macro-generated structs, explicit constructors are impractical.
    "IPC::NoParams",
];

/// Errors raised while constructing a policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// A banned directory marker is not bounded by path separators.
    #[error("banned directory `{marker}` must start and end with '/'")]
    UnboundedDirectory {
        /// The offending marker.
        marker: String,
    },

    /// An empty entry in one of the policy lists.
    #[error("empty entry in `{category}`")]
    EmptyEntry {
        /// Name of the list containing the entry.
        category: &'static str,
    },
}

/// A directory marker matched as a full path component.
///
/// Always starts and ends with `/`, so `/gen/` never matches `/general/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BannedDirectory(String);

impl BannedDirectory {
    /// Validates a marker.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::UnboundedDirectory`] when the marker lacks a
    /// leading or trailing separator.
    pub fn new(marker: impl Into<String>) -> Result<Self, PolicyError> {
        let marker = marker.into();
        if marker.len() < 2 || !marker.starts_with('/') || !marker.ends_with('/') {
            return Err(PolicyError::UnboundedDirectory { marker });
        }
        Ok(Self(marker))
    }

    /// Returns the marker text, separators included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `path` contains this marker.
    #[must_use]
    pub fn occurs_in(&self, path: &str) -> bool {
        path.contains(self.0.as_str())
    }
}

/// Immutable set of lists driving classification and dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationPolicy {
    banned_directories: BTreeSet<BannedDirectory>,
    ignored_record_names: BTreeSet<String>,
    ignored_base_classes: BTreeSet<String>,
}

impl ClassificationPolicy {
    /// Creates a policy from raw lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a banned directory is not separator-bounded or any
    /// entry is empty.
    pub fn new<D, N, B>(
        banned_directories: D,
        ignored_record_names: N,
        ignored_base_classes: B,
    ) -> Result<Self, PolicyError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let mut policy = Self::default();
        policy.extend(banned_directories, ignored_record_names, ignored_base_classes)?;
        Ok(policy)
    }

    /// The built-in lists maintained for the Chromium tree.
    ///
    /// # Panics
    ///
    /// Panics if a built-in banned directory is malformed.
    #[must_use]
    pub fn chromium() -> Self {
        let mut policy = Self::default();
        for marker in DEFAULT_BANNED_DIRECTORIES {
            assert!(
                marker.starts_with('/') && marker.ends_with('/'),
                "built-in banned directory {marker} must be bounded by '/'"
            );
            policy
                .banned_directories
                .insert(BannedDirectory((*marker).to_string()));
        }
        policy.ignored_record_names = to_set(DEFAULT_IGNORED_RECORD_NAMES);
        policy.ignored_base_classes = to_set(DEFAULT_IGNORED_BASE_CLASSES);
        policy
    }

    /// Adds entries to every list.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; the policy is left unchanged in
    /// that case.
    pub fn extend<D, N, B>(
        &mut self,
        banned_directories: D,
        ignored_record_names: N,
        ignored_base_classes: B,
    ) -> Result<(), PolicyError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let dirs = banned_directories
            .into_iter()
            .map(BannedDirectory::new)
            .collect::<Result<Vec<_>, _>>()?;
        let names = non_empty(ignored_record_names, "ignored_record_names")?;
        let bases = non_empty(ignored_base_classes, "ignored_base_classes")?;

        self.banned_directories.extend(dirs);
        self.ignored_record_names.extend(names);
        self.ignored_base_classes.extend(bases);
        Ok(())
    }

    /// Returns the first banned directory occurring in `path`, if any.
    #[must_use]
    pub fn banned_directory_in(&self, path: &str) -> Option<&BannedDirectory> {
        self.banned_directories.iter().find(|d| d.occurs_in(path))
    }

    /// Exact match against the ignored simple type names.
    #[must_use]
    pub fn is_ignored_type(&self, name: &str) -> bool {
        self.ignored_record_names.contains(name)
    }

    /// Exact match against the ignored qualified base-class names.
    #[must_use]
    pub fn is_ignored_base(&self, qualified_name: &str) -> bool {
        self.ignored_base_classes.contains(qualified_name)
    }

    /// Iterates the banned directory markers in sorted order.
    pub fn banned_directories(&self) -> impl Iterator<Item = &str> {
        self.banned_directories.iter().map(BannedDirectory::as_str)
    }

    /// Iterates the ignored simple type names in sorted order.
    pub fn ignored_record_names(&self) -> impl Iterator<Item = &str> {
        self.ignored_record_names.iter().map(String::as_str)
    }

    /// Iterates the ignored base-class names in sorted order.
    pub fn ignored_base_classes(&self) -> impl Iterator<Item = &str> {
        self.ignored_base_classes.iter().map(String::as_str)
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn non_empty<I>(items: I, category: &'static str) -> Result<Vec<String>, PolicyError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .map(|s: String| {
            if s.is_empty() {
                Err(PolicyError::EmptyEntry { category })
            } else {
                Ok(s)
            }
        })
        .collect()
}
