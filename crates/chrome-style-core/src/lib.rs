//! # chrome-style-core
//!
//! Declaration classification for Chromium-style C++ checks.
//!
//! This crate decides which class and enum declarations in a translation
//! unit are subject to style enforcement, and hands those to pluggable
//! checks. It includes:
//!
//! - [`SourceManager`] and [`AstContext`] traits abstracting the compiler host
//! - [`LocationClassifier`] for mapping positions to [`LocationType`] zones
//! - [`StyleChecker`] for dispatching declarations to [`TagCheck`]s
//! - [`snapshot`] for an in-memory host loaded from JSON
//!
//! ## Example
//!
//! ```ignore
//! use chrome_style_core::{snapshot, StyleChecker, ZoneReport};
//!
//! let unit = snapshot::load_from_path("unit.json".as_ref())?;
//! let checker = StyleChecker::builder()
//!     .check(ZoneReport::new())
//!     .build()?;
//!
//! let result = checker.check_decls(&unit, unit.tag_decls());
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bases;
mod check;
mod checker;
mod classify;
mod config;
mod context;
mod expansion;
mod implementation;
mod namespace;
mod path;
mod policy;
mod report;
mod types;

/// In-memory translation units.
pub mod snapshot;

pub use bases::BaseClassInspector;
pub use check::{CheckContext, TagCheck, TagCheckBox};
pub use checker::{CheckerError, Disposition, SkipReason, StyleChecker, StyleCheckerBuilder};
pub use classify::{LocationClassifier, SCRATCH_SPACE};
pub use config::{Config, ConfigError, Options, PolicyConfig};
pub use context::{filename_of, AstContext, DeclKind, PresumedLocation, SourceManager, TagDecl};
pub use expansion::{ExpansionChain, ExpansionStep};
pub use implementation::{in_implementation_file, is_implementation_filename};
pub use namespace::{
    namespace_of, qualified_namespace, resolve_namespace, NamespaceMode, ANONYMOUS_NAMESPACE,
};
pub use path::{PathNormalizer, RealPathMode};
pub use policy::{BannedDirectory, ClassificationPolicy, PolicyError};
pub use report::ZoneReport;
pub use types::{CheckResult, Finding, Location, LocationType, Severity};
