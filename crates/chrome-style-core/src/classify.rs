//! Mapping source positions to enforcement zones.

use crate::context::{filename_of, SourceManager};
use crate::path::PathNormalizer;
use crate::policy::ClassificationPolicy;
use crate::types::LocationType;

use tracing::trace;

/// Filename clang reports for macro-expansion scratch buffers.
pub const SCRATCH_SPACE: &str = "<scratch space>";

/// Legacy rendering-engine directory.
const WEBKIT_DIR: &str = "/third_party/WebKit/";
/// Rendering-engine directory.
const BLINK_DIR: &str = "/third_party/blink/";
/// Browser-side rendering-engine code, which gets the full Chrome checks.
const BLINK_BROWSER_DIR: &str = "/third_party/blink/browser/";

/// Classifies positions into [`LocationType`] zones.
#[derive(Debug, Clone, Copy)]
pub struct LocationClassifier<'p> {
    policy: &'p ClassificationPolicy,
    normalizer: PathNormalizer,
}

impl<'p> LocationClassifier<'p> {
    /// Creates a classifier over a policy.
    #[must_use]
    pub fn new(policy: &'p ClassificationPolicy, normalizer: PathNormalizer) -> Self {
        Self { policy, normalizer }
    }

    /// Classifies a position. Unresolvable positions are [`LocationType::ThirdParty`].
    pub fn classify<S>(&self, sm: &S, position: S::Position) -> LocationType
    where
        S: SourceManager + ?Sized,
    {
        if sm.is_in_system_header(position) {
            trace!("{:?} is in a system header", position);
            return LocationType::ThirdParty;
        }

        let Some(filename) = filename_of(sm, position) else {
            trace!("{:?} has no presumed filename", position);
            return LocationType::ThirdParty;
        };

        self.classify_filename(filename)
    }

    /// Classifies a presumed filename without consulting a host.
    #[must_use]
    pub fn classify_filename(&self, filename: &str) -> LocationType {
        // Macro-generated code belongs to whoever defined the macro.
        if filename == SCRATCH_SPACE {
            return LocationType::ThirdParty;
        }

        let path = self.normalizer.normalize(filename);

        if path.contains(WEBKIT_DIR)
            || (path.contains(BLINK_DIR) && !path.contains(BLINK_BROWSER_DIR))
        {
            trace!("{} is rendering-engine code", path);
            return LocationType::Blink;
        }

        if let Some(dir) = self.policy.banned_directory_in(&path) {
            trace!("{} is under banned directory {}", path, dir.as_str());
            return LocationType::ThirdParty;
        }

        LocationType::Chrome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::RealPathMode;
    use crate::snapshot::TranslationUnitBuilder;

    fn classify_path(policy: &ClassificationPolicy, raw: &str) -> LocationType {
        LocationClassifier::new(policy, PathNormalizer::new(RealPathMode::Skip))
            .classify_filename(raw)
    }

    #[test]
    fn system_header_is_third_party() {
        let mut b = TranslationUnitBuilder::new();
        let sys = b.system_file("chrome/browser/looks_first_party.h");
        let pos = b.position(sys, 1, 1);
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        let classifier = LocationClassifier::new(&policy, PathNormalizer::new(RealPathMode::Skip));
        assert_eq!(classifier.classify(&tu, pos), LocationType::ThirdParty);
    }

    #[test]
    fn unresolvable_position_is_third_party() {
        let mut b = TranslationUnitBuilder::new();
        let pos = b.invalid_position();
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        let classifier = LocationClassifier::new(&policy, PathNormalizer::new(RealPathMode::Skip));
        assert_eq!(classifier.classify(&tu, pos), LocationType::ThirdParty);
    }

    #[test]
    fn scratch_space_is_third_party() {
        let policy = ClassificationPolicy::chromium();
        assert_eq!(classify_path(&policy, SCRATCH_SPACE), LocationType::ThirdParty);
    }

    #[test]
    fn webkit_is_blink() {
        let policy = ClassificationPolicy::chromium();
        assert_eq!(
            classify_path(&policy, "third_party/WebKit/Source/core/Foo.h"),
            LocationType::Blink
        );
        assert_eq!(
            classify_path(&policy, "third_party/blink/renderer/core/Foo.h"),
            LocationType::Blink
        );
    }

    #[test]
    fn blink_browser_falls_through() {
        let policy = ClassificationPolicy::chromium();
        // Not Blink; the banned /third_party/ marker applies instead.
        assert_eq!(
            classify_path(&policy, "third_party/blink/browser/Foo.h"),
            LocationType::ThirdParty
        );

        let empty = ClassificationPolicy::default();
        assert_eq!(
            classify_path(&empty, "third_party/blink/browser/Foo.h"),
            LocationType::Chrome
        );
    }

    #[test]
    fn banned_directory_component_is_third_party() {
        let policy = ClassificationPolicy::chromium();
        assert_eq!(classify_path(&policy, "third_party/foo/bar.h"), LocationType::ThirdParty);
        assert_eq!(classify_path(&policy, "out/Debug/gen/foo.h"), LocationType::ThirdParty);
        assert_eq!(classify_path(&policy, "gen/dir/file.cc"), LocationType::ThirdParty);
    }

    #[test]
    fn non_component_substring_does_not_match() {
        let policy = ClassificationPolicy::chromium();
        assert_eq!(
            classify_path(&policy, "my_third_party_extra/bar.h"),
            LocationType::Chrome
        );
        assert_eq!(classify_path(&policy, "src/general/bar.h"), LocationType::Chrome);
    }

    #[test]
    fn first_party_is_chrome() {
        let policy = ClassificationPolicy::chromium();
        assert_eq!(
            classify_path(&policy, "chrome/browser/ui/browser.h"),
            LocationType::Chrome
        );
    }

    #[test]
    fn resolve_mode_keeps_relative_path_unanchored() {
        // An unresolvable relative path keeps no leading separator, so a
        // marker at its very start cannot match.
        let policy = ClassificationPolicy::chromium();
        let classifier =
            LocationClassifier::new(&policy, PathNormalizer::new(RealPathMode::Resolve));
        assert_eq!(
            classifier.classify_filename("third_party/missing_dir_xyz/foo.h"),
            LocationType::Chrome
        );
    }

    #[test]
    fn macro_spelled_in_third_party_header() {
        let mut b = TranslationUnitBuilder::new();
        let header = b.file("third_party/gtest/gtest.h");
        let source = b.file("chrome/foo_unittest.cc");
        let spelled = b.position(header, 100, 1);
        let use_site = b.position(source, 7, 1);
        let expanded = b.macro_position(spelled, use_site);
        let tu = b.build();

        let policy = ClassificationPolicy::chromium();
        let classifier = LocationClassifier::new(&policy, PathNormalizer::new(RealPathMode::Skip));
        assert_eq!(classifier.classify(&tu, expanded), LocationType::ThirdParty);
        assert_eq!(classifier.classify(&tu, use_site), LocationType::Chrome);
    }
}
