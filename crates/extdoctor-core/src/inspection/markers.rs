//! Marker file location analysis over archive entry names.

use std::collections::BTreeSet;

/// Manifest file name of a modern extension package.
pub const MANIFEST_MARKER: &str = "blender_manifest.toml";

/// Package entry point of a legacy add-on.
pub const LEGACY_MARKER: &str = "__init__.py";

/// Root label used for a marker at the archive top level.
pub const TOP_LEVEL_ROOT: &str = ".";

/// Where a marker file occurs inside an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSites {
    /// Depth of every occurrence, in archive order.
    pub depths: Vec<usize>,
    /// Distinct root prefixes, sorted.
    pub roots: Vec<String>,
}

impl MarkerSites {
    /// Locates `marker` among `names`.
    pub fn locate<S: AsRef<str>>(names: &[S], marker: &str) -> Self {
        Self {
            depths: marker_depths(names, marker),
            roots: marker_roots(names, marker),
        }
    }

    /// Returns whether the marker occurs at all.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.depths.is_empty()
    }

    /// Returns the shallowest depth, `None` if the marker is absent.
    #[must_use]
    pub fn min_depth(&self) -> Option<usize> {
        self.depths.iter().copied().min()
    }

    /// Returns the roots formatted for display.
    #[must_use]
    pub fn display_roots(&self) -> String {
        format_roots(&self.roots)
    }
}

fn is_marker(name: &str, marker: &str) -> bool {
    name == marker
        || name
            .strip_suffix(marker)
            .is_some_and(|prefix| prefix.ends_with('/'))
}

/// Returns the depth of every occurrence of `marker` in `names`.
///
/// Depth is the number of non-empty path segments above the marker file, so
/// `addon/__init__.py` has depth 1 and `__init__.py` has depth 0.
///
/// # Examples
///
/// ```
/// use extdoctor_core::inspection::marker_depths;
///
/// let names = ["a/__init__.py", "b/c/__init__.py", "readme.md"];
/// assert_eq!(marker_depths(&names, "__init__.py"), vec![1, 2]);
/// ```
pub fn marker_depths<S: AsRef<str>>(names: &[S], marker: &str) -> Vec<usize> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| is_marker(name, marker))
        .map(|name| name.split('/').filter(|s| !s.is_empty()).count() - 1)
        .collect()
}

/// Returns the distinct directory prefixes containing `marker`, sorted.
///
/// A marker at the top level is reported as `"."`.
pub fn marker_roots<S: AsRef<str>>(names: &[S], marker: &str) -> Vec<String> {
    let roots: BTreeSet<String> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| is_marker(name, marker))
        .map(|name| {
            let root = name[..name.len() - marker.len()].trim_end_matches('/');
            if root.is_empty() {
                TOP_LEVEL_ROOT.to_string()
            } else {
                root.to_string()
            }
        })
        .collect();

    roots.into_iter().collect()
}

/// Returns the first path segment of every entry that contains a separator.
pub fn top_level_names<S: AsRef<str>>(names: &[S]) -> BTreeSet<String> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.contains('/'))
        .filter_map(|name| name.split('/').next())
        .map(str::to_string)
        .collect()
}

/// Joins roots for display, `"(none)"` when there are none.
#[must_use]
pub fn format_roots(roots: &[String]) -> String {
    if roots.is_empty() {
        "(none)".to_string()
    } else {
        roots.join(", ")
    }
}
