//! Structural checks over marker placement.

use std::collections::BTreeSet;
use std::path::Path;

use crate::Report;
use crate::diagnosis::hints::looks_like_source_archive;
use crate::inspection::ArchiveInspector;
use crate::inspection::LEGACY_MARKER;
use crate::inspection::MANIFEST_MARKER;
use crate::inspection::MarkerSites;

/// Where the package markers sit inside one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageLayout {
    /// First segment of every entry inside a directory.
    pub top_level: BTreeSet<String>,
    /// Occurrences of the legacy `__init__.py` marker.
    pub legacy: MarkerSites,
    /// Occurrences of `blender_manifest.toml`.
    pub manifest: MarkerSites,
}

impl PackageLayout {
    /// Locates both markers in an opened archive.
    pub fn inspect(inspector: &ArchiveInspector) -> Self {
        let layout = Self {
            top_level: inspector.top_level_names(),
            legacy: inspector.marker_sites(LEGACY_MARKER),
            manifest: inspector.marker_sites(MANIFEST_MARKER),
        };
        tracing::debug!(
            top_level = layout.top_level.len(),
            legacy = layout.legacy.depths.len(),
            manifest = layout.manifest.depths.len(),
            "located package markers"
        );
        layout
    }

    /// Returns whether any `__init__.py` marker exists.
    pub fn has_legacy(&self) -> bool {
        self.legacy.is_present()
    }

    /// Returns whether any manifest marker exists.
    pub fn has_manifest(&self) -> bool {
        self.manifest.is_present()
    }

    /// Legacy add-on without any extension manifest.
    fn is_legacy_only(&self) -> bool {
        self.has_legacy() && !self.has_manifest()
    }

    /// Several install targets packed together.
    pub fn check_roots(&self, report: &mut Report) {
        if self.manifest.roots.len() > 1 {
            report.warning(
                "Multiple extension manifests detected in one ZIP. Blender expects a single install target package.",
            );
            report.info(format!(
                "Manifest root candidate(s): {}",
                self.manifest.display_roots()
            ));
        }

        if self.is_legacy_only() && self.legacy.roots.len() > 1 {
            report.warning(
                "Multiple add-on roots detected (__init__.py in multiple folders). Install may fail or install the wrong package.",
            );
            report.info(format!(
                "Add-on root candidate(s): {}",
                self.legacy.display_roots()
            ));
            report.info("Fix hint: create a ZIP containing only one intended add-on folder at root.");
        }
    }

    /// Nesting depth of the markers.
    ///
    /// A manifest must sit at the very top; a legacy add-on folder may be one
    /// level down.
    pub fn check_depths(&self, report: &mut Report, archive_path: &Path) {
        if let Some(depth) = self.manifest.min_depth() {
            if depth > 0 {
                report.warning(
                    "Manifest is not at ZIP root (nested too deep). Blender extension installers often require blender_manifest.toml directly at root.",
                );
                report.info(format!(
                    "Detected manifest root candidate(s): {}",
                    self.manifest.display_roots()
                ));
                report.info(
                    "Fix hint: re-zip the extension folder contents so blender_manifest.toml is the first-level file in the ZIP.",
                );
                if looks_like_source_archive(archive_path) {
                    report.info(
                        "This looks like a source archive (e.g. GitHub/GitLab download ZIP). Prefer a release/install ZIP from the add-on author when available.",
                    );
                }
            } else {
                report.ok("Extension packaging depth looks installable");
            }
        }

        if self.is_legacy_only()
            && let Some(depth) = self.legacy.min_depth()
        {
            if depth > 1 {
                report.warning(
                    "Add-on __init__.py is nested too deep. Re-zip so addon folder (with __init__.py) is at ZIP root.",
                );
                report.info(format!(
                    "Detected add-on root candidate(s): {}",
                    self.legacy.display_roots()
                ));
                if looks_like_source_archive(archive_path) {
                    report.info(
                        "This looks like a source archive (e.g. GitHub/GitLab download ZIP). If a Releases install ZIP exists, use that instead.",
                    );
                }
            } else {
                report.ok("Legacy add-on packaging depth looks installable");
            }
        }
    }

    /// Which package form the archive claims to be.
    pub fn check_package_kind(&self, report: &mut Report, archive_path: &Path) {
        if self.has_manifest() && self.has_legacy() {
            report.warning(
                "Both extension manifest and legacy __init__.py detected. Ensure you install through the intended path to avoid confusion.",
            );
        }

        if !self.has_manifest() && !self.has_legacy() {
            report.error(
                "Could not find blender_manifest.toml or __init__.py. This ZIP likely is source/docs, not an installable package.",
            );
            if looks_like_source_archive(archive_path) {
                report.info(
                    "Likely a repository source ZIP. In GitHub/GitLab, look for Releases assets or zip only the actual add-on folder before installing.",
                );
            }
        }
    }

    /// Packaging cleanliness.
    pub fn check_top_level(&self, report: &mut Report) {
        if self.top_level.len() > 1 {
            report.warning(
                "ZIP has multiple top-level folders/files; installers often expect a cleaner package root.",
            );
        }
    }
}
