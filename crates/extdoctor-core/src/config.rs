//! Inspection limits for archive diagnosis.

/// Bounds applied while inspecting a candidate archive.
///
/// Only the entry listing and the manifest entry are ever read, so these two
/// limits cover every allocation driven by archive contents.
///
/// # Examples
///
/// ```
/// use extdoctor_core::DiagnosisConfig;
///
/// // Use default limits
/// let config = DiagnosisConfig::default();
///
/// // Allow larger manifests
/// let custom = DiagnosisConfig {
///     max_manifest_size: 4 * 1024 * 1024, // 4 MB
///     ..Default::default()
/// };
/// assert!(custom.max_manifest_size > config.max_manifest_size);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisConfig {
    /// Maximum number of entries the archive may list.
    pub max_entry_count: usize,

    /// Maximum uncompressed size of the manifest entry in bytes.
    pub max_manifest_size: u64,
}

impl Default for DiagnosisConfig {
    /// Default values:
    /// - `max_entry_count`: 65,535
    /// - `max_manifest_size`: 1 MB
    fn default() -> Self {
        Self {
            max_entry_count: 65_535,
            max_manifest_size: 1024 * 1024, // 1 MB
        }
    }
}

impl DiagnosisConfig {
    /// Creates a configuration without inspection limits.
    ///
    /// Use only for archives from trusted sources.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_entry_count: usize::MAX,
            max_manifest_size: u64::MAX,
        }
    }
}
