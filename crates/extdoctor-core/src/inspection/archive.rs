//! Structural view of an opened ZIP archive.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use crate::DiagnosisConfig;
use crate::DiagnosisError;
use crate::Result;
use crate::error::QuotaResource;
use crate::inspection::markers::MarkerSites;
use crate::inspection::markers::marker_depths;
use crate::inspection::markers::marker_roots;
use crate::inspection::markers::top_level_names;

/// An opened ZIP archive indexed by entry name.
///
/// The underlying file handle lives as long as the inspector and is released
/// when it is dropped.
///
/// # Examples
///
/// ```no_run
/// use extdoctor_core::DiagnosisConfig;
/// use extdoctor_core::inspection::ArchiveInspector;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let inspector = ArchiveInspector::open("addon.zip", &DiagnosisConfig::default())?;
/// for root in inspector.marker_roots("__init__.py") {
///     println!("add-on root: {root}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ArchiveInspector {
    archive: zip::ZipArchive<BufReader<File>>,
    entries: Vec<String>,
}

impl ArchiveInspector {
    /// Opens and indexes the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file cannot be opened
    /// - The container is not a readable ZIP (`InvalidArchive`)
    /// - The archive lists more entries than `config.max_entry_count`
    pub fn open<P: AsRef<Path>>(path: P, config: &DiagnosisConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let archive = zip::ZipArchive::new(BufReader::new(file))?;

        if archive.len() > config.max_entry_count {
            return Err(DiagnosisError::QuotaExceeded {
                resource: QuotaResource::EntryCount {
                    current: archive.len(),
                    max: config.max_entry_count,
                },
            });
        }

        let entries: Vec<String> = archive.file_names().map(str::to_string).collect();
        tracing::debug!(entries = entries.len(), "indexed archive");

        Ok(Self { archive, entries })
    }

    /// Returns the raw entry paths in archive order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns whether the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first path segment of every entry containing a separator.
    #[must_use]
    pub fn top_level_names(&self) -> BTreeSet<String> {
        top_level_names(&self.entries)
    }

    /// Returns the depth of every occurrence of `marker`.
    #[must_use]
    pub fn marker_depths(&self, marker: &str) -> Vec<usize> {
        marker_depths(&self.entries, marker)
    }

    /// Returns the distinct sorted roots containing `marker`.
    #[must_use]
    pub fn marker_roots(&self, marker: &str) -> Vec<String> {
        marker_roots(&self.entries, marker)
    }

    /// Returns depths and roots of `marker` together.
    #[must_use]
    pub fn marker_sites(&self, marker: &str) -> MarkerSites {
        MarkerSites::locate(&self.entries, marker)
    }

    /// Returns the first entry whose path ends with `suffix`.
    #[must_use]
    pub fn find_suffix(&self, suffix: &str) -> Option<&str> {
        self.entries
            .iter()
            .map(String::as_str)
            .find(|name| name.ends_with(suffix))
    }

    /// Reads the full contents of entry `name`.
    ///
    /// # Errors
    ///
    /// Returns error if the entry is missing, cannot be decompressed, or its
    /// size exceeds `limit` bytes.
    pub fn read_entry(&mut self, name: &str, limit: u64) -> Result<Vec<u8>> {
        let entry = self.archive.by_name(name)?;

        if entry.size() > limit {
            return Err(DiagnosisError::QuotaExceeded {
                resource: QuotaResource::EntrySize {
                    size: entry.size(),
                    max: limit,
                },
            });
        }

        // Declared sizes can lie; never buffer more than the limit.
        let mut data = Vec::new();
        entry.take(limit.saturating_add(1)).read_to_end(&mut data)?;
        if data.len() as u64 > limit {
            return Err(DiagnosisError::QuotaExceeded {
                resource: QuotaResource::EntrySize {
                    size: data.len() as u64,
                    max: limit,
                },
            });
        }

        Ok(data)
    }
}
