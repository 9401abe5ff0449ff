//! Error conversion utilities for CLI.
//!
//! Converts extdoctor-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use extdoctor_core::DiagnosisError;
use extdoctor_core::ManifestError;
use std::path::Path;

/// Converts `DiagnosisError` to user-friendly anyhow error with context
pub fn convert_diagnosis_error(err: DiagnosisError, archive: &Path) -> anyhow::Error {
    match err {
        DiagnosisError::QuotaExceeded { resource } => {
            anyhow!(
                "Inspection limit exceeded for '{}': {}\n\
                 HINT: Use --max-entries or --max-manifest-size to increase limits.",
                archive.display(),
                resource
            )
        }
        DiagnosisError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid ZIP file '{}': {}\n\
                 HINT: The archive may be corrupted or not a ZIP at all.",
                archive.display(),
                reason
            )
        }
        DiagnosisError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        DiagnosisError::ReadFailure(_) => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Converts `ManifestError` to user-friendly anyhow error with context
pub fn convert_manifest_error(err: ManifestError, archive: &Path) -> anyhow::Error {
    match err {
        ManifestError::NotFound => {
            anyhow!(
                "No blender_manifest.toml found in '{}'\n\
                 HINT: Legacy add-ons have no manifest; run `extdoctor diagnose` for a full report.",
                archive.display()
            )
        }
        ManifestError::ParserUnavailable { .. } => {
            anyhow!(
                "{err} while reading '{}'\n\
                 HINT: Rebuild extdoctor with the `toml` feature enabled.",
                archive.display()
            )
        }
        ManifestError::Unreadable(_) | ManifestError::Parse(_) => anyhow::Error::from(err)
            .context(format!("Error reading manifest of '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, DiagnosisError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_diagnosis_error(e, archive))
}
