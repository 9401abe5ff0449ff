//! Ordered diagnosis of a candidate package archive.
//!
//! The checks run in a fixed order. Preflight failures (no path, missing
//! file, unreadable or empty archive) stop the run with the findings emitted
//! so far; every other check appends findings and continues so that the full
//! set of structural observations is surfaced.

mod compat;
mod hints;
mod layout;

use std::error::Error as _;
use std::path::Path;

use crate::DiagnosisConfig;
use crate::DiagnosisError;
use crate::Report;
use crate::inspection::ArchiveInspector;
use crate::manifest::read_manifest;

pub use hints::looks_like_source_archive;
pub use layout::PackageLayout;

/// Maximum length of the diagnostic trace attached to unexpected errors.
const MAX_TRACE_LEN: usize = 300;

/// Diagnoses the archive at `archive_path` with default limits.
///
/// `host_version` is the dotted version of the running Blender, used for the
/// `blender_version_min`/`blender_version_max` compatibility checks.
///
/// The returned report is never empty and this function never fails: every
/// problem is expressed as a finding.
///
/// # Examples
///
/// ```no_run
/// use extdoctor_core::Level;
/// use extdoctor_core::diagnose_archive;
///
/// let report = diagnose_archive("my_extension.zip", Some("4.2.0"));
/// for finding in &report {
///     println!("{}: {}", finding.level, finding.message);
/// }
/// if report.worst() >= Level::Error.severity() {
///     eprintln!("package is not installable");
/// }
/// ```
pub fn diagnose_archive<P: AsRef<Path>>(archive_path: P, host_version: Option<&str>) -> Report {
    diagnose_archive_with_config(archive_path, host_version, &DiagnosisConfig::default())
}

/// Diagnoses the archive at `archive_path` with explicit inspection limits.
pub fn diagnose_archive_with_config<P: AsRef<Path>>(
    archive_path: P,
    host_version: Option<&str>,
    config: &DiagnosisConfig,
) -> Report {
    let archive_path = archive_path.as_ref();
    let mut report = Report::new();

    if let Some(mut inspector) = preflight(&mut report, archive_path, config) {
        diagnose_contents(&mut report, &mut inspector, archive_path, host_version, config);
    }

    if report.is_empty() {
        report.info("No findings");
    }

    report
}

/// Validates the path and opens the archive, `None` when the run must stop.
fn preflight(
    report: &mut Report,
    archive_path: &Path,
    config: &DiagnosisConfig,
) -> Option<ArchiveInspector> {
    if archive_path.as_os_str().is_empty() {
        report.error("No file selected");
        return None;
    }

    if !archive_path.is_file() {
        report.error(format!("File does not exist: {}", archive_path.display()));
        return None;
    }

    if !hints::has_zip_suffix(archive_path) {
        report.warning("Selected file is not a .zip archive");
    }

    let inspector = match ArchiveInspector::open(archive_path, config) {
        Ok(inspector) => inspector,
        Err(err) => {
            report_open_failure(report, &err);
            return None;
        }
    };

    if inspector.is_empty() {
        report.error("ZIP is empty");
        return None;
    }

    tracing::debug!(path = %archive_path.display(), "archive opened");
    Some(inspector)
}

/// Terminal findings for an archive that could not be opened.
fn report_open_failure(report: &mut Report, err: &DiagnosisError) {
    match err {
        DiagnosisError::InvalidArchive(reason) => {
            report.error(format!("Invalid ZIP file ({reason})"));
        }
        DiagnosisError::QuotaExceeded { .. } => {
            report.error(format!("ZIP exceeds inspection limits: {err}"));
        }
        DiagnosisError::Io(_) | DiagnosisError::ReadFailure(_) => {
            report.error(format!("Unexpected error analyzing ZIP: {err}"));
            report.info(diagnostic_trace(err));
        }
    }
}

fn diagnose_contents(
    report: &mut Report,
    inspector: &mut ArchiveInspector,
    archive_path: &Path,
    host_version: Option<&str>,
    config: &DiagnosisConfig,
) {
    let layout = PackageLayout::inspect(inspector);
    layout.check_roots(report);

    let manifest = read_manifest(inspector, config);
    if let Err(err) = &manifest {
        tracing::debug!(%err, "manifest unavailable");
    }

    layout.check_depths(report, archive_path);
    layout.check_package_kind(report, archive_path);
    compat::check_manifest(report, &manifest, layout.has_legacy(), host_version);
    layout.check_top_level(report);
}

/// Renders an error and its sources on one line, truncated.
fn diagnostic_trace(err: &DiagnosisError) -> String {
    let mut trace = format!("{err:?}");
    let mut source = err.source();
    while let Some(cause) = source {
        trace.push_str(" <- ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }

    if trace.chars().count() > MAX_TRACE_LEN {
        trace = trace.chars().take(MAX_TRACE_LEN).collect();
        trace.push_str("...");
    }
    trace
}
