//! Output formatter trait for CLI results.

use anyhow::Result;
use extdoctor_core::Manifest;
use extdoctor_core::Outcome;
use extdoctor_core::Report;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Report of one archive in a diagnose run.
#[derive(Debug)]
pub struct ArchiveDiagnosis {
    pub path: PathBuf,
    pub report: Report,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the reports of a diagnose run, in input order
    fn format_diagnoses(&self, diagnoses: &[ArchiveDiagnosis]) -> Result<()>;

    /// Format a parsed manifest
    fn format_manifest(&self, archive: &Path, entry: &str, manifest: &Manifest) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Failure,
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => Self::Success,
            Outcome::Warnings => Self::Warning,
            Outcome::Critical => Self::Failure,
        }
    }
}

impl<T: Serialize> JsonOutput<T> {
    pub fn new(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
        }
    }

    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self::new(operation, Status::Success, data)
    }
}

/// Returns the outcome of the worst report in a run.
pub fn overall_outcome(diagnoses: &[ArchiveDiagnosis]) -> Outcome {
    Outcome::from_severity(
        diagnoses
            .iter()
            .map(|d| d.report.worst())
            .max()
            .unwrap_or(0),
    )
}
