//! JSON output formatter for machine-readable results.

use super::formatter::ArchiveDiagnosis;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use super::formatter::overall_outcome;
use anyhow::Result;
use extdoctor_core::Manifest;
use extdoctor_core::ManifestValue;
use extdoctor_core::Outcome;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct FindingOutput<'a> {
    level: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct ArchiveOutput<'a> {
    path: String,
    worst_severity: u8,
    outcome: &'static str,
    findings: Vec<FindingOutput<'a>>,
}

#[derive(Serialize)]
struct DiagnoseOutput<'a> {
    archives: Vec<ArchiveOutput<'a>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn archive_output(diagnosis: &ArchiveDiagnosis) -> ArchiveOutput<'_> {
        ArchiveOutput {
            path: diagnosis.path.display().to_string(),
            worst_severity: diagnosis.report.worst(),
            outcome: outcome_name(diagnosis.report.outcome()),
            findings: diagnosis
                .report
                .findings()
                .iter()
                .map(|f| FindingOutput {
                    level: f.level.as_str(),
                    message: &f.message,
                })
                .collect(),
        }
    }
}

const fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Critical => "critical",
        Outcome::Warnings => "warnings",
        Outcome::Clean => "clean",
    }
}

/// Converts a manifest value to its JSON counterpart.
fn manifest_value_to_json(value: &ManifestValue) -> Value {
    match value {
        ManifestValue::String(s) | ManifestValue::Datetime(s) => Value::String(s.clone()),
        ManifestValue::Integer(i) => Value::from(*i),
        ManifestValue::Float(f) => Value::from(*f),
        ManifestValue::Boolean(b) => Value::Bool(*b),
        ManifestValue::Array(items) => {
            Value::Array(items.iter().map(manifest_value_to_json).collect())
        }
        ManifestValue::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), manifest_value_to_json(v)))
                .collect(),
        ),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_diagnoses(&self, diagnoses: &[ArchiveDiagnosis]) -> Result<()> {
        let data = DiagnoseOutput {
            archives: diagnoses.iter().map(Self::archive_output).collect(),
        };

        let status = Status::from(overall_outcome(diagnoses));
        let output = JsonOutput::new("diagnose", status, data);
        Self::output(&output)
    }

    fn format_manifest(&self, archive: &Path, entry: &str, manifest: &Manifest) -> Result<()> {
        #[derive(Serialize)]
        struct ManifestOutput {
            archive: String,
            entry: String,
            id: Option<String>,
            version: Option<String>,
            name: Option<String>,
            blender_version_min: Option<String>,
            blender_version_max: Option<String>,
            missing_required: Vec<&'static str>,
            extra: serde_json::Map<String, Value>,
        }

        let data = ManifestOutput {
            archive: archive.display().to_string(),
            entry: entry.to_string(),
            id: manifest.id().map(str::to_string),
            version: manifest.version().map(str::to_string),
            name: manifest.name().map(str::to_string),
            blender_version_min: manifest.blender_version_min().map(ToString::to_string),
            blender_version_max: manifest.blender_version_max().map(ToString::to_string),
            missing_required: manifest.missing_required(),
            extra: manifest
                .extra_fields()
                .map(|(k, v)| (k.to_string(), manifest_value_to_json(v)))
                .collect(),
        };

        let output = JsonOutput::success("manifest", data);
        Self::output(&output)
    }
}
