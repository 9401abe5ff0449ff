//! Manifest content and host version compatibility checks.

use crate::Manifest;
use crate::ManifestError;
use crate::Report;
use crate::diagnosis::hints::EXTENSION_INSTALL_PATH;
use crate::diagnosis::hints::LEGACY_INSTALL_PATH;
use crate::manifest::ManifestValue;
use crate::version::VersionTuple;

/// Reports on the outcome of manifest reading.
pub fn check_manifest(
    report: &mut Report,
    manifest: &Result<Manifest, ManifestError>,
    has_legacy: bool,
    host_version: Option<&str>,
) {
    let manifest = match manifest {
        Ok(manifest) => manifest,
        Err(err) => {
            report.warning(format!("Extension manifest issue: {err}"));
            if has_legacy {
                report.info(LEGACY_INSTALL_PATH);
            } else {
                report.info("Could not detect legacy add-on markers either. Package may be malformed.");
            }
            return;
        }
    };

    report.ok("Found and parsed blender_manifest.toml");
    report.info(EXTENSION_INSTALL_PATH);

    let missing = manifest.missing_required();
    if missing.is_empty() {
        report.ok("Manifest has required base fields (id, version, name)");
    } else {
        report.error(format!(
            "Manifest missing required fields: {}",
            missing.join(", ")
        ));
    }

    let min = manifest.blender_version_min();
    match min {
        Some(value) => report.ok(format!("blender_version_min = {value}")),
        None => report.warning("Manifest missing blender_version_min"),
    }

    let max = manifest.blender_version_max();
    if let Some(value) = max {
        report.ok(format!("blender_version_max = {value}"));
    }

    if let Some(host) = host_version.filter(|h| !h.is_empty()) {
        check_host_version(report, host, min, max);
    }
}

fn check_host_version(
    report: &mut Report,
    host: &str,
    min: Option<&ManifestValue>,
    max: Option<&ManifestValue>,
) {
    let Some(current) = VersionTuple::parse(host) else {
        report.info(format!(
            "Could not parse current Blender version '{host}' for compatibility check."
        ));
        return;
    };

    report.info(format!("Current Blender version (for check): {host}"));

    let parse = |value: &ManifestValue| VersionTuple::parse(&value.to_string());

    if let Some(min) = min.and_then(parse)
        && current < min
    {
        report.error(
            "Current Blender version is lower than manifest blender_version_min; installation/runtime issues are likely.",
        );
    }

    if let Some(max) = max.and_then(parse)
        && current > max
    {
        report.warning(
            "Current Blender version is higher than manifest blender_version_max; addon may be unsupported.",
        );
    }
}
