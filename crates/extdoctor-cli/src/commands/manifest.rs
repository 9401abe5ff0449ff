//! Manifest command implementation

use crate::cli::ManifestArgs;
use crate::error::add_archive_context;
use crate::error::convert_manifest_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use extdoctor_core::inspection::ArchiveInspector;
use extdoctor_core::inspection::MANIFEST_MARKER;
use extdoctor_core::read_manifest;

pub fn execute(args: &ManifestArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.limits.to_config();

    let mut inspector = add_archive_context(
        ArchiveInspector::open(&args.archive, &config),
        &args.archive,
    )?;

    let entry = inspector
        .find_suffix(MANIFEST_MARKER)
        .unwrap_or(MANIFEST_MARKER)
        .to_string();

    let manifest = read_manifest(&mut inspector, &config)
        .map_err(|e| convert_manifest_error(e, &args.archive))?;

    formatter.format_manifest(&args.archive, &entry, &manifest)
}
