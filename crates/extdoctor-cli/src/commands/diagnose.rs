//! Diagnose command implementation

use crate::cli::DiagnoseArgs;
use crate::output::ArchiveDiagnosis;
use crate::output::OutputFormatter;
use crate::progress::BatchProgress;
use anyhow::Result;
use anyhow::bail;
use extdoctor_core::DiagnosisConfig;
use extdoctor_core::Outcome;
use extdoctor_core::diagnose_archive_with_config;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

pub fn execute(
    args: &DiagnoseArgs,
    formatter: &dyn OutputFormatter,
    suppress_progress: bool,
) -> Result<()> {
    let config = args.limits.to_config();
    let host = args.blender_version.as_deref();
    tracing::debug!(archives = args.archives.len(), host = host.unwrap_or("-"), "starting diagnosis");

    let show_progress =
        args.archives.len() > 1 && !suppress_progress && BatchProgress::should_show();
    let progress = show_progress.then(|| BatchProgress::new(args.archives.len()));

    let diagnoses = diagnose_all(&args.archives, host, &config, progress.as_ref());
    drop(progress);

    formatter.format_diagnoses(&diagnoses)?;

    let critical = diagnoses
        .iter()
        .filter(|d| d.report.outcome() == Outcome::Critical)
        .count();
    if critical > 0 {
        bail!("archive diagnosis found critical issues in {critical} archive(s)");
    }

    if args.strict
        && diagnoses
            .iter()
            .any(|d| d.report.outcome() == Outcome::Warnings)
    {
        bail!("archive diagnosis found warnings (--strict)");
    }

    Ok(())
}

/// Diagnoses every archive, keeping input order in the result.
///
/// Archives are spread over scoped worker threads; each diagnosis is
/// independent and shares nothing but the read-only config.
fn diagnose_all(
    archives: &[PathBuf],
    host: Option<&str>,
    config: &DiagnosisConfig,
    progress: Option<&BatchProgress>,
) -> Vec<ArchiveDiagnosis> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_size = archives.len().div_ceil(workers).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = archives
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| {
                            let report = diagnose_archive_with_config(path, host, config);
                            if let Some(progress) = progress {
                                progress.archive_done(path);
                            }
                            ArchiveDiagnosis {
                                path: path.clone(),
                                report,
                            }
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}
