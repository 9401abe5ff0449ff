//! Human-readable output formatter with colors and styling.

use super::formatter::ArchiveDiagnosis;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use extdoctor_core::Finding;
use extdoctor_core::Level;
use extdoctor_core::Manifest;
use extdoctor_core::Outcome;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Icon for a finding level. Warnings share the error icon.
    fn icon(level: Level) -> &'static str {
        match level {
            Level::Error | Level::Warning => "✗",
            Level::Ok => "✓",
            Level::Info => "ℹ",
        }
    }

    fn format_finding(&self, finding: &Finding) -> String {
        if !self.use_colors {
            return format!("  [{}] {}", finding.level, finding.message);
        }

        let icon = Self::icon(finding.level);
        let icon = match finding.level {
            Level::Error => style(icon).red().bold(),
            Level::Warning => style(icon).yellow().bold(),
            Level::Ok => style(icon).green().bold(),
            Level::Info => style(icon).cyan(),
        };
        format!("  {icon} {}", finding.message)
    }

    fn format_banner(&self, outcome: Outcome) -> String {
        let banner = outcome.banner();
        if !self.use_colors {
            return banner.to_string();
        }

        match outcome {
            Outcome::Critical => style(banner).red().bold().to_string(),
            Outcome::Warnings => style(banner).yellow().bold().to_string(),
            Outcome::Clean => style(banner).green().bold().to_string(),
        }
    }

    fn format_header(&self, path: &Path) -> String {
        if self.use_colors {
            style(path.display()).bold().to_string()
        } else {
            path.display().to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_diagnoses(&self, diagnoses: &[ArchiveDiagnosis]) -> Result<()> {
        for (i, diagnosis) in diagnoses.iter().enumerate() {
            let findings = diagnosis
                .report
                .findings()
                .iter()
                .filter(|f| !self.quiet || f.level == Level::Error);

            if self.quiet {
                // Always show errors, even in quiet mode
                for finding in findings {
                    let _ = self.term.write_line(&format!(
                        "{}: {}",
                        diagnosis.path.display(),
                        finding.message
                    ));
                }
                continue;
            }

            if i > 0 {
                let _ = self.term.write_line("");
            }
            let _ = self.term.write_line(&self.format_header(&diagnosis.path));
            for finding in findings {
                let _ = self.term.write_line(&self.format_finding(finding));
            }
            let _ = self
                .term
                .write_line(&self.format_banner(diagnosis.report.outcome()));

            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "  Findings: {} ({} errors, {} warnings), worst severity: {}",
                    diagnosis.report.len(),
                    diagnosis.report.count(Level::Error),
                    diagnosis.report.count(Level::Warning),
                    diagnosis.report.worst()
                ));
            }
        }

        if !self.quiet && diagnoses.len() > 1 {
            let critical = diagnoses
                .iter()
                .filter(|d| d.report.outcome() == Outcome::Critical)
                .count();
            let warnings = diagnoses
                .iter()
                .filter(|d| d.report.outcome() == Outcome::Warnings)
                .count();
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Diagnosed {} archives: {critical} with critical issues, {warnings} with warnings",
                diagnoses.len()
            ));
        }

        Ok(())
    }

    fn format_manifest(&self, archive: &Path, entry: &str, manifest: &Manifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("{} ({entry})", self.format_header(archive)));

        let known = [
            ("id", manifest.get("id")),
            ("version", manifest.get("version")),
            ("name", manifest.get("name")),
            ("blender_version_min", manifest.get("blender_version_min")),
            ("blender_version_max", manifest.get("blender_version_max")),
        ];
        for (key, value) in known {
            let value = value.map_or_else(|| "-".to_string(), ToString::to_string);
            let _ = self.term.write_line(&format!("  {key:<20} {value}"));
        }

        if self.verbose {
            for (key, value) in manifest.extra_fields() {
                let _ = self.term.write_line(&format!("  {key:<20} {value}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> HumanFormatter {
        HumanFormatter {
            verbose: false,
            quiet: false,
            use_colors: false,
            term: Term::stdout(),
        }
    }

    #[test]
    fn test_icons_by_level() {
        assert_eq!(HumanFormatter::icon(Level::Error), "✗");
        assert_eq!(HumanFormatter::icon(Level::Warning), "✗");
        assert_eq!(HumanFormatter::icon(Level::Ok), "✓");
        assert_eq!(HumanFormatter::icon(Level::Info), "ℹ");
    }

    #[test]
    fn test_plain_finding() {
        let finding = Finding::new(Level::Warning, "ZIP has multiple top-level folders/files");
        assert_eq!(
            plain().format_finding(&finding),
            "  [WARNING] ZIP has multiple top-level folders/files"
        );
    }

    #[test]
    fn test_plain_banner() {
        assert_eq!(
            plain().format_banner(Outcome::Warnings),
            "Diagnosis complete: warnings found"
        );
    }
}
