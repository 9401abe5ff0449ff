//! Diagnosis findings and their aggregation.

use std::fmt;

/// Level of a single finding.
///
/// Ordered by severity: `Error` > `Warning` > `Ok` > `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Blocks installation.
    Error,
    /// Installation may fail or pick the wrong package.
    Warning,
    /// A check passed.
    Ok,
    /// Context or a recommendation.
    Info,
}

impl Level {
    /// Returns the severity rank used for worst-severity computation.
    ///
    /// # Examples
    ///
    /// ```
    /// use extdoctor_core::Level;
    ///
    /// assert_eq!(Level::Error.severity(), 3);
    /// assert_eq!(Level::Info.severity(), 0);
    /// ```
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Error => 3,
            Self::Warning => 2,
            Self::Ok => 1,
            Self::Info => 0,
        }
    }

    /// Returns the upper-case level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Ok => "OK",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leveled diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity level.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Coarse summary of a report, used to pick a status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one `Error` finding.
    Critical,
    /// Worst finding is a `Warning`.
    Warnings,
    /// Only `Ok` and `Info` findings.
    Clean,
}

impl Outcome {
    /// Maps a worst-severity rank to an outcome.
    #[must_use]
    pub const fn from_severity(worst: u8) -> Self {
        match worst {
            3.. => Self::Critical,
            2 => Self::Warnings,
            _ => Self::Clean,
        }
    }

    /// Returns the banner text shown after a diagnosis.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Critical => "Diagnosis complete: critical issues found",
            Self::Warnings => "Diagnosis complete: warnings found",
            Self::Clean => "Diagnosis complete",
        }
    }
}

/// Ordered findings of one diagnosis run.
///
/// Order is emission order and is part of the contract: consumers render
/// findings top-to-bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding.
    pub fn add(&mut self, level: Level, message: impl Into<String>) {
        let finding = Finding::new(level, message);
        tracing::trace!(level = %finding.level, message = %finding.message, "finding");
        self.findings.push(finding);
    }

    /// Appends an `Error` finding.
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Level::Error, message);
    }

    /// Appends a `Warning` finding.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Level::Warning, message);
    }

    /// Appends an `Ok` finding.
    pub fn ok(&mut self, message: impl Into<String>) {
        self.add(Level::Ok, message);
    }

    /// Appends an `Info` finding.
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Level::Info, message);
    }

    /// Returns the findings in emission order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Returns the number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns whether no finding has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the maximum severity rank over all findings, 0 if empty.
    #[must_use]
    pub fn worst(&self) -> u8 {
        worst(self)
    }

    /// Returns the outcome derived from the worst severity.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_severity(self.worst())
    }

    /// Returns the number of findings at `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.findings.iter().filter(|f| f.level == level).count()
    }

    /// Returns whether any finding at `level` contains `needle`.
    #[must_use]
    pub fn has(&self, level: Level, needle: &str) -> bool {
        self.findings
            .iter()
            .any(|f| f.level == level && f.message.contains(needle))
    }
}

impl IntoIterator for Report {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

/// Returns the maximum severity rank in `report`, 0 if it is empty.
#[must_use]
pub fn worst(report: &Report) -> u8 {
    report
        .findings
        .iter()
        .map(|f| f.level.severity())
        .max()
        .unwrap_or(0)
}
