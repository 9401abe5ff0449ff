//! Error types for archive inspection.

use thiserror::Error;

/// Result type alias using `DiagnosisError`.
pub type Result<T> = std::result::Result<T, DiagnosisError>;

/// Represents a specific inspection limit that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// The archive lists more entries than allowed.
    EntryCount {
        /// Number of entries in the archive.
        current: usize,
        /// Maximum allowed entry count.
        max: usize,
    },
    /// A single entry is larger than allowed.
    EntrySize {
        /// Declared uncompressed size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryCount { current, max } => {
                write!(f, "entry count ({current} > {max})")
            }
            Self::EntrySize { size, max } => {
                write!(f, "entry size ({size} > {max} bytes)")
            }
        }
    }
}

/// Errors raised while opening or reading a candidate archive.
///
/// These never escape [`diagnose_archive`](crate::diagnose_archive): the rule
/// engine converts each of them into a finding.
#[derive(Error, Debug)]
pub enum DiagnosisError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive container is corrupted or not a ZIP at all.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive could be opened but a read failed for another reason.
    #[error("read failure: {0}")]
    ReadFailure(String),

    /// An inspection limit was exceeded.
    #[error("limit exceeded: {resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },
}

impl DiagnosisError {
    /// Returns `true` if the archive container itself is unreadable or
    /// corrupt.
    ///
    /// # Examples
    ///
    /// ```
    /// use extdoctor_core::DiagnosisError;
    ///
    /// let err = DiagnosisError::InvalidArchive("missing end of central directory".into());
    /// assert!(err.is_invalid_archive());
    ///
    /// let err = DiagnosisError::ReadFailure("interrupted".into());
    /// assert!(!err.is_invalid_archive());
    /// ```
    #[must_use]
    pub const fn is_invalid_archive(&self) -> bool {
        matches!(self, Self::InvalidArchive(_))
    }

    /// Returns the limit that was exceeded, if applicable.
    #[must_use]
    pub const fn quota_resource(&self) -> Option<&QuotaResource> {
        match self {
            Self::QuotaExceeded { resource } => Some(resource),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for DiagnosisError {
    fn from(err: zip::result::ZipError) -> Self {
        use zip::result::ZipError;

        match err {
            ZipError::Io(io) => Self::Io(io),
            ZipError::InvalidArchive(reason) => Self::InvalidArchive(reason.to_string()),
            ZipError::UnsupportedArchive(reason) => Self::InvalidArchive(reason.to_string()),
            other => Self::ReadFailure(other.to_string()),
        }
    }
}
