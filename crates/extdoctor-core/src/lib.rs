//! Install diagnostics for Blender extension and add-on ZIP packages.
//!
//! `extdoctor-core` inspects a candidate package archive without extracting
//! it and reports, as an ordered list of leveled findings, whether its layout
//! and embedded `blender_manifest.toml` make it installable, and why not when
//! they do not.
//!
//! # Examples
//!
//! ```no_run
//! use extdoctor_core::Outcome;
//! use extdoctor_core::diagnose_archive;
//!
//! let report = diagnose_archive("my_extension.zip", Some("4.2.0"));
//! for finding in report.findings() {
//!     println!("[{}] {}", finding.level, finding.message);
//! }
//! if report.outcome() == Outcome::Critical {
//!     eprintln!("{}", report.outcome().banner());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod diagnosis;
pub mod error;
pub mod inspection;
pub mod manifest;
pub mod report;
#[doc(hidden)]
pub mod test_utils;
pub mod version;

// Re-export main API types
pub use config::DiagnosisConfig;
pub use diagnosis::diagnose_archive;
pub use diagnosis::diagnose_archive_with_config;
pub use error::DiagnosisError;
pub use error::QuotaResource;
pub use error::Result;
pub use manifest::Manifest;
pub use manifest::ManifestError;
pub use manifest::ManifestValue;
pub use manifest::read_manifest;
pub use report::Finding;
pub use report::Level;
pub use report::Outcome;
pub use report::Report;
pub use report::worst;
pub use version::VersionComponent;
pub use version::VersionTuple;
pub use version::compare;
pub use version::parse_version;
