//! Archive structure inspection.
//!
//! This module opens candidate archives and answers structural questions
//! about them without extracting anything to disk.
//!
//! # Examples
//!
//! ```no_run
//! use extdoctor_core::DiagnosisConfig;
//! use extdoctor_core::inspection::ArchiveInspector;
//! use extdoctor_core::inspection::MANIFEST_MARKER;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let inspector = ArchiveInspector::open("extension.zip", &DiagnosisConfig::default())?;
//! let sites = inspector.marker_sites(MANIFEST_MARKER);
//! println!("manifest roots: {}", sites.display_roots());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod markers;

pub use archive::ArchiveInspector;
pub use markers::LEGACY_MARKER;
pub use markers::MANIFEST_MARKER;
pub use markers::MarkerSites;
pub use markers::TOP_LEVEL_ROOT;
pub use markers::format_roots;
pub use markers::marker_depths;
pub use markers::marker_roots;
pub use markers::top_level_names;
