//! Test utilities for building candidate archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed.
///
/// # Examples
///
/// ```
/// use extdoctor_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("addon/__init__.py", b"bl_info = {}".as_slice())]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for ZIP test archives with files, directories and compression.
///
/// # Examples
///
/// ```
/// use extdoctor_core::test_utils::ZipTestBuilder;
///
/// let dir = std::env::temp_dir();
/// let path = ZipTestBuilder::new()
///     .add_directory("addon/")
///     .add_file("addon/__init__.py", b"bl_info = {}")
///     .write_to(&dir, "doc-example-addon.zip");
/// assert!(path.exists());
/// # std::fs::remove_file(path).unwrap();
/// ```
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder storing entries uncompressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored)
                .unix_permissions(0o644),
        }
    }

    /// Switches subsequent entries to deflate compression.
    #[must_use]
    pub fn deflated(mut self) -> Self {
        self.options = self
            .options
            .compression_method(zip::CompressionMethod::Deflated);
        self
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        self.writer.start_file(path, self.options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        self.writer.add_directory(path, self.options).unwrap();
        self
    }

    /// Builds the archive and returns the raw bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `dir/name`, returning the path.
    pub fn write_to(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes an archive with the given entries to `dir/name`.
pub fn write_test_zip(dir: &Path, name: &str, entries: Vec<(&str, &[u8])>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, create_test_zip(entries)).unwrap();
    path
}
