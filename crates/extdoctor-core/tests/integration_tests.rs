//! Integration tests for extdoctor-core.
//!
//! These tests diagnose real archives written to a temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use extdoctor_core::Level;
use extdoctor_core::Outcome;
use extdoctor_core::Report;
use extdoctor_core::diagnose_archive;
use extdoctor_core::test_utils::ZipTestBuilder;
use tempfile::TempDir;

const COMPLETE_MANIFEST: &[u8] =
    b"id = \"a\"\nname = \"A\"\nversion = \"1.0.0\"\nblender_version_min = \"4.2.0\"\n";

fn messages(report: &Report) -> Vec<&str> {
    report.findings().iter().map(|f| f.message.as_str()).collect()
}

#[test]
fn test_invalid_paths_yield_single_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.zip");

    for report in [
        diagnose_archive("", None),
        diagnose_archive(&missing, None),
        diagnose_archive(temp.path(), None),
    ] {
        assert_eq!(report.len(), 1, "{:?}", messages(&report));
        assert_eq!(report.findings()[0].level, Level::Error);
    }
}

#[test]
fn test_well_formed_extension_is_clean() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .deflated()
        .add_file("blender_manifest.toml", COMPLETE_MANIFEST)
        .add_file("operators.py", b"pass\n")
        .write_to(temp.path(), "my_extension-1.0.0.zip");

    let report = diagnose_archive(&path, Some("4.2.0"));
    assert!(report.worst() <= Level::Ok.severity(), "{:?}", messages(&report));
    assert_eq!(report.outcome(), Outcome::Clean);
    assert_eq!(
        messages(&report),
        [
            "Extension packaging depth looks installable",
            "Found and parsed blender_manifest.toml",
            "Recommended install path: Edit > Preferences > Extensions > Install from Disk (extension package).",
            "Manifest has required base fields (id, version, name)",
            "blender_version_min = 4.2.0",
            "Current Blender version (for check): 4.2.0",
        ]
    );
}

#[test]
fn test_manifest_one_level_deep() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_directory("my_ext/")
        .add_file("my_ext/blender_manifest.toml", COMPLETE_MANIFEST)
        .write_to(temp.path(), "my_ext.zip");

    let report = diagnose_archive(&path, None);
    assert!(report.has(Level::Warning, "not at ZIP root"));
    assert!(!report.has(Level::Ok, "packaging depth"));
    assert!(report.has(Level::Ok, "Found and parsed blender_manifest.toml"));
}

#[test]
fn test_source_archive_with_deeply_nested_manifest() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("repo-main/addon/blender_manifest.toml", COMPLETE_MANIFEST)
        .add_file("repo-main/addon/code.py", b"pass\n")
        .write_to(temp.path(), "repo-main.zip");

    let report = diagnose_archive(&path, None);
    assert!(report.has(Level::Warning, "nested too deep"));
    assert!(report.has(Level::Info, "repo-main/addon"));
    assert!(report.has(Level::Info, "This looks like a source archive"));
}

#[test]
fn test_top_level_legacy_marker_recommends_legacy_install() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("__init__.py", b"bl_info = {}\n")
        .write_to(temp.path(), "addon.zip");

    let report = diagnose_archive(&path, None);
    assert!(report.has(Level::Info, "Add-ons > Install from Disk"));
    assert!(!report.has(Level::Warning, "nested too deep"));
    assert!(report.has(Level::Ok, "Legacy add-on packaging depth looks installable"));
}

#[test]
fn test_legacy_addon_folder_recommends_legacy_install() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("my_addon/__init__.py", b"bl_info = {}\n")
        .write_to(temp.path(), "my_addon.zip");

    let report = diagnose_archive(&path, None);
    assert_eq!(
        messages(&report),
        [
            "Legacy add-on packaging depth looks installable",
            "Extension manifest issue: No blender_manifest.toml found",
            "Recommended install path: Edit > Preferences > Add-ons > Install from Disk (legacy add-on).",
        ]
    );
    assert_eq!(report.outcome(), Outcome::Warnings);
}

#[test]
fn test_no_markers_plain_name() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("docs/readme.md", b"# docs\n")
        .write_to(temp.path(), "docs.zip");

    let report = diagnose_archive(&path, None);
    assert_eq!(report.count(Level::Error), 1);
    assert!(report.has(Level::Error, "Could not find blender_manifest.toml or __init__.py"));
    assert!(!report.has(Level::Info, "Likely a repository source ZIP"));
}

#[test]
fn test_no_markers_source_name() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("tool-master/readme.md", b"# docs\n")
        .write_to(temp.path(), "tool-master.zip");

    let report = diagnose_archive(&path, None);
    assert_eq!(report.count(Level::Error), 1);
    assert!(report.has(Level::Info, "Likely a repository source ZIP"));
}

#[test]
fn test_multiple_addon_roots() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("first/__init__.py", b"")
        .add_file("second/__init__.py", b"")
        .write_to(temp.path(), "bundle.zip");

    let report = diagnose_archive(&path, None);
    assert!(report.has(Level::Warning, "Multiple add-on roots detected"));
    assert!(report.has(Level::Info, "Add-on root candidate(s): first, second"));
    assert!(report.has(Level::Warning, "multiple top-level folders/files"));
    assert_eq!(
        report.findings()[0].message,
        "Multiple add-on roots detected (__init__.py in multiple folders). Install may fail or install the wrong package."
    );
}

#[test]
fn test_host_version_below_minimum() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file(
            "blender_manifest.toml",
            b"id = \"a\"\nname = \"A\"\nversion = \"1.0.0\"\nblender_version_min = \"5.1.0\"\n",
        )
        .write_to(temp.path(), "ext.zip");

    let report = diagnose_archive(&path, Some("5.0.1"));
    assert!(report.has(
        Level::Error,
        "Current Blender version is lower than manifest blender_version_min"
    ));
    assert_eq!(report.outcome(), Outcome::Critical);
}

#[test]
fn test_unparsable_manifest_is_soft_failure() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("blender_manifest.toml", b"id = = broken\n")
        .add_file("__init__.py", b"")
        .write_to(temp.path(), "ext.zip");

    let report = diagnose_archive(&path, Some("4.2"));
    assert!(report.has(Level::Warning, "Extension manifest issue: Manifest parse error: "));
    assert!(report.has(Level::Warning, "Both extension manifest and legacy __init__.py detected"));
    assert!(report.has(Level::Info, "Add-ons > Install from Disk"));
    assert!(!report.has(Level::Info, "Current Blender version"));
}

#[test]
fn test_report_is_never_empty() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_directory("empty_dir/")
        .write_to(temp.path(), "dirs.zip");

    let report = diagnose_archive(&path, None);
    assert!(!report.is_empty());
}

#[test]
fn test_diagnosis_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("a/blender_manifest.toml", COMPLETE_MANIFEST)
        .add_file("b/blender_manifest.toml", b"name = \"B\"\n")
        .add_file("b/__init__.py", b"")
        .write_to(temp.path(), "archive.zip");

    let first = diagnose_archive(&path, Some("4.1"));
    let second = diagnose_archive(&path, Some("4.1"));
    assert_eq!(first, second);
    assert!(first.has(Level::Warning, "Multiple extension manifests detected"));
}

#[test]
fn test_concurrent_diagnosis() {
    let temp = TempDir::new().unwrap();
    let path = ZipTestBuilder::new()
        .add_file("blender_manifest.toml", COMPLETE_MANIFEST)
        .write_to(temp.path(), "ext.zip");

    let expected = diagnose_archive(&path, None);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| diagnose_archive(&path, None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
