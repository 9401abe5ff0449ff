//! Diagnosis benchmarks for extdoctor.
//!
//! Measures end-to-end diagnosis of generated archives:
//! - Small extension package (manifest at root)
//! - Large legacy add-on with many entries
//! - Marker analysis over an in-memory entry list

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use extdoctor_core::diagnose_archive;
use extdoctor_core::inspection::MarkerSites;
use extdoctor_core::test_utils::ZipTestBuilder;
use std::hint::black_box;
use tempfile::TempDir;

const MANIFEST: &[u8] =
    b"id = \"bench\"\nname = \"Bench\"\nversion = \"1.0.0\"\nblender_version_min = \"4.2.0\"\n";

fn benchmark_diagnosis(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagnosis");
    let temp = TempDir::new().unwrap();

    let small = ZipTestBuilder::new()
        .deflated()
        .add_file("blender_manifest.toml", MANIFEST)
        .add_file("__init__.py", b"")
        .write_to(temp.path(), "small.zip");

    group.bench_function("small_extension", |b| {
        b.iter(|| diagnose_archive(black_box(&small), black_box(Some("4.2.0"))));
    });

    let large = (0..2_000)
        .fold(
            ZipTestBuilder::new().add_file("addon/__init__.py", b"bl_info = {}"),
            |builder, i| builder.add_file(&format!("addon/module_{i}/data.py"), b"pass"),
        )
        .write_to(temp.path(), "large.zip");

    group.bench_function("large_legacy_addon", |b| {
        b.iter(|| diagnose_archive(black_box(&large), None));
    });

    group.finish();
}

fn benchmark_marker_analysis(c: &mut Criterion) {
    let names: Vec<String> = (0..10_000)
        .map(|i| format!("pkg/sub_{}/file_{i}.py", i % 50))
        .chain(std::iter::once("pkg/__init__.py".to_string()))
        .collect();

    c.bench_function("marker_sites_10k", |b| {
        b.iter(|| MarkerSites::locate(black_box(&names), "__init__.py"));
    });
}

criterion_group!(benches, benchmark_diagnosis, benchmark_marker_analysis);
criterion_main!(benches);
