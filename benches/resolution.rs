//! Benchmarks for support resolution
//!
//! This benchmark measures:
//! - Descriptor parsing and flattening
//! - Member resolution against a live namespace
//! - Version comparison

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::sync::Arc;
use webext_compat::{
    AddressingMode, BridgeConfig, InvocationBridge, RuntimeIdentity, StaticNamespace,
    SupportDescriptor, SupportResolver, VersionComparator,
};

const AREAS: &[&str] = &["tabs", "runtime", "storage", "alarms", "permissions", "windows"];
const MEMBERS: &[&str] = &["query", "get", "create", "update", "remove", "onChanged", "onUpdated"];

fn descriptor_json() -> String {
    let mut root = serde_json::Map::new();
    for area in AREAS {
        let mut members = serde_json::Map::new();
        for (i, member) in MEMBERS.iter().enumerate() {
            members.insert(
                member.to_string(),
                json!({ "__compat": { "support": {
                    "chrome": { "version_added": format!("{}", 20 + i) },
                    "firefox": [{ "version_added": format!("{}.0", 45 + i) }, { "version_added": false }],
                    "safari": { "version_added": i % 2 == 0 }
                } } }),
            );
        }
        root.insert(area.to_string(), serde_json::Value::Object(members));
    }
    serde_json::Value::Object(root).to_string()
}

fn live_namespace() -> StaticNamespace {
    let ns = StaticNamespace::new();
    for area in AREAS {
        for member in &MEMBERS[..4] {
            ns.insert_function(&format!("{}.{}", area, member), |_| Ok(json!(null).into()));
        }
    }
    ns
}

fn bench_descriptor_parsing(c: &mut Criterion) {
    let content = descriptor_json();
    let mut group = c.benchmark_group("descriptor_parsing");
    group.throughput(Throughput::Bytes(content.len() as u64));

    group.bench_function("json_parse_and_flatten", |b| {
        b.iter(|| SupportDescriptor::from_json_str(black_box(&content)))
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let descriptor = Arc::new(SupportDescriptor::from_json_str(&descriptor_json()).unwrap());
    let ns = live_namespace();
    let runtime = RuntimeIdentity::builder("firefox")
        .version("50.1")
        .namespace(ns.into_arc())
        .build();

    let default = SupportResolver::new(descriptor.clone());
    let strict = SupportResolver::new(descriptor.clone())
        .with_config(&BridgeConfig::new().with_strict_descriptor(true));

    let mut group = c.benchmark_group("resolution");
    for member in ["query", "onUpdated", "onChanged.addListener"] {
        group.bench_with_input(BenchmarkId::new("default", member), member, |b, m| {
            b.iter(|| default.resolve("tabs", black_box(m), &runtime, AddressingMode::Prefixed))
        });
        group.bench_with_input(BenchmarkId::new("strict", member), member, |b, m| {
            b.iter(|| strict.resolve("tabs", black_box(m), &runtime, AddressingMode::Prefixed))
        });
    }
    group.bench_function("check_static", |b| {
        b.iter(|| default.check_static("storage", black_box("remove"), &runtime))
    });
    group.finish();

    let bridge = InvocationBridge::new("tabs", descriptor, runtime.clone());
    c.bench_function("bridge_call", |b| {
        b.iter(|| bridge.call(black_box("query"), vec![]))
    });
}

fn bench_version_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_compare");
    for (a, b) in [("54.0", "56"), ("121.0.6167.85", "121.0.6167.184"), ("1.0a1", "1.0")] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{a} vs {b}")), &(a, b), |bench, (a, b)| {
            bench.iter(|| VersionComparator::compare(black_box(a), black_box(b)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_descriptor_parsing,
    bench_resolution,
    bench_version_compare
);
criterion_main!(benches);
