use sha2::{Digest, Sha256};
use std::fs;
use storegraph::graph::{DependencyGraph, JsonGraphFile, StaticGraph};
use storegraph::tree::ContentHasher;
use storegraph::types::{ATTR_HASH, ATTR_NAME};
use storegraph::{AppType, ClosureAnalyzer, ClosureError};
use tempfile::TempDir;

use super::support::{quoted, FakeStore};

const BINARY: &[u8] = b"#!/bin/sh\necho mytool\n";

#[cfg(unix)]
#[test]
fn executable_output_summary() {
    let store = FakeStore::new();
    let target = store.add_executable("xyz123-mytool-1.2.3", "mytool", BINARY);
    store.add_library("def456-glibc-2.39");

    let work = TempDir::new().unwrap();
    let result = work.path().join("result");
    std::os::unix::fs::symlink(&target, &result).unwrap();

    let mut graph = DependencyGraph::new();
    graph.add_edge(quoted("xyz123-mytool-1.2.3"), quoted("def456-glibc-2.39"));

    let report = ClosureAnalyzer::new(store.dir())
        .analyze(&result, &StaticGraph::new(graph), None)
        .unwrap();

    let summary = &report.summary;
    assert_eq!(summary.version, "1.2.3");
    assert_eq!(summary.name, "mytool");
    assert_eq!(summary.app_type, AppType::Executable);
    assert_eq!(summary.content_digest, "xyz123");
    assert_eq!(summary.store_path, target);
    assert_eq!(
        summary.artifact_digest.as_ref().unwrap().as_str(),
        hex::encode(Sha256::digest(BINARY))
    );
    assert_eq!(
        summary.content_hash,
        ContentHasher::new().hash(&target).unwrap()
    );

    assert_eq!(report.enrichment.nodes, 2);
    let glibc = report.graph.node(&quoted("def456-glibc-2.39")).unwrap();
    assert_eq!(glibc.attr(ATTR_NAME), Some("glibc"));
    assert!(glibc.attr(ATTR_HASH).is_some());
}

#[test]
fn graph_loaded_from_json_file() {
    let store = FakeStore::new();
    let out = store.add_image("img000-service-3.1", "sha256:abc123");
    store.add_library("lib000-openssl-3.0.13");

    let work = TempDir::new().unwrap();
    let graph_file = work.path().join("graph.json");
    fs::write(
        &graph_file,
        r#"{"edges":[{"from":"\"img000-service-3.1\"","to":"\"lib000-openssl-3.0.13\""}]}"#,
    )
    .unwrap();

    let report = ClosureAnalyzer::new(store.dir())
        .analyze(&out, &JsonGraphFile::new(&graph_file), Some("service"))
        .unwrap();

    assert_eq!(report.summary.app_type, AppType::Container);
    assert_eq!(
        report.summary.artifact_digest.as_ref().unwrap().as_str(),
        "abc123"
    );
    assert_eq!(report.enrichment.identified, 2);
}

#[test]
fn unreadable_root_manifest_is_fatal() {
    let store = FakeStore::new();
    let out = store.dir().join("bad000-image-1.0");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("manifest.json"), "not json").unwrap();

    let err = ClosureAnalyzer::new(store.dir())
        .analyze(&out, &StaticGraph::new(DependencyGraph::new()), None)
        .unwrap_err();
    assert!(matches!(err, ClosureError::Manifest { .. }));
}

#[test]
fn missing_root_is_fatal() {
    let store = FakeStore::new();
    let err = ClosureAnalyzer::new(store.dir())
        .analyze(
            &store.dir().join("result"),
            &StaticGraph::new(DependencyGraph::new()),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, ClosureError::Symlink { .. }));
}

#[test]
fn summary_serializes_hashes_as_strings() {
    let store = FakeStore::new();
    let out = store.add_executable("xyz123-mytool-1.2.3", "mytool", BINARY);

    let summary = ClosureAnalyzer::new(store.dir()).summarize(&out).unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["app_type"], "executable");
    assert_eq!(value["content_hash"].as_str().unwrap().len(), 52);
    assert_eq!(value["artifact_digest"].as_str().unwrap().len(), 64);
}
