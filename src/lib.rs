//! storegraph: Content-Addressed Dependency Graphs
//!
//! Builds the runtime dependency graph of a package store output and
//! annotates every node with its canonical content hash and the name and
//! version parsed from its store path. The root output additionally gets an
//! [`closure::ArtifactSummary`] carrying the digest of what it installs.
//!
//! - [`tree`] - NAR serialization and content hashing
//! - [`store`] - store path parsing and identity extraction
//! - [`graph`] - dependency graph model and graph sources
//! - [`enrich`] - concurrent per-node annotation
//! - [`artifact`] - installed artifact digests
//! - [`closure`] - end-to-end analysis of one output

pub mod artifact;
pub mod closure;
pub mod config;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use closure::{ArtifactSummary, ClosureAnalyzer, ClosureReport};
pub use enrich::{EnrichReport, GraphEnricher};
pub use error::{ClosureError, Result};
pub use types::{AppType, ArtifactDigest, NarHash};
