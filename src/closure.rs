//! Closure Analysis
//!
//! Ties the pieces together for one build output: resolve the output link,
//! identify and hash the store path it points at, obtain the dependency
//! graph from the caller's discoverer, enrich it, and digest the installed
//! artifact.
//!
//! Failures on the root output are fatal. Failures on individual graph
//! nodes only leave those nodes without attributes.

use crate::artifact::ArtifactDigestResolver;
use crate::enrich::{EnrichReport, GraphEnricher};
use crate::error::{ClosureError, Result};
use crate::graph::{DependencyGraph, GraphDiscoverer};
use crate::store::IdentityParser;
use crate::tree::ContentHasher;
use crate::types::{AppType, ArtifactDigest, NarHash};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Identity and digests of the root build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSummary {
    pub name: String,
    pub version: String,
    pub app_type: AppType,
    /// Canonical tree hash of the resolved store path
    pub content_hash: NarHash,
    /// Digest of the installed binary or image config; `None` when the
    /// output has no recognized shape
    pub artifact_digest: Option<ArtifactDigest>,
    /// Store path the output resolved to
    pub store_path: PathBuf,
    /// Digest segment of the store path name
    pub content_digest: String,
}

/// Everything produced for one output.
#[derive(Debug, Clone, Serialize)]
pub struct ClosureReport {
    pub summary: ArtifactSummary,
    pub graph: DependencyGraph,
    pub enrichment: EnrichReport,
}

/// Analyzes build outputs against one store.
#[derive(Debug, Clone)]
pub struct ClosureAnalyzer {
    hasher: ContentHasher,
    parser: IdentityParser,
    enricher: GraphEnricher,
    resolver: ArtifactDigestResolver,
}

impl ClosureAnalyzer {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        let store_dir = store_dir.into();
        let hasher = ContentHasher::new();
        let parser = IdentityParser::new(store_dir);
        Self {
            hasher,
            enricher: GraphEnricher::with_parts(hasher, parser.clone()),
            parser,
            resolver: ArtifactDigestResolver::new(),
        }
    }

    /// Summarize the store path behind `output` without touching the graph.
    pub fn summarize(&self, output: &Path) -> Result<ArtifactSummary> {
        let store_path = resolve_output(output)?;
        debug!(output = %output.display(), store_path = %store_path.display(), "Resolved output");

        let content_hash = self.hasher.hash(&store_path)?;
        let identity = self.parser.parse(&store_path)?;
        let artifact_digest = self.resolver.resolve(&store_path)?;

        Ok(ArtifactSummary {
            name: identity.name,
            version: identity.version,
            app_type: identity.app_type,
            content_hash,
            artifact_digest,
            store_path,
            content_digest: identity.content_digest,
        })
    }

    /// Full analysis of `output`.
    ///
    /// `name` replaces the name parsed from the store path when given.
    pub fn analyze(
        &self,
        output: &Path,
        discoverer: &dyn GraphDiscoverer,
        name: Option<&str>,
    ) -> Result<ClosureReport> {
        let mut summary = self.summarize(output)?;
        if let Some(name) = name {
            summary.name = name.to_string();
        }

        let mut graph = discoverer.discover(output)?;
        let enrichment = self.enricher.enrich(&mut graph);

        info!(
            name = %summary.name,
            version = %summary.version,
            app_type = %summary.app_type,
            nodes = enrichment.nodes,
            "Analyzed closure"
        );

        Ok(ClosureReport {
            summary,
            graph,
            enrichment,
        })
    }
}

/// Follow `output` one level if it is a symlink (the usual `result` link);
/// relative targets resolve against the link's directory.
pub fn resolve_output(output: &Path) -> Result<PathBuf> {
    let metadata = fs::symlink_metadata(output).map_err(|source| ClosureError::Symlink {
        path: output.to_path_buf(),
        source,
    })?;
    if !metadata.file_type().is_symlink() {
        return Ok(output.to_path_buf());
    }

    let target = fs::read_link(output).map_err(|source| ClosureError::Symlink {
        path: output.to_path_buf(),
        source,
    })?;
    if target.is_absolute() {
        return Ok(target);
    }
    Ok(output
        .parent()
        .map(|parent| parent.join(&target))
        .unwrap_or(target))
}
