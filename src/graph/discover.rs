//! Graph sources
//!
//! Discovering the dependency graph is the caller's business; closure
//! analysis only asks a [`GraphDiscoverer`] for it.

use super::DependencyGraph;
use crate::error::{ClosureError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the dependency graph for a build output.
pub trait GraphDiscoverer {
    fn discover(&self, output: &Path) -> Result<DependencyGraph>;
}

/// Hands out a graph that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticGraph(DependencyGraph);

impl StaticGraph {
    pub fn new(graph: DependencyGraph) -> Self {
        Self(graph)
    }
}

impl GraphDiscoverer for StaticGraph {
    fn discover(&self, _output: &Path) -> Result<DependencyGraph> {
        Ok(self.0.clone())
    }
}

/// Loads a graph that an external tool already wrote out as JSON.
#[derive(Debug, Clone)]
pub struct JsonGraphFile {
    path: PathBuf,
}

impl JsonGraphFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphDiscoverer for JsonGraphFile {
    fn discover(&self, _output: &Path) -> Result<DependencyGraph> {
        let bytes = fs::read(&self.path).map_err(|e| ClosureError::io(&self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClosureError::Discovery(format!("{}: {}", self.path.display(), e))
        })
    }
}
