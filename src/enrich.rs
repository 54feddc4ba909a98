//! Graph Enrichment
//!
//! Annotates every node of a dependency graph with its content hash, name
//! and version. Each node is handled by its own task holding exclusive
//! access to that node only, so attribute writes need no locking; the
//! caller gets the graph back once every task has been joined.
//!
//! Per-node failures, including a panicking node task, are logged and the
//! affected attributes are skipped. They never fail the batch.

use crate::graph::{label_to_path, normalize_label, DependencyGraph, GraphNode};
use crate::store::IdentityParser;
use crate::tree::ContentHasher;
use crate::types::{ATTR_HASH, ATTR_NAME, ATTR_VERSION};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Counts of what an enrichment pass managed to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichReport {
    /// Nodes visited
    pub nodes: usize,
    /// Nodes that received a `hash` attribute
    pub hashed: usize,
    /// Nodes that received `name` and `version` attributes
    pub identified: usize,
}

impl EnrichReport {
    fn record(&mut self, outcome: NodeOutcome) {
        self.nodes += 1;
        self.hashed += usize::from(outcome.hashed);
        self.identified += usize::from(outcome.identified);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeOutcome {
    hashed: bool,
    identified: bool,
}

/// Fans hashing and identity parsing out over graph nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphEnricher {
    hasher: ContentHasher,
    parser: IdentityParser,
}

impl GraphEnricher {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self::with_parts(ContentHasher::new(), IdentityParser::new(store_dir))
    }

    pub fn with_parts(hasher: ContentHasher, parser: IdentityParser) -> Self {
        Self { hasher, parser }
    }

    /// Enrich `graph` in place using one scoped thread per node.
    pub fn enrich(&self, graph: &mut DependencyGraph) -> EnrichReport {
        let report = annotate_in_place(graph, |node| self.annotate(node));
        log_report(&report);
        report
    }

    /// Enrich an owned graph on the tokio blocking pool and hand it back.
    ///
    /// Node order is preserved. A node whose task panics is returned as it
    /// was given, without new attributes.
    pub async fn enrich_async(&self, graph: DependencyGraph) -> (DependencyGraph, EnrichReport) {
        let enricher = self.clone();
        let (graph, report) =
            annotate_on_blocking_pool(graph, move |node| enricher.annotate(node)).await;
        log_report(&report);
        (graph, report)
    }

    fn annotate(&self, node: &mut GraphNode) -> NodeOutcome {
        let label = normalize_label(node.id());
        let path = label_to_path(&label, self.parser.store_dir());
        let mut outcome = NodeOutcome::default();

        match self.hasher.hash(&path) {
            Ok(hash) => {
                node.set_attr(ATTR_HASH, hash.to_string());
                outcome.hashed = true;
            }
            Err(err) => {
                warn!(node = %label, error = %err, "Skipping content hash");
            }
        }

        match self.parser.parse(&path) {
            Ok(identity) => {
                node.set_attr(ATTR_NAME, identity.name);
                node.set_attr(ATTR_VERSION, identity.version);
                outcome.identified = true;
            }
            Err(err) => {
                warn!(node = %label, error = %err, "Skipping identity");
            }
        }

        debug!(
            node = %label,
            hashed = outcome.hashed,
            identified = outcome.identified,
            "Annotated node"
        );
        outcome
    }
}

fn annotate_in_place<F>(graph: &mut DependencyGraph, annotate: F) -> EnrichReport
where
    F: Fn(&mut GraphNode) -> NodeOutcome + Sync,
{
    let annotate = &annotate;
    let outcomes: Vec<NodeOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = graph
            .nodes_mut()
            .iter_mut()
            .map(|node| {
                let id = node.id().to_string();
                (id, scope.spawn(move || annotate(node)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(id, handle)| {
                handle.join().unwrap_or_else(|_| {
                    warn!(node = %id, "Node task panicked");
                    NodeOutcome::default()
                })
            })
            .collect()
    });

    let mut report = EnrichReport::default();
    for outcome in outcomes {
        report.record(outcome);
    }
    report
}

async fn annotate_on_blocking_pool<F>(
    mut graph: DependencyGraph,
    annotate: F,
) -> (DependencyGraph, EnrichReport)
where
    F: Fn(&mut GraphNode) -> NodeOutcome + Send + Sync + 'static,
{
    let originals = graph.take_nodes();
    let annotate = Arc::new(annotate);

    let mut tasks = JoinSet::new();
    for (pos, mut node) in originals.iter().cloned().enumerate() {
        let annotate = Arc::clone(&annotate);
        tasks.spawn_blocking(move || {
            let outcome = (*annotate)(&mut node);
            (pos, node, outcome)
        });
    }

    let mut slots: Vec<Option<GraphNode>> = vec![None; originals.len()];
    let mut report = EnrichReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((pos, node, outcome)) => {
                report.record(outcome);
                slots[pos] = Some(node);
            }
            Err(err) => {
                warn!(error = %err, "Node task failed");
                report.record(NodeOutcome::default());
            }
        }
    }

    let nodes = slots
        .into_iter()
        .zip(originals)
        .map(|(slot, original)| slot.unwrap_or(original))
        .collect();
    graph.restore_nodes(nodes);
    (graph, report)
}

fn log_report(report: &EnrichReport) {
    info!(
        nodes = report.nodes,
        hashed = report.hashed,
        identified = report.identified,
        "Enriched dependency graph"
    );
}
