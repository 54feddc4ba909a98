use storegraph::graph::DependencyGraph;
use storegraph::types::{ATTR_HASH, ATTR_NAME, ATTR_VERSION};
use storegraph::GraphEnricher;

use super::support::{quoted, FakeStore};

const NODE_COUNT: usize = 12;
const MISSING: usize = 5;

fn store_with_graph() -> (FakeStore, DependencyGraph) {
    let store = FakeStore::new();
    let mut graph = DependencyGraph::new();
    let root = "r00t-app-1.0";
    store.add_executable(root, "app", b"app");
    graph.add_node(quoted(root));

    for i in 1..NODE_COUNT {
        let base = format!("h{i:03}-dep{i}-0.{i}");
        if i != MISSING {
            store.add_library(&base);
        }
        graph.add_edge(quoted(root), quoted(&base));
    }
    (store, graph)
}

#[test]
fn missing_node_is_skipped_without_failing() {
    let (store, mut graph) = store_with_graph();
    let report = GraphEnricher::new(store.dir()).enrich(&mut graph);

    assert_eq!(report.nodes, NODE_COUNT);
    assert_eq!(report.hashed, NODE_COUNT - 1);
    assert_eq!(report.identified, NODE_COUNT - 1);

    let missing = quoted(&format!("h{MISSING:03}-dep{MISSING}-0.{MISSING}"));
    for node in graph.nodes() {
        if node.id() == missing {
            assert!(node.attr(ATTR_HASH).is_none());
            assert!(node.attr(ATTR_NAME).is_none());
            assert!(node.attr(ATTR_VERSION).is_none());
        } else {
            assert!(node.attr(ATTR_HASH).is_some(), "{} lacks hash", node.id());
            assert!(node.attr(ATTR_NAME).is_some(), "{} lacks name", node.id());
            assert!(node.attr(ATTR_VERSION).is_some(), "{} lacks version", node.id());
        }
    }
}

#[test]
fn structure_is_untouched() {
    let (store, graph) = store_with_graph();
    let mut enriched = graph.clone();
    GraphEnricher::new(store.dir()).enrich(&mut enriched);

    assert_eq!(enriched.len(), graph.len());
    assert_eq!(enriched.edges(), graph.edges());
    let ids: Vec<_> = enriched.nodes().iter().map(|n| n.id()).collect();
    let original: Vec<_> = graph.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(ids, original);
}

#[test]
fn escaped_absolute_labels_resolve() {
    let store = FakeStore::new();
    let path = store.add_library("abc-zlib-1.3");
    let label = format!("\\\"{}\\\"", path.display());

    let mut graph = DependencyGraph::new();
    graph.add_node(label.clone());
    GraphEnricher::new("/nonexistent-store").enrich(&mut graph);

    let node = graph.node(&label).unwrap();
    assert_eq!(node.attr(ATTR_NAME), Some("zlib"));
    assert_eq!(node.attr(ATTR_VERSION), Some("1.3"));
}

#[test]
fn existing_attributes_are_preserved() {
    let (store, mut graph) = store_with_graph();
    graph.nodes_mut()[0].set_attr("label", "root");
    GraphEnricher::new(store.dir()).enrich(&mut graph);
    assert_eq!(graph.nodes()[0].attr("label"), Some("root"));
    assert_eq!(graph.nodes()[0].attr(ATTR_NAME), Some("app"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_enrichment_keeps_node_order() {
    let (store, graph) = store_with_graph();
    let order: Vec<String> = graph.nodes().iter().map(|n| n.id().to_string()).collect();

    let (enriched, report) = GraphEnricher::new(store.dir())
        .enrich_async(graph)
        .await;

    assert_eq!(report.hashed, NODE_COUNT - 1);
    let enriched_order: Vec<String> = enriched.nodes().iter().map(|n| n.id().to_string()).collect();
    assert_eq!(enriched_order, order);
}
