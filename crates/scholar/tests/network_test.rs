//! Integration tests for collaboration network building.

use std::sync::Arc;

use serde_json::{Value, json};

use scholar::network::{CancelToken, NetworkConfig};
use scholar::resolve::{MemoryIndex, MockCatalog};
use scholar::store::MemoryStore;
use scholar::{Scholar, ScholarConfig, ScholarError};

const SEED: &str = "A2764814280";
const WORKS_URL: &str = "https://api.openalex.org/works?filter=author.id:A2764814280";

fn coauthor(n: usize) -> String {
    format!("A50000000{:02}", n)
}

fn authorship(id: &str, name: &str) -> Value {
    json!({"author": {"id": format!("https://openalex.org/{}", id), "display_name": name}})
}

/// Twelve works and fifteen distinct co-authors:
/// coauthor 1 is on every work, coauthor 14 on the first two, and the rest
/// appear once each.
fn twelve_works() -> Vec<Value> {
    (0..12)
        .map(|i| {
            let mut authorships = vec![
                authorship(SEED, "Kaiming He"),
                authorship(&coauthor(1), "Ross Girshick"),
                authorship(&coauthor(i + 2), &format!("Coauthor {}", i + 2)),
            ];
            if i < 2 {
                authorships.push(authorship(&coauthor(14), "Piotr Dollár"));
            }
            if i == 0 {
                authorships.push(authorship(&coauthor(15), "Xiangyu Zhang"));
            }
            json!({
                "id": format!("https://openalex.org/W10{:02}", i),
                "title": format!("Paper {}", i),
                "display_name": format!("Paper {}", i),
                "authorships": authorships
            })
        })
        .collect()
}

fn seed_author() -> Value {
    json!({
        "id": format!("https://openalex.org/{}", SEED),
        "display_name": "Kaiming He",
        "works_api_url": WORKS_URL
    })
}

fn scholar(catalog: MockCatalog, network: NetworkConfig) -> (Arc<MockCatalog>, Scholar) {
    let catalog = Arc::new(catalog);
    let scholar = Scholar::with_backends(
        ScholarConfig {
            network,
            ..ScholarConfig::default()
        },
        Arc::new(MemoryIndex::new()),
        catalog.clone(),
        Arc::new(MemoryStore::new()),
    );
    (catalog, scholar)
}

// =============================================================================
// Graph Shape
// =============================================================================

#[test]
fn test_fifteen_coauthors_pruned_to_ten_edges() {
    let (_, scholar) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig::default(),
    );

    let graph = scholar.author_network(SEED).unwrap();

    assert_eq!(graph.edges.len(), 10);
    assert!((11..=15).contains(&graph.vertices.len()));
    assert!(graph.edges.windows(2).all(|w| w[0].weight >= w[1].weight));
    assert!(graph.edges.iter().all(|e| e.from == SEED && e.width == e.weight));

    // every vertex is the seed or an endpoint of a kept edge
    for vertex in &graph.vertices {
        assert!(vertex.id == SEED || graph.edges.iter().any(|e| e.to == vertex.id));
    }

    assert_eq!(graph.edges[0].to, coauthor(1));
    assert_eq!(graph.edges[0].weight, 12);
    assert_eq!(graph.edges[0].works.len(), 12);
    assert_eq!(graph.edges[0].works[0].id, "W1000");
    assert_eq!(graph.edges[0].works[0].title, "Paper 0");
    assert_eq!(graph.edges[1].to, coauthor(14));
    assert_eq!(graph.edges[1].weight, 2);
    // weight-1 ties keep discovery order
    assert_eq!(graph.edges[2].to, coauthor(2));
    assert_eq!(graph.edges[3].to, coauthor(15));
    assert_eq!(graph.edges[4].to, coauthor(3));
}

#[test]
fn test_vertex_labels() {
    let (_, scholar) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig::default(),
    );

    let graph = scholar.author_network(SEED).unwrap();
    let seed = graph.vertex(SEED).unwrap();
    assert_eq!(seed.label, "Kaimi");
    assert_eq!(seed.full, "Kaiming He");
    assert_eq!(graph.vertex(&coauthor(14)).unwrap().label, "Piotr");
}

#[test]
fn test_paged_listing_matches_single_page() {
    let single = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig::default(),
    )
    .1
    .author_network(SEED)
    .unwrap();

    let (catalog, paged) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig {
            per_page: 5,
            max_in_flight: 2,
            ..NetworkConfig::default()
        },
    );
    let graph = paged.author_network(SEED).unwrap();

    assert_eq!(catalog.page_calls(), 3);
    assert_eq!(graph, single);
}

#[test]
fn test_top_n_is_configurable() {
    let (_, scholar) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig {
            top_n: 3,
            ..NetworkConfig::default()
        },
    );

    let graph = scholar.author_network(SEED).unwrap();
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.vertices.len(), 4);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_unknown_author_is_not_found() {
    let (catalog, scholar) = scholar(MockCatalog::new(), NetworkConfig::default());
    assert!(matches!(
        scholar.author_network(SEED),
        Err(ScholarError::NotFound { .. })
    ));
    assert_eq!(catalog.page_calls(), 0);
}

#[test]
fn test_mid_pagination_failure_returns_no_graph() {
    let (_, scholar) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works())
            .fail_page(2),
        NetworkConfig {
            per_page: 5,
            ..NetworkConfig::default()
        },
    );

    assert!(matches!(
        scholar.author_network(SEED),
        Err(ScholarError::UpstreamUnavailable(_))
    ));
}

#[test]
fn test_cancelled_build() {
    let (_, scholar) = scholar(
        MockCatalog::new()
            .with_record(seed_author())
            .with_works(WORKS_URL, twelve_works()),
        NetworkConfig::default(),
    );
    let cancel = CancelToken::new();
    cancel.cancel();

    assert!(matches!(
        scholar.author_network_with_cancel(SEED, &cancel),
        Err(ScholarError::Cancelled)
    ));
}
