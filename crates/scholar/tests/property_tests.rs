//! Property-based tests for scholar's pure transforms.
//!
//! These tests use proptest to generate random inputs and verify that
//! id parsing, projection, citation formatting and network pruning keep
//! their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p scholar --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p scholar --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use scholar::entity::OPENALEX_PREFIX;
use scholar::network::CoauthorTally;
use scholar::schema::{project, schema_for};
use scholar::{EntityKind, EntityRef, Origin, ResolvedRecord, ScholarError, format_citations};

// =============================================================================
// Test Strategies
// =============================================================================

/// Ids with a known kind prefix
fn known_id() -> impl Strategy<Value = String> {
    "[WAIVC][0-9]{1,12}"
}

/// Plain words, no punctuation, ending in a capital
fn words() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,40}[A-Z]"
}

fn author_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z][a-z]{1,10} [A-Z][a-z]{1,12}", 0..10)
}

fn work_type() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec![
        "journal-article",
        "proceedings-article",
        "book",
        "book-chapter",
        "dataset",
    ]))
}

/// A catalog-shaped work payload
fn raw_work() -> impl Strategy<Value = Map<String, Value>> {
    (
        "[0-9]{1,10}",
        words(),
        author_names(),
        prop::option::of(words()),
        prop::option::of(1900i64..2030),
        work_type(),
        prop::collection::vec("[a-z]{1,8}", 0..12),
    )
        .prop_map(|(n, title, authors, venue, year, kind, abstract_words)| {
            let authorships: Vec<Value> = authors
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    json!({"author": {"id": format!("{}A{}", OPENALEX_PREFIX, i), "display_name": name}})
                })
                .collect();
            let mut inverted = Map::new();
            for (pos, word) in abstract_words.iter().enumerate() {
                let entry = inverted.entry(word.clone()).or_insert_with(|| json!([]));
                if let Value::Array(positions) = entry {
                    positions.push(json!(pos));
                }
            }

            let mut work = json!({
                "id": format!("{}W{}", OPENALEX_PREFIX, n),
                "title": title,
                "display_name": title,
                "authorships": authorships,
                "abstract_inverted_index": inverted,
                "referenced_works": [format!("{}W1", OPENALEX_PREFIX)],
                "updated_date": "2022-01-01"
            });
            if let Some(venue) = venue {
                work["host_venue"] = json!({"display_name": venue, "publisher": venue});
            }
            if let Some(year) = year {
                work["publication_year"] = json!(year);
            }
            if let Some(kind) = kind {
                work["type"] = json!(kind);
            }
            work.as_object().cloned().unwrap_or_default()
        })
}

fn record(raw: Map<String, Value>) -> ResolvedRecord {
    let id = raw.get("id").and_then(Value::as_str).unwrap_or("W0").to_string();
    let entity = EntityRef::parse(&id).unwrap();
    ResolvedRecord::new(entity, project(raw, schema_for(EntityKind::Work)), Origin::Index)
}

// =============================================================================
// Id Parsing
// =============================================================================

proptest! {
    /// Any input either parses to a known kind or fails with UnknownKind.
    #[test]
    fn prop_kind_inference_is_total(raw in "\\PC{0,30}") {
        match EntityRef::parse(&raw) {
            Ok(entity) => {
                let first = entity.id().chars().next().unwrap();
                prop_assert_eq!(EntityKind::from_prefix(first), Some(entity.kind()));
            }
            Err(e) => prop_assert!(matches!(e, ScholarError::UnknownKind(_)), "{:?}", e),
        }
    }

    /// The URI form and the bare form name the same object.
    #[test]
    fn prop_uri_and_bare_ids_agree(id in known_id()) {
        let bare = EntityRef::parse(&id).unwrap();
        let uri = EntityRef::parse(&format!("{}{}", OPENALEX_PREFIX, id)).unwrap();
        prop_assert_eq!(bare, uri);
    }

    /// Unknown leading characters never resolve to a kind.
    #[test]
    fn prop_unknown_prefix_rejected(id in "[BDEFGHJKLMNOPQRSTUXYZ][0-9]{1,10}") {
        prop_assert!(matches!(EntityRef::parse(&id), Err(ScholarError::UnknownKind(_))));
    }
}

// =============================================================================
// Projection
// =============================================================================

proptest! {
    /// Projecting twice gives the same record as projecting once.
    #[test]
    fn prop_projection_is_idempotent(raw in raw_work()) {
        let schema = schema_for(EntityKind::Work);
        let once = project(raw, schema);
        let twice = project(once.clone(), schema);
        prop_assert_eq!(once, twice);
    }

    /// Projected records carry no catalog URIs in id fields.
    #[test]
    fn prop_projection_strips_uris(raw in raw_work()) {
        let projected = project(raw, schema_for(EntityKind::Work));
        let id = projected.get("id").and_then(Value::as_str).unwrap();
        prop_assert!(!id.starts_with(OPENALEX_PREFIX));
        prop_assert!(!projected.contains_key("abstract_inverted_index"));
        prop_assert!(!projected.contains_key("updated_date"));
    }
}

// =============================================================================
// Citations
// =============================================================================

proptest! {
    /// Every style is produced, with no doubled periods or trailing space.
    #[test]
    fn prop_citations_are_clean(raw in raw_work()) {
        let citations = format_citations(&record(raw));
        for text in [&citations.mla, &citations.apa, &citations.gb] {
            prop_assert!(!text.contains(".."), "{}", text);
            prop_assert_eq!(text.trim_end(), text.as_str());
            prop_assert!(!text.is_empty());
        }
    }

    /// Long author lists collapse to "et al.".
    #[test]
    fn prop_long_author_lists_collapse(raw in raw_work()) {
        let authors = raw
            .get("authorships")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        let citations = format_citations(&record(raw));
        prop_assert_eq!(citations.mla.contains("et al."), authors > 3);
        prop_assert_eq!(citations.gb.contains("et al."), authors > 3);
        prop_assert_eq!(citations.apa.contains("et al."), authors > 6);
    }
}

// =============================================================================
// Network Pruning
// =============================================================================

proptest! {
    /// At most `top_n` edges survive, heaviest first, and every vertex is
    /// the seed or an edge endpoint.
    #[test]
    fn prop_pruning_keeps_heaviest(
        works in prop::collection::vec(prop::collection::vec(0usize..30, 0..8), 0..25),
        top_n in 0usize..15,
    ) {
        let mut tally = CoauthorTally::new("A0", "Seed Author");
        for (i, coauthors) in works.iter().enumerate() {
            let mut authorships = vec![json!({"author": {"id": "A0", "display_name": "Seed Author"}})];
            for c in coauthors {
                authorships.push(json!({"author": {"id": format!("A{}", c + 1), "display_name": format!("Coauthor {}", c)}}));
            }
            let work = json!({"id": format!("W{}", i), "title": "T", "authorships": authorships});
            tally.add_work(work.as_object().unwrap());
        }
        let distinct = tally.coauthor_count();

        let graph = tally.into_graph(top_n);
        prop_assert_eq!(graph.edges.len(), distinct.min(top_n));
        prop_assert!(graph.edges.windows(2).all(|w| w[0].weight >= w[1].weight));
        prop_assert_eq!(graph.vertices[0].id.as_str(), "A0");
        prop_assert_eq!(graph.vertices.len(), graph.edges.len() + 1);
        for edge in &graph.edges {
            prop_assert!(graph.vertex(&edge.to).is_some());
            prop_assert_eq!(edge.works.len() as u32, edge.weight);
        }
    }
}
