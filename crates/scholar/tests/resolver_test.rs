//! Integration tests for object resolution and object details.

use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;

use scholar::resolve::{MemoryIndex, MockCatalog, ResolverConfig};
use scholar::store::{JsonFileStore, MemoryStore, ViewCounter};
use scholar::{EntityKind, MissingIdPolicy, Origin, Scholar, ScholarConfig, ScholarError};

/// Catalog payload for "The state of OA" as the API serves it.
fn state_of_oa() -> Value {
    json!({
        "id": "https://openalex.org/W2741809807",
        "doi": "https://doi.org/10.7717/peerj.4375",
        "title": "The state of OA: a large-scale analysis of the prevalence and impact of Open Access articles",
        "display_name": "The state of OA: a large-scale analysis of the prevalence and impact of Open Access articles",
        "publication_year": 2018,
        "type": "journal-article",
        "host_venue": {
            "id": "https://openalex.org/V1983995261",
            "display_name": "PeerJ",
            "publisher": "PeerJ",
            "issn": ["2167-8359"],
            "is_oa": true,
            "license": "cc-by"
        },
        "authorships": [
            {"author": {"id": "https://openalex.org/A2798520857", "display_name": "Heather Piwowar", "orcid": null}},
            {"author": {"id": "https://openalex.org/A2156084340", "display_name": "Jason Priem"}},
            {"author": {"id": "https://openalex.org/A2051963218", "display_name": "Vincent Larivière"}},
            {"author": {"id": "https://openalex.org/A2000000001", "display_name": "Juan Pablo Alperin"}}
        ],
        "open_access": {"is_oa": true, "oa_url": "https://peerj.com/articles/4375.pdf"},
        "abstract_inverted_index": {"Despite": [0], "growing": [1], "interest": [2]},
        "referenced_works": ["https://openalex.org/W1", "https://openalex.org/W2"],
        "related_works": ["https://openalex.org/W3"],
        "updated_date": "2022-08-01"
    })
}

fn scholar_with(index: MemoryIndex, catalog: MockCatalog, config: ScholarConfig) -> Scholar {
    Scholar::with_backends(
        config,
        Arc::new(index),
        Arc::new(catalog),
        Arc::new(MemoryStore::new()),
    )
}

// =============================================================================
// Single Resolution
// =============================================================================

#[test]
fn test_index_miss_remote_success_end_to_end() {
    let scholar = scholar_with(
        MemoryIndex::new(),
        MockCatalog::new().with_record(state_of_oa()),
        ScholarConfig::default(),
    );

    let record = scholar.resolve("W2741809807").unwrap();
    assert_eq!(record.origin(), Origin::RemoteFallback);
    assert_eq!(record.get("id"), Some(&json!("W2741809807")));
    assert_eq!(record.str_field("abstract"), Some("Despite growing interest"));
    assert!(record.get("display_name").is_none());
    assert!(record.get("updated_date").is_none());

    let citations = scholar.citations("W2741809807").unwrap();
    assert!(citations.gb.ends_with("[J]. PeerJ, 2018."), "{}", citations.gb);
    assert!(citations.gb.starts_with("Heather Piwowar, Jason Priem, Vincent Larivière, et al. "));
    assert!(citations.mla.starts_with("Heather Piwowar et al. \"The state of OA"));
    assert!(citations.apa.starts_with(
        "Heather Piwowar, Jason Priem, Vincent Larivière, & Juan Pablo Alperin (2018). "
    ));
}

#[test]
fn test_uri_id_resolves_to_same_record() {
    let scholar = scholar_with(
        MemoryIndex::new(),
        MockCatalog::new().with_record(state_of_oa()),
        ScholarConfig::default(),
    );

    let bare = scholar.resolve("W2741809807").unwrap();
    let uri = scholar.resolve("https://openalex.org/W2741809807").unwrap();
    assert_eq!(bare.fields(), uri.fields());
}

#[test]
fn test_index_hit_returned_as_is() {
    let index = MemoryIndex::new();
    index.insert(state_of_oa()).unwrap();
    let catalog = Arc::new(MockCatalog::new());
    let scholar = Scholar::with_backends(
        ScholarConfig::default(),
        Arc::new(index),
        catalog.clone(),
        Arc::new(MemoryStore::new()),
    );

    let record = scholar.resolve("W2741809807").unwrap();
    assert_eq!(record.origin(), Origin::Index);
    assert_eq!(catalog.fetch_calls(), 0);
}

#[test]
fn test_error_classification() {
    let catalog = Arc::new(MockCatalog::new());
    let scholar = Scholar::with_backends(
        ScholarConfig::default(),
        Arc::new(MemoryIndex::new()),
        catalog.clone(),
        Arc::new(MemoryStore::new()),
    );

    match scholar.resolve("W404") {
        Err(ScholarError::NotFound { kind, id }) => {
            assert_eq!(kind, EntityKind::Work);
            assert_eq!(id, "W404");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }

    catalog.set_unavailable(true);
    let err = scholar.resolve("W404").unwrap_err();
    assert!(matches!(err, ScholarError::UpstreamUnavailable(_)));
    assert!(err.is_retryable());

    assert!(matches!(scholar.resolve("Q1"), Err(ScholarError::UnknownKind(_))));
}

// =============================================================================
// Batch Resolution
// =============================================================================

#[test]
fn test_batch_mixes_index_and_catalog() {
    let index = MemoryIndex::new();
    index.insert(json!({"id": "W1", "title": "Indexed"})).unwrap();
    let catalog = MockCatalog::new()
        .with_record(json!({"id": "https://openalex.org/W2", "title": "Remote"}));
    let scholar = scholar_with(index, catalog, ScholarConfig::default());

    let batch = scholar
        .resolve_many(EntityKind::Work, &["https://openalex.org/W1", "W2", "W3"])
        .unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.find("W1").unwrap().origin(), Origin::Index);
    assert_eq!(batch.find("W2").unwrap().origin(), Origin::RemoteFallback);
    assert_eq!(batch.missing(), vec!["W3"]);
    assert!(batch.is_partial());
}

#[test]
fn test_batch_retry_policy() {
    let catalog = MockCatalog::new()
        .with_records([json!({"id": "A1"}), json!({"id": "A2"})])
        .hide_from_batch("A2");
    let config = ScholarConfig {
        resolver: ResolverConfig {
            missing_id_policy: MissingIdPolicy::RetryIndividually,
            ..ResolverConfig::default()
        },
        ..ScholarConfig::default()
    };
    let scholar = scholar_with(MemoryIndex::new(), catalog, config);

    let batch = scholar.resolve_many(EntityKind::Author, &["A1", "A2"]).unwrap();
    assert!(!batch.is_partial());
}

#[test]
fn test_batch_index_failure_falls_back_to_catalog() {
    let index = MemoryIndex::new();
    index.set_unavailable(true);
    let scholar = scholar_with(
        index,
        MockCatalog::new().with_record(json!({"id": "C1", "display_name": "Biology"})),
        ScholarConfig::default(),
    );

    let batch = scholar.resolve_many(EntityKind::Concept, &["C1"]).unwrap();
    assert_eq!(batch.len(), 1);
}

// =============================================================================
// Object Details And View Counting
// =============================================================================

#[test]
fn test_work_detail_and_view_count() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path().join("store.json")).unwrap());
    let catalog = MockCatalog::new()
        .with_record(state_of_oa())
        .with_record(json!({"id": "W1", "title": "Ref one", "publication_year": 2001}))
        .with_record(json!({"id": "W3", "title": "Related", "host_venue": {"display_name": "Nature"}}));
    let scholar = Scholar::with_backends(
        ScholarConfig::default(),
        Arc::new(MemoryIndex::new()),
        Arc::new(catalog),
        store.clone(),
    );

    let detail = scholar.get_object("W2741809807").unwrap();
    let work = detail.work.expect("work detail");
    assert_eq!(work.referenced_works.len(), 1);
    assert_eq!(work.referenced_works[0].cited, "\"Ref one\",2001.");
    assert_eq!(work.related_works[0].host_venue, "Nature");
    assert_eq!(work.pdf_links, vec!["https://peerj.com/articles/4375.pdf"]);

    scholar.get_object("W2741809807").unwrap();
    let reopened = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    assert_eq!(reopened.views("W2741809807").unwrap().unwrap().views, 2);
}

#[test]
fn test_author_detail_has_intro() {
    let scholar = scholar_with(
        MemoryIndex::new(),
        MockCatalog::new().with_record(json!({
            "id": "https://openalex.org/A2764814280",
            "display_name": "Kaiming He",
            "orcid": "https://orcid.org/0000",
            "last_known_institution": {"id": "https://openalex.org/I1", "display_name": "Meta", "ror": "x"}
        })),
        ScholarConfig::default(),
    );

    let detail = scholar.get_object("A2764814280").unwrap();
    assert!(detail.work.is_none());
    let intro = detail.author.expect("author detail").intro;
    assert!(intro.starts_with("I'm Kaiming He. I'm currently working at Meta. "));
    assert!(detail.record.get("orcid").is_none());
}
