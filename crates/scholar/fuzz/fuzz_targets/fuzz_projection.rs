//! Fuzz target for record projection and citation formatting.
//!
//! Arbitrary JSON objects are projected with every kind's schema. This
//! checks that projection:
//! 1. Never panics on unexpected field shapes
//! 2. Is idempotent
//! 3. Yields records the citation formatters accept

#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar::entity::EntityKind;
use scholar::schema::{project, schema_for};
use scholar::{EntityRef, Origin, ResolvedRecord, format_citations};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(Value::Object(raw)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    for kind in EntityKind::ALL {
        let schema = schema_for(kind);
        let once = project(raw.clone(), schema);
        let twice = project(once.clone(), schema);
        assert_eq!(once, twice);

        if kind == EntityKind::Work {
            if let Ok(entity) = EntityRef::parse("W1") {
                let record = ResolvedRecord::new(entity, once, Origin::Index);
                let _ = format_citations(&record);
            }
        }
    }
});
