//! Fuzz target for id parsing.
//!
//! Any string either parses to a typed reference whose id starts with its
//! kind prefix, or fails with `UnknownKind`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar::{EntityRef, ScholarError};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    match EntityRef::parse(raw) {
        Ok(entity) => {
            assert!(entity.id().starts_with(entity.kind().prefix()));
            // re-parsing the bare id is stable
            let again = EntityRef::parse(entity.id()).unwrap();
            assert_eq!(again, entity);
        }
        Err(ScholarError::UnknownKind(_)) => {}
        Err(e) => panic!("unexpected error: {:?}", e),
    }
});
