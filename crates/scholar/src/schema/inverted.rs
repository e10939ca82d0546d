//! Inverted-index text reconstruction.
//!
//! The catalog ships abstracts as `{token: [position, ...]}`. Reassembling
//! the text means placing every token at each of its positions and reading
//! the positions back in ascending order.

use serde_json::{Map, Value};

/// Rebuild plain text from an inverted index.
///
/// Positions that are not non-negative integers are ignored; so are tokens
/// whose position list is not an array.
pub fn reconstruct_text(index: &Map<String, Value>) -> String {
    let mut placed: Vec<(u64, &str)> = Vec::new();

    for (token, positions) in index {
        let Some(positions) = positions.as_array() else {
            continue;
        };
        for position in positions {
            if let Some(pos) = as_position(position) {
                placed.push((pos, token.as_str()));
            }
        }
    }

    placed.sort_by_key(|(pos, _)| *pos);

    placed
        .into_iter()
        .map(|(_, token)| token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn as_position(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}
