//! Projection schemas: which fields of a catalog record are kept, rewritten or dropped.

mod catalog;
mod inverted;
mod projection;

pub use catalog::schema_for;
pub use inverted::reconstruct_text;
pub use projection::{FieldRule, ProjectionSchema, project};
