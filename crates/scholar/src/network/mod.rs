//! Co-authorship collaboration networks.
//!
//! The builder walks every work of an author (listing pages fetched
//! concurrently), counts shared works per co-author and keeps the top N
//! edges.

mod builder;
mod cancel;
mod graph;

pub use builder::{NetworkBuilder, NetworkConfig};
pub use cancel::CancelToken;
pub use graph::{CoauthorTally, CollaborationGraph, Edge, LABEL_CHARS, Vertex, WorkRef};
