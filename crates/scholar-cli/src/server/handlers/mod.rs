//! API request handlers.

mod authors;
mod health;
mod objects;
mod works;

pub use authors::*;
pub use health::*;
pub use objects::*;
pub use works::*;
