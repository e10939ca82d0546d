//! HTTP API over the scholar library.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
