#![forbid(unsafe_code)]

//! Core: input events, geometry, and logging for the segmented PIN input.

pub mod color;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
