#![forbid(unsafe_code)]

//! Widgets for the segmented PIN input.
//!
//! Everything lives in [`pin`]; the most used types are re-exported here.

pub mod pin;

pub use pin::{FieldEvent, FieldState, InputMode, PinConfig, PinError, PinView};
