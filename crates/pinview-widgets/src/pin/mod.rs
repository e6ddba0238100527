#![forbid(unsafe_code)]

//! Segmented PIN / one-time-code input.
//!
//! The field is a row of single-character cells that behaves like one text
//! input. [`FieldState`] and [`FieldState::apply`] hold every focus and
//! editing rule; [`PinView`] drives render surfaces and the platform
//! keyboard from the resulting [`Transition`]s.
//!
//! # Example
//!
//! ```
//! use pinview_widgets::pin::{FieldEvent, FieldState, InputMode};
//!
//! let mut state = FieldState::new(4, InputMode::Number);
//! for (cell, digit) in ["1", "2", "3", "4"].into_iter().enumerate() {
//!     state.apply(FieldEvent::CharEntered { cell, text: digit.into() });
//! }
//! assert_eq!(state.value(), "1234");
//! assert!(state.is_full());
//! ```

mod cell;
mod codec;
mod config;
mod error;
mod focus;
mod layout;
pub mod mask;
mod scheduler;
mod state;
mod surface;
mod transition;
mod view;

pub use cell::{Cell, CellStore};
pub use codec::{InputMode, decode, encode, first_grapheme, keeps_boundary};
pub use config::{CursorAppearance, PinConfig, ResourceRef, clamp_length};
pub use error::PinError;
pub use focus::FocusTracker;
pub use layout::CellLayout;
pub use scheduler::{Due, FOCUS_DELAY, FocusScheduler, KEYBOARD_DELAY, MASKED_FOCUS_DELAY};
pub use state::{FieldPhase, FieldState};
pub use surface::{CellSurface, Keyboard, NoKeyboard, SurfaceFactory};
pub use transition::{FieldEvent, FocusMove, FocusSource, Notification, Transition, transition};
pub use view::PinView;
