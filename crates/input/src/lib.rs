//! Camera input: raw pointer state mapped to orbit camera actions.
//!
//! # Invariants
//! - Only one drag is active at a time; the first button pressed owns it.
//! - Nothing here knows about windows or cameras.

pub mod action;
pub mod pointer;

pub use action::CameraAction;
pub use pointer::{PointerButton, PointerTracker};
