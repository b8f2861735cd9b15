//! Scene application: owns the scene, camera and renderer and reacts to host
//! events (resize, frame callbacks, pointer input).
//!
//! # Invariants
//! - Setup runs once, before the first frame is requested.
//! - Each frame requests its successor before rendering.
//! - Frame steps are never negative and never exceed 1/30 s.

pub mod app;
pub mod frame;
pub mod schedule;

pub use app::{CameraDefaults, SceneApp};
pub use frame::{FrameClock, FrameState, FrameStep, MAX_STEP_SECONDS};
pub use schedule::{FrameRequests, FrameScheduler};
