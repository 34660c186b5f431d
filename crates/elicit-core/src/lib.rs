//! # Elicit-Core
//!
//! Core data model for the Elicit gesture-elicitation analysis system:
//! geometry primitives, hand poses, gestures, subjects, and the shared
//! error type.
//!
//! The ingestion layer (out of scope here) produces a list of [`Subject`]s
//! from recorded motion-capture data; the analysis crate consumes them
//! through a read-only or defensively cloned view.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod subject;
pub mod types;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use geometry::{centroid, Cuboid, Joint};
pub use gesture::{Gesture, Pose};
pub use subject::Subject;
pub use types::{GestureCategory, HandSide};
