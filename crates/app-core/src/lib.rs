//! Core application logic for CodingPT
//!
//! This crate contains the flows that sit on top of the API client: login and
//! session checks, the lesson catalog with local progress, and the study
//! heatmap model.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod heatmap;
pub mod lessons;
pub mod session;

pub use heatmap::{HeatLevel, HeatmapGrid, StudyActivity};
pub use lessons::LessonCatalog;
pub use session::{AuthSession, LoginState};
