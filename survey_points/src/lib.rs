//! Core library for the survey point manager.
//!
//! Keeps a table of labeled survey points, moves them in and out of flat
//! delimited text files, places them into a drawing as point markers with
//! text labels, and rebuilds the table from the point and label entities
//! already present in a drawing.

pub mod collection;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layers;
pub mod manager;
pub mod point;
pub mod settings;
pub mod sync;
pub mod table;

pub use collection::{CollectionEvent, PointCollection};
pub use error::DocumentError;
pub use manager::PointManager;
pub use point::SurveyPoint;
pub use settings::Settings;
pub use sync::{DrawingSynchronizer, MergeSummary};
