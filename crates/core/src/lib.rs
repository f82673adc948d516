//! Landmark-to-raster overlay engine.
//!
//! Maps normalized face-landmark geometry into pixel space and burns clown
//! features (eyes, nose, mouth) or debug rectangles into a copy of the source
//! image, retagging the result's orientation so it displays like the source.

pub mod detection;
pub mod frames;
pub mod mapping;
pub mod overlay;
pub mod pipeline;
pub mod shared;
