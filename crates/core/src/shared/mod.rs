pub mod constants;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod raster_image;
