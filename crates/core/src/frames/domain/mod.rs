pub mod frame_metadata;
pub mod frame_source;
pub mod image_writer;
