pub mod formats;
pub mod related;
pub mod video;
