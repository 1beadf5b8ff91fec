//! Extras resources

pub mod tag;

pub use tag::TagResource;
