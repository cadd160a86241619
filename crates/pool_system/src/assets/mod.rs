//! Asset lookup

pub mod atlas_cache;

pub use atlas_cache::{AssetLoader, AtlasCache, AtlasError};
