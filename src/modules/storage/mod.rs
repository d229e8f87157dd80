//! Storage module for portfolio media
//!
//! Provides the Bunny.net storage zone client used for listing, uploading,
//! and deleting media files, plus pull-zone URL construction.

mod bunny_client;

pub use bunny_client::{BunnyStorageClient, StorageObject};
