//! Canonical tree encoding and content hashing

pub mod archive;
pub mod hasher;

pub use archive::{dump_path, NarWriter};
pub use hasher::{file_sha256, ContentHasher};
