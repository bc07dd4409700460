//! S3-compatible object store access.

pub mod client;
pub mod lister;
pub mod sign;
pub mod types;

pub use client::S3Service;
pub use lister::stream_pages;
pub use sign::Credentials;
pub use types::{ObjectPage, ObjectRef, S3Error};
