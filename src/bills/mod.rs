//! Bill document discovery, correlation, and loading.

pub mod key;
pub mod loader;
pub mod metadata;
pub mod resolver;
pub mod types;

pub use key::{BillKeyComponents, parse_bill_key};
pub use loader::{DocumentLoader, LoadError, LoadedBatch, ObjectFilter, RecursiveS3Loader};
pub use resolver::{DocumentResolver, ResolveError};
pub use types::{DocumentMetadata, EnrichedDocument};
