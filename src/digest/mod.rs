//! Digest Providers
//!
//! Algorithm identifiers and the registry that turns them into stream-digesting functions.

pub mod algorithm;
pub mod registry;

pub use algorithm::Algorithm;
pub use registry::{DigestFunction, DigestRegistry, HasherConstructor, StreamHasher};
