//! Series Core - JSON document store, cache and CRUD service.
//!
//! The whole collection lives in a single JSON file ([`JsonStore`]) and is
//! mirrored in memory ([`SeriesCache`]). [`SeriesService`] serves reads from the
//! cache and writes the full collection back to disk after every mutation.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod cache;
pub mod error;
pub mod record;
pub mod service;
pub mod store;

pub use cache::{CacheWriter, SeriesCache};
pub use error::{Error, Result};
pub use record::{NewSerie, Patch, Serie};
pub use service::SeriesService;
pub use store::JsonStore;
