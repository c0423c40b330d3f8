//! MUTCOST Catalog
//!
//! The in-memory mutation catalog and its Mutations.xml codec.
//!
//! # Core Operations
//!
//! - **Load**: Parse the baseline Mutations.xml into a [`Catalog`], merging
//!   repeated categories and honoring removal markers
//! - **Write**: Serialize a catalog back to Mutations.xml with per-entry
//!   cost substitution
//!
//! # Example
//!
//! ```rust,ignore
//! use mutcost_catalog::{CatalogLoader, write_catalog};
//!
//! let catalog = CatalogLoader::new().load_path("Mutations.xml")?;
//! let file = std::fs::File::create("out/Mutations.xml")?;
//! write_catalog(file, &catalog, |entry| entry.cost.to_string())?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod loader;
pub mod model;
pub mod writer;

pub use error::{LoadError, WriteError};
pub use loader::CatalogLoader;
pub use model::{
    Catalog, MergeAction, MutationCategory, MutationEntry, REMOVAL_MARKER, UNSPECIFIED_COST,
};
pub use writer::write_catalog;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
