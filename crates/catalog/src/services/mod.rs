//! Business logic for the catalog service.
//!
//! - [`query`] - the pure filter/sort engine over item snapshots
//! - [`catalog`] - the store-backed item operations

pub mod catalog;
pub mod query;

pub use catalog::{CatalogError, CatalogService};
pub use query::{
    ItemFilterRequest, ItemQuery, SortDirection, SortField, SortKey, SortParseError,
    filter_and_sort,
};
