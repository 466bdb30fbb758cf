//! Query pipeline building blocks.
//!
//! Listings run as match -> sort -> facet(paginate + enrich) pipelines;
//! the builders here produce the exact stage documents the collections
//! expect, and [`page::FacetPage`] is the shared result shape.

pub mod page;
pub mod stages;

pub use page::{FacetPage, TotalCounter};
pub use stages::{Direction, MatchStage, SortStage};
