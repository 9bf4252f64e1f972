//! Ranking and aggregation over application catalogs.
//!
//! Every function here is pure: it borrows a catalog, never mutates it, and
//! returns freshly built results. Callers pass the current category, query
//! and sort state on each call.

pub mod aggregate;
pub mod distribution;
pub mod filter;
pub mod grade;
pub mod merge;
pub mod sort;
pub mod types;
pub mod utility;
