//! Core domain types for the orienteering engine.
//!
//! An orienteering instance is a complete graph with integer travel costs,
//! an integer reward per node and a travel budget. Node `0` is the depot and
//! every tour starts there. This crate holds the pieces shared by every
//! solver strategy:
//!
//! - [`Instance`] and [`DistanceMatrix`], built from coordinates or an
//!   explicit matrix;
//! - the row-major edge numbering in [`edge_index`] used by every cut and by
//!   solution extraction;
//! - [`Tour`] and the route audit;
//! - [`SolutionRecord`] and, with the `serde` feature, the JSON instance
//!   format;
//! - the [`mip`] boundary that any integer-programming backend implements;
//! - the [`SolveError`] taxonomy.
//!
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod edge_index;
mod error;
mod instance;
pub mod mip;
mod record;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod tour;

pub use distance::{DistanceError, DistanceMatrix, EdgeWeightType};
pub use edge_index::{OpLayout, arc_index, edge_count, edge_index};
pub use error::{SolveError, SolveFailure};
pub use instance::{DEPOT, Instance, InstanceError};
pub use record::{InstanceRecord, SolutionRecord, SystemInfo};
pub use tour::{RouteAuditError, RouteSummary, Tour, audit_route};
