//! Facade crate for the orienteer engine.
//!
//! This crate re-exports the core domain types and the decomposition solver,
//! and exposes the bundled exhaustive backend behind a feature flag.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "backend-exhaustive")]
//! # {
//! use orienteer::{DecompositionSolver, EdgeWeightType, ExhaustiveBackend, Instance};
//! use geo::Coord;
//!
//! let corners = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
//!     .map(|(x, y)| Coord { x, y });
//! let instance = Instance::from_coordinates(
//!     "square",
//!     &corners,
//!     EdgeWeightType::Euc2d,
//!     vec![0, 5, 5, 5],
//!     40,
//! )
//! .expect("valid instance");
//! let report = DecompositionSolver::new(ExhaustiveBackend)
//!     .solve(&instance)
//!     .expect("solve succeeds");
//! assert_eq!(report.record.obj, 15);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use orienteer_core::{
    DEPOT, DistanceMatrix, EdgeWeightType, Instance, InstanceError, InstanceRecord,
    RouteAuditError, RouteSummary, SolutionRecord, SolveError, SolveFailure, SystemInfo, Tour,
    audit_route, mip,
};

pub use orienteer_solver::{
    CutFamily, DecompositionConfig, DecompositionSolver, IntegerSecPolicy, SolveReport,
    SolveState, Strategy, SubproblemKind, YBounds,
};

#[cfg(feature = "backend-exhaustive")]
pub use orienteer_mip_exhaustive::ExhaustiveBackend;
