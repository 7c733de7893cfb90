//! Exact orienteering solver built on decomposition and cut generation.
//!
//! [`DecompositionSolver`] maximises the reward collected by a single tour
//! from the depot whose length stays within the travel budget. The master
//! problem selects nodes and edges under the degree and budget rows; every
//! integral candidate is checked by a tour subproblem, and candidates whose
//! node set admits no tour within budget are cut off with subtour
//! elimination, Benders or orienteering cuts. Over-budget tours are repaired
//! greedily and offered back to the master as heuristic incumbents.
//!
//! The solver is generic over [`MipBackend`](orienteer_core::mip::MipBackend);
//! any mixed-integer engine that honours the lazy-constraint callback
//! protocol can drive it.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod controller;
mod cuts;
mod cycle;
mod failure;
mod formulation;
mod repair;
mod session;
mod subproblem;

pub use config::{
    DecompositionConfig, IntegerSecPolicy, ParseOptionError, Strategy, SubproblemKind, YBounds,
};
pub use controller::{DecompositionSolver, SolveReport};
pub use cuts::{CutFamily, CutLibrary, directed_subtour_elimination, subtour_elimination};
pub use cycle::{AdjacencyMatrix, MASTER_THRESHOLD, TOUR_THRESHOLD};
pub use formulation::{active_nodes, register_orienteering, selected_edges, solution_vector};
pub use repair::{RepairedTour, shorten_tour};
pub use session::{CutCounters, CutKind, IncumbentState, SolveSession, SolveState};
pub use subproblem::{SubproblemSolution, SubproblemSolver};
