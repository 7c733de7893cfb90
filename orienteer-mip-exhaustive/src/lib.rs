//! Exhaustive mixed-integer backend for small models.
//!
//! [`ExhaustiveBackend`] implements the [`MipBackend`] boundary with a
//! depth-first enumeration over column values. Binary columns take every
//! integral value inside their bounds; continuous columns are enumerated at
//! their bounds only, so the backend is exact for models whose optima lie at
//! integral vertices, as the orienteering and tour formulations do. Interval
//! propagation over every row, lazy rows included, prunes the tree, and an
//! optimistic objective bound cuts branches that cannot improve the
//! incumbent.
//!
//! The backend honours the full callback protocol: improving candidates are
//! offered to [`MipCallback::on_candidate`] and accepted only if they still
//! satisfy the lazy rows added there, and [`MipCallback::on_node`] runs at
//! every branching node with the option to inject an incumbent.
//!
//! Runtime grows exponentially with the column count. Use it for tests,
//! examples and instances of a handful of nodes.
//!
//! [`MipBackend`]: orienteer_core::mip::MipBackend
//! [`MipCallback::on_candidate`]: orienteer_core::mip::MipCallback::on_candidate
//! [`MipCallback::on_node`]: orienteer_core::mip::MipCallback::on_node

#![forbid(unsafe_code)]

mod model;
mod search;

pub use model::{ExhaustiveBackend, ExhaustiveModel};
