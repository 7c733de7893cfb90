//! Persistent instance and solution records.
//!
//! Field names follow the JSON layout used by the orienteering benchmark
//! files, so a solved instance can be written back in place with its
//! `Solution` attached.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DEPOT, DistanceMatrix, EdgeWeightType, Instance, InstanceError};

/// Host metadata stored with a solution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemInfo {
    /// Operating system and architecture.
    #[cfg_attr(feature = "serde", serde(rename = "Platform", default))]
    pub platform: String,
    /// Processor description.
    #[cfg_attr(feature = "serde", serde(rename = "CPU", default))]
    pub cpu: String,
    /// Memory description.
    #[cfg_attr(feature = "serde", serde(rename = "RAM", default))]
    pub ram: String,
}

/// Outcome of one solve, produced even when the solve aborts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolutionRecord {
    /// Reported objective value.
    pub obj: i64,
    /// Best proven lower bound.
    pub lbound: i64,
    /// Best proven upper bound.
    pub ubound: i64,
    /// Whether optimality was proven.
    pub optimal: bool,
    /// Cyclic length of [`Self::route`].
    pub route_cost: i64,
    /// Best tour found, starting at the depot.
    pub route: Vec<usize>,
    /// Wall-clock solve time.
    pub time: String,
    /// Host metadata.
    pub system: SystemInfo,
    /// Free-text diagnostics gathered during the solve.
    pub comment: String,
}

impl SolutionRecord {
    /// Append a diagnostic sentence to [`Self::comment`].
    pub fn push_comment(&mut self, message: &str) {
        self.comment.push_str(message);
        if !message.ends_with(' ') {
            self.comment.push(' ');
        }
    }

    /// Relative gap between objective and upper bound, in percent.
    ///
    /// Returns `None` when the upper bound is zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the gap is reported as a floating-point percentage"
    )]
    pub fn gap_percent(&self) -> Option<f64> {
        if self.ubound == 0 {
            return None;
        }
        Some(100.0 * (self.obj - self.ubound) as f64 / self.ubound as f64)
    }
}

/// Orienteering instance as stored on disk.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InstanceRecord {
    /// Instance name.
    pub name: String,
    /// Free-text description.
    pub comment: String,
    /// Problem type tag.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Declared node count.
    pub dimension: usize,
    /// Display hint carried over from TSPLIB.
    pub display_data_type: String,
    /// Edge weight tag such as `EUC_2D`.
    pub edge_weight_type: String,
    /// Depot nodes; only `[0]` is supported.
    pub depots: Vec<usize>,
    /// Planar coordinates per node.
    pub node_coordinates: Vec<[f64; 2]>,
    /// Explicit cost matrix for `EXPLICIT` instances.
    pub edge_weights: Vec<Vec<i64>>,
    /// Reward per node.
    pub prices: Vec<i64>,
    /// Travel budget.
    pub tmax: i64,
    /// Reference TSP tour length, when known.
    pub tsp_length: i64,
    /// Attached solution.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Solution", skip_serializing_if = "Option::is_none")
    )]
    pub solution: Option<SolutionRecord>,
}

impl InstanceRecord {
    /// Validate the record and build an [`Instance`].
    pub fn to_instance(&self) -> Result<Instance, InstanceError> {
        if !self.depots.is_empty() && self.depots != [DEPOT] {
            return Err(InstanceError::UnsupportedDepot(self.depots.clone()));
        }
        let weight_type: EdgeWeightType = self
            .edge_weight_type
            .parse()
            .map_err(|_| InstanceError::UnsupportedEdgeWeightType(self.edge_weight_type.clone()))?;
        let distances = if weight_type == EdgeWeightType::Explicit {
            DistanceMatrix::from_rows(&self.edge_weights)?
        } else {
            let coords: Vec<Coord<f64>> = self
                .node_coordinates
                .iter()
                .map(|&[x, y]| Coord { x, y })
                .collect();
            DistanceMatrix::from_coordinates(&coords, weight_type)?
        };
        if self.dimension != 0 && self.dimension != distances.size() {
            log::warn!(
                "instance {} declares {} nodes but describes {}",
                self.name,
                self.dimension,
                distances.size()
            );
        }
        Instance::new(self.name.clone(), distances, self.prices.clone(), self.tmax)
    }
}
