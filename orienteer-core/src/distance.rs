//! Integer travel costs between nodes.
//!
//! Costs are stored in a dense row-major matrix. Coordinate-based instances
//! use the TSPLIB rounding conventions so results stay comparable with
//! published benchmark values.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use orienteer_core::{DistanceMatrix, EdgeWeightType};
//!
//! # fn main() -> Result<(), orienteer_core::DistanceError> {
//! let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 }];
//! let matrix = DistanceMatrix::from_coordinates(&coords, EdgeWeightType::Euc2d)?;
//! assert_eq!(matrix.get(0, 1), 5);
//! # Ok(())
//! # }
//! ```

use std::{fmt, str::FromStr};

use geo::Coord;
use thiserror::Error;

/// How pairwise costs are derived for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeWeightType {
    /// Euclidean distance rounded half up.
    #[default]
    Euc2d,
    /// Euclidean distance rounded up.
    Ceil2d,
    /// Costs supplied verbatim as a matrix.
    Explicit,
}

impl EdgeWeightType {
    /// Return the TSPLIB tag for this weight type.
    ///
    /// # Examples
    /// ```
    /// use orienteer_core::EdgeWeightType;
    ///
    /// assert_eq!(EdgeWeightType::Ceil2d.as_str(), "CEIL_2D");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euc2d => "EUC_2D",
            Self::Ceil2d => "CEIL_2D",
            Self::Explicit => "EXPLICIT",
        }
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "TSPLIB costs round a Euclidean distance to an integer"
    )]
    fn round(self, euclidean: f64) -> i64 {
        match self {
            Self::Ceil2d => euclidean.ceil() as i64,
            Self::Euc2d | Self::Explicit => (euclidean + 0.5).floor() as i64,
        }
    }
}

impl fmt::Display for EdgeWeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeWeightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUC_2D" => Ok(Self::Euc2d),
            "CEIL_2D" => Ok(Self::Ceil2d),
            "EXPLICIT" => Ok(Self::Explicit),
            _ => Err(format!("unknown edge weight type '{s}'")),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "planar distance needs coordinate differences"
)]
fn euclidean(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let dx = from.x - to.x;
    let dy = from.y - to.y;
    (dx * dx + dy * dy).sqrt()
}

/// Errors raised while building a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// Coordinates cannot produce an explicit matrix.
    #[error("explicit edge weights must be supplied as a matrix")]
    ExplicitWithoutMatrix,
    /// A row of an explicit matrix has the wrong length.
    #[error("row {row} has {len} entries, expected {expected}")]
    NonSquare {
        /// Offending row.
        row: usize,
        /// Entries found in that row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// The matrix differs across the diagonal.
    #[error("cost {i}->{j} differs from {j}->{i}")]
    Asymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// A cost is negative.
    #[error("cost {i}->{j} is negative")]
    Negative {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
}

/// Symmetric matrix of integer travel costs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistanceMatrix {
    size: usize,
    costs: Vec<i64>,
}

impl DistanceMatrix {
    /// Build the matrix from planar coordinates.
    pub fn from_coordinates(
        coords: &[Coord<f64>],
        weight_type: EdgeWeightType,
    ) -> Result<Self, DistanceError> {
        if weight_type == EdgeWeightType::Explicit {
            return Err(DistanceError::ExplicitWithoutMatrix);
        }
        let costs = coords
            .iter()
            .flat_map(|from| coords.iter().map(move |to| (from, to)))
            .map(|(from, to)| weight_type.round(euclidean(*from, *to)))
            .collect();
        Ok(Self {
            size: coords.len(),
            costs,
        })
    }

    /// Build the matrix from explicit rows.
    ///
    /// Rows must form a square, symmetric, non-negative matrix.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, DistanceError> {
        let size = rows.len();
        let mut costs = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(DistanceError::NonSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            costs.extend_from_slice(values);
        }
        let matrix = Self { size, costs };
        for i in 0..size {
            for j in 0..size {
                if matrix.get(i, j) < 0 {
                    return Err(DistanceError::Negative { i, j });
                }
                if matrix.get(i, j) != matrix.get(j, i) {
                    return Err(DistanceError::Asymmetric { i, j });
                }
            }
        }
        Ok(matrix)
    }

    /// Number of nodes covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cost of travelling from `i` to `j`.
    ///
    /// # Panics
    ///
    /// Panics when either index is outside the matrix.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.try_get(i, j).unwrap_or_else(|| {
            panic!("node pair ({i}, {j}) outside a {0}x{0} matrix", self.size)
        })
    }

    /// Cost of travelling from `i` to `j`, or `None` outside the matrix.
    #[must_use]
    pub fn try_get(&self, i: usize, j: usize) -> Option<i64> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.costs.get(i * self.size + j).copied()
    }

    /// Cyclic length of `tour`, including the edge back to the first node.
    ///
    /// # Examples
    /// ```
    /// use orienteer_core::DistanceMatrix;
    ///
    /// # fn main() -> Result<(), orienteer_core::DistanceError> {
    /// let matrix = DistanceMatrix::from_rows(&[vec![0, 2], vec![2, 0]])?;
    /// assert_eq!(matrix.tour_length(&[0, 1]), 4);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn tour_length(&self, tour: &[usize]) -> i64 {
        tour.iter()
            .zip(tour.iter().cycle().skip(1))
            .map(|(&a, &b)| self.get(a, b))
            .sum()
    }

    /// Largest cost from `node` to any member of `others`.
    #[must_use]
    pub fn farthest_from(&self, node: usize, others: &[usize]) -> i64 {
        others
            .iter()
            .map(|&other| self.get(node, other))
            .max()
            .unwrap_or(0)
    }

    /// Matrix restricted to `nodes`, re-indexed in the given order.
    ///
    /// Local index `k` of the result refers to global node `nodes[k]`.
    #[must_use]
    pub fn restricted(&self, nodes: &[usize]) -> Self {
        let size = nodes.len();
        let costs = nodes
            .iter()
            .flat_map(|&a| nodes.iter().map(move |&b| (a, b)))
            .map(|(a, b)| self.get(a, b))
            .collect();
        Self { size, costs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn square() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 10.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: 10.0, y: 0.0 },
        ]
    }

    #[rstest]
    #[case(EdgeWeightType::Euc2d, 14)]
    #[case(EdgeWeightType::Ceil2d, 15)]
    fn diagonal_rounding_follows_weight_type(
        square: Vec<Coord<f64>>,
        #[case] weight_type: EdgeWeightType,
        #[case] diagonal: i64,
    ) {
        let matrix = DistanceMatrix::from_coordinates(&square, weight_type).expect("matrix");
        assert_eq!(matrix.get(0, 2), diagonal);
        assert_eq!(matrix.get(1, 3), diagonal);
        assert_eq!(matrix.get(0, 1), 10);
        assert_eq!(matrix.get(2, 2), 0);
    }

    #[rstest]
    fn euclidean_rounds_half_up() {
        let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 2.5, y: 0.0 }];
        let matrix = DistanceMatrix::from_coordinates(&coords, EdgeWeightType::Euc2d)
            .expect("matrix");
        assert_eq!(matrix.get(0, 1), 3);
    }

    #[rstest]
    fn perimeter_of_square(square: Vec<Coord<f64>>) {
        let matrix =
            DistanceMatrix::from_coordinates(&square, EdgeWeightType::Euc2d).expect("matrix");
        assert_eq!(matrix.tour_length(&[0, 1, 2, 3]), 40);
        assert_eq!(matrix.tour_length(&[0, 2, 1, 3]), 48);
        assert_eq!(matrix.tour_length(&[]), 0);
    }

    #[rstest]
    fn restriction_reindexes_nodes(square: Vec<Coord<f64>>) {
        let matrix =
            DistanceMatrix::from_coordinates(&square, EdgeWeightType::Euc2d).expect("matrix");
        let local = matrix.restricted(&[2, 0]);
        assert_eq!(local.size(), 2);
        assert_eq!(local.get(0, 1), 14);
        assert_eq!(local.get(1, 1), 0);
    }

    #[rstest]
    #[case(2, 0)]
    #[case(0, 2)]
    #[case(5, 5)]
    fn lookups_outside_the_matrix_are_none(#[case] i: usize, #[case] j: usize) {
        let matrix = DistanceMatrix::from_rows(&[vec![0, 2], vec![2, 0]]).expect("matrix");
        assert_eq!(matrix.try_get(i, j), None);
        assert_eq!(matrix.try_get(1, 0), Some(2));
    }

    #[rstest]
    #[should_panic(expected = "outside a 2x2 matrix")]
    fn get_panics_outside_the_matrix() {
        let matrix = DistanceMatrix::from_rows(&[vec![0, 2], vec![2, 0]]).expect("matrix");
        let _ = matrix.get(0, 2);
    }

    #[rstest]
    fn explicit_rows_must_be_square() {
        let err = DistanceMatrix::from_rows(&[vec![0, 1], vec![1]]).expect_err("ragged rows");
        assert_eq!(
            err,
            DistanceError::NonSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[rstest]
    fn explicit_rows_must_be_symmetric() {
        let err = DistanceMatrix::from_rows(&[vec![0, 1], vec![2, 0]]).expect_err("asymmetric");
        assert_eq!(err, DistanceError::Asymmetric { i: 0, j: 1 });
    }

    #[rstest]
    #[case("EUC_2D", EdgeWeightType::Euc2d)]
    #[case("ceil_2d", EdgeWeightType::Ceil2d)]
    #[case("EXPLICIT", EdgeWeightType::Explicit)]
    fn weight_type_parses_tags(#[case] tag: &str, #[case] expected: EdgeWeightType) {
        assert_eq!(tag.parse::<EdgeWeightType>(), Ok(expected));
    }

    #[rstest]
    fn unknown_weight_type_is_rejected() {
        assert!("GEO".parse::<EdgeWeightType>().is_err());
    }
}
