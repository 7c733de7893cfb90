//! Greedy repair of over-budget tours.

use orienteer_core::{DistanceMatrix, Tour};

/// Tour returned by [`shorten_tour`] with its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedTour {
    /// Remaining tour, depot first.
    pub tour: Tour,
    /// Cyclic length after the removals.
    pub length: i64,
    /// Reward after the removals.
    pub value: i64,
}

/// Effect of dropping the node at `position` from a cyclic node sequence.
struct Removal {
    position: usize,
    node: usize,
    gain: i64,
    loss: i64,
}

impl Removal {
    fn at(
        nodes: &[usize],
        position: usize,
        distances: &DistanceMatrix,
        prices: &[i64],
    ) -> Option<Self> {
        let before = *nodes.get(position.checked_sub(1)?)?;
        let node = *nodes.get(position)?;
        let after = *nodes.get(position + 1).or_else(|| nodes.first())?;
        let gain = distances.get(before, node) + distances.get(node, after)
            - distances.get(before, after);
        Some(Self {
            position,
            node,
            gain,
            loss: *prices.get(node)?,
        })
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "removals are ranked by saved length per unit of lost reward"
)]
fn saving_ratio(gain: i64, loss: i64) -> f64 {
    gain as f64 / loss as f64
}

/// Drop nodes from `tour` until its length fits `budget`.
///
/// Each round removes the node with the largest ratio of length saved to
/// reward lost, the earliest on ties. The depot is rotated to the front and
/// never removed. When no node saves length at a positive ratio the node
/// after the depot goes. A tour already within budget is returned
/// unchanged.
///
/// # Examples
/// ```
/// use orienteer_core::{DistanceMatrix, Tour};
/// use orienteer_solver::shorten_tour;
///
/// # fn main() -> Result<(), orienteer_core::DistanceError> {
/// let distances = DistanceMatrix::from_rows(&[
///     vec![0, 10, 14, 10],
///     vec![10, 0, 10, 14],
///     vec![14, 10, 0, 10],
///     vec![10, 14, 10, 0],
/// ])?;
/// let tour = Tour::new(vec![0, 1, 2, 3]);
/// let repaired = shorten_tour(&tour, &distances, &[0, 5, 5, 5], 40, 39, 15);
/// assert_eq!(repaired.tour.nodes(), &[0, 2, 3]);
/// assert_eq!((repaired.length, repaired.value), (34, 10));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn shorten_tour(
    tour: &Tour,
    distances: &DistanceMatrix,
    prices: &[i64],
    mut length: i64,
    budget: i64,
    mut value: i64,
) -> RepairedTour {
    let mut ordered = tour.clone();
    ordered.rotate_to_depot();
    let mut nodes = ordered.into_nodes();
    while length > budget && nodes.len() > 1 {
        let mut best: Option<Removal> = None;
        let mut best_ratio = 0.0;
        for position in 1..nodes.len() {
            let Some(candidate) = Removal::at(&nodes, position, distances, prices) else {
                continue;
            };
            let ratio = saving_ratio(candidate.gain, candidate.loss);
            let improves = ratio > best_ratio;
            if improves {
                best_ratio = ratio;
            }
            if improves || best.is_none() {
                best = Some(candidate);
            }
        }
        let Some(Removal {
            position,
            node,
            gain,
            loss,
        }) = best
        else {
            break;
        };
        log::debug!("dropping node {node} to save {gain} at a loss of {loss}");
        nodes.remove(position);
        length -= gain;
        value -= loss;
    }
    RepairedTour {
        tour: Tour::new(nodes),
        length,
        value,
    }
}
