//! Valid inequalities over the master formulation.
//!
//! Every cut is expressed on the `X`/`Y` columns of an [`OpLayout`]. The
//! subtour elimination builders are also exposed as free functions so the
//! tour subproblems can apply them to their own column blocks.

use orienteer_core::mip::{ConstraintOp, LinearConstraint, coefficient};
use orienteer_core::{DistanceMatrix, Instance, OpLayout, Tour, arc_index, edge_index};

use crate::config::token_enum;

token_enum! {
    /// Cut family added when a master candidate is rejected.
    CutFamily, "cut family" {
        /// Subtour elimination on every fragment.
        Sec => "SEC",
        /// Forbid the exact node set.
        BendersV0 => "BEND_V0",
        /// Travel-cost lower bound with node penalties.
        BendersV1 => "BEND_V1",
        /// Complement sets of windows whose removal may restore the budget.
        BendersV2 => "BEND_V2",
    }
}

impl CutFamily {
    /// Whether the family counts towards the Benders cut counter.
    #[must_use]
    pub const fn is_benders(self) -> bool {
        !matches!(self, Self::Sec)
    }
}

/// Undirected subtour elimination cut on edge columns numbered from `start`.
///
/// `Σ_{i<j ∈ F} Y_ij ≤ |F| - 1`.
///
/// # Examples
/// ```
/// use orienteer_solver::subtour_elimination;
///
/// let cut = subtour_elimination(&[0, 2, 3], 4, 0);
/// assert_eq!(cut.indices, vec![1, 2, 5]);
/// assert_eq!(cut.rhs, 2.0);
/// ```
#[must_use]
pub fn subtour_elimination(fragment: &[usize], nodes: usize, start: usize) -> LinearConstraint {
    let mut cut = LinearConstraint::new(ConstraintOp::LessEqual, rhs_for(fragment.len()));
    for (position, &a) in fragment.iter().enumerate() {
        for &b in fragment.iter().skip(position + 1) {
            cut.push(edge_index(a, b, nodes, start), 1.0);
        }
    }
    cut
}

/// Directed subtour elimination cut on a dense arc block.
///
/// `Σ_{i≠j ∈ F} X_ij ≤ |F| - 1`.
#[must_use]
pub fn directed_subtour_elimination(fragment: &[usize], nodes: usize) -> LinearConstraint {
    let mut cut = LinearConstraint::new(ConstraintOp::LessEqual, rhs_for(fragment.len()));
    for &a in fragment {
        for &b in fragment.iter().filter(|&&b| b != a) {
            cut.push(arc_index(a, b, nodes), 1.0);
        }
    }
    cut
}

fn rhs_for(size: usize) -> f64 {
    coefficient(i64::try_from(size.saturating_sub(1)).unwrap_or(i64::MAX))
}

fn node_set_cut(layout: OpLayout, nodes: &[usize]) -> LinearConstraint {
    let mut cut = LinearConstraint::new(ConstraintOp::LessEqual, rhs_for(nodes.len()));
    for &node in nodes {
        cut.push(layout.x(node), 1.0);
    }
    cut
}

/// Builds cuts on the master columns of one instance.
#[derive(Debug, Clone, Copy)]
pub struct CutLibrary<'a> {
    layout: OpLayout,
    distances: &'a DistanceMatrix,
    prices: &'a [i64],
    budget: i64,
}

impl<'a> CutLibrary<'a> {
    /// Cuts over the master formulation of `instance`.
    #[must_use]
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            layout: OpLayout::new(instance.node_count()),
            distances: instance.distances(),
            prices: instance.prices(),
            budget: instance.budget(),
        }
    }

    /// Column layout the cuts refer to.
    #[must_use]
    pub const fn layout(&self) -> OpLayout {
        self.layout
    }

    /// Subtour elimination cut for `fragment` on the master edge columns.
    #[must_use]
    pub fn sec(&self, fragment: &[usize]) -> LinearConstraint {
        subtour_elimination(fragment, self.layout.nodes(), self.layout.y_start())
    }

    /// Forbid selecting every node of `tour` together.
    ///
    /// `Σ_{i∈T} X_i ≤ |T| - 1`.
    #[must_use]
    pub fn benders_v0(&self, tour: &Tour) -> LinearConstraint {
        node_set_cut(self.layout, tour.nodes())
    }

    /// Travel-cost cut for an over-budget `tour` of cyclic length `length`.
    ///
    /// With `l_i` twice the largest distance from node `i` to another tour
    /// node, for every node but the first:
    /// `Σ_{i<j∈T} d_ij·Y_ij − Σ l_i·X_i ≥ length − Σ l_i`.
    #[must_use]
    pub fn benders_v1(&self, tour: &Tour, length: i64) -> LinearConstraint {
        let nodes = tour.nodes();
        let mut cut = LinearConstraint::new(ConstraintOp::GreaterEqual, 0.0);
        for (position, &a) in nodes.iter().enumerate() {
            for &b in nodes.iter().skip(position + 1) {
                cut.push(self.layout.y(a, b), coefficient(self.distances.get(a, b)));
            }
        }
        let mut penalty_sum = 0;
        for &node in nodes.iter().skip(1) {
            let penalty = 2 * self.distances.farthest_from(node, nodes);
            penalty_sum += penalty;
            cut.push(self.layout.x(node), coefficient(-penalty));
        }
        cut.rhs = coefficient(length - penalty_sum);
        cut
    }

    /// Window cuts for an over-budget `tour` of cyclic length `length`.
    ///
    /// For each start position `i ≥ 1` the window of positions `i..=j` grows
    /// until a lower bound on the length saved by dropping it brings the
    /// tour within budget. The nodes outside positions `i..j` are then
    /// forbidden together. One cut is returned per start position.
    #[must_use]
    pub fn benders_v2(&self, tour: &Tour, length: i64) -> Vec<LinearConstraint> {
        let nodes = tour.nodes();
        (1..nodes.len())
            .map(|start| {
                let kept = self.window_complement(nodes, start, length);
                node_set_cut(self.layout, &kept)
            })
            .collect()
    }

    /// Nodes outside the first window from `start` whose removal may bring
    /// a tour of `length` within budget; the whole tour when none does.
    ///
    /// The saving of dropping positions `start..=end` is bounded by the
    /// smallest of the window's edge total, twice that total less its
    /// longest edge, and the window's inner path plus its cheaper end edge
    /// and the shortcut edge.
    fn window_complement(&self, nodes: &[usize], start: usize, length: i64) -> Vec<usize> {
        let previous = start.checked_sub(1).and_then(|position| nodes.get(position));
        let (Some(&before), Some(&first)) = (previous, nodes.get(start)) else {
            return nodes.to_vec();
        };
        let entry = self.distances.get(before, first);
        let mut total = entry;
        let mut longest = entry;
        for (end, &last) in nodes.iter().enumerate().skip(start) {
            let Some(&next) = nodes.get(end + 1).or_else(|| nodes.first()) else {
                break;
            };
            let exit = self.distances.get(last, next);
            total += exit;
            longest = longest.max(exit);
            let inner = total - entry - exit;
            let shortcut = if entry <= exit {
                inner + entry + self.distances.get(last, before)
            } else {
                inner + exit + self.distances.get(first, next)
            };
            let saved = (2 * (total - longest)).min(total).min(shortcut);
            if length - saved <= self.budget {
                return nodes
                    .iter()
                    .take(start)
                    .chain(nodes.iter().skip(end))
                    .copied()
                    .collect();
            }
        }
        nodes.to_vec()
    }

    /// Cap the reward collectable within `nodes` at `achieved`.
    ///
    /// `Σ_{i∈nodes} price_i·X_i ≤ achieved`.
    #[must_use]
    pub fn op_subcost(&self, nodes: &[usize], achieved: i64) -> LinearConstraint {
        let mut cut = LinearConstraint::new(ConstraintOp::LessEqual, coefficient(achieved));
        for &node in nodes {
            let price = self.prices.get(node).copied().unwrap_or_default();
            cut.push(self.layout.x(node), coefficient(price));
        }
        cut
    }

    /// Every cut of `family` for an over-budget tour and its fragments.
    ///
    /// [`CutFamily::Sec`] yields one cut per fragment and nothing when the
    /// subproblem reported none.
    #[must_use]
    pub fn family(
        &self,
        family: CutFamily,
        tour: &Tour,
        length: i64,
        fragments: &[Tour],
    ) -> Vec<LinearConstraint> {
        match family {
            CutFamily::Sec => fragments
                .iter()
                .map(|fragment| self.sec(fragment.nodes()))
                .collect(),
            CutFamily::BendersV0 => vec![self.benders_v0(tour)],
            CutFamily::BendersV1 => vec![self.benders_v1(tour, length)],
            CutFamily::BendersV2 => self.benders_v2(tour, length),
        }
    }
}

#[cfg(test)]
mod tests;
