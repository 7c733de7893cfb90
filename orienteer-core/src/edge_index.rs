//! Column numbering for node and edge variables.
//!
//! Undirected pairs `i < j` are numbered row by row over the strict upper
//! triangle, so pair `(i, j)` over `n` nodes sits at
//! `start + Σ_{k<i}(n-1-k) + (j-i-1)`. Every cut family and the solution
//! extractor go through this mapping.

/// Column of the undirected pair `{i, j}` in a block beginning at `start`.
///
/// Argument order does not matter.
///
/// # Examples
/// ```
/// use orienteer_core::edge_index;
///
/// assert_eq!(edge_index(0, 1, 4, 4), 4);
/// assert_eq!(edge_index(3, 2, 4, 4), 9);
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "the triangular offset is even before halving"
)]
pub const fn edge_index(i: usize, j: usize, nodes: usize, start: usize) -> usize {
    debug_assert!(i != j, "edges join two distinct nodes");
    let (low, high) = if j < i { (j, i) } else { (i, j) };
    // `low * (2n - low - 1)` is always even.
    start + low * (2 * nodes - low - 1) / 2 + (high - low - 1)
}

/// Column of the directed arc `i -> j` in a dense `n x n` block.
#[must_use]
pub const fn arc_index(i: usize, j: usize, nodes: usize) -> usize {
    i * nodes + j
}

/// Number of undirected pairs over `nodes` nodes.
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "n(n-1) is even before halving"
)]
pub const fn edge_count(nodes: usize) -> usize {
    nodes * nodes.saturating_sub(1) / 2
}

/// Variable layout of the two-index orienteering formulation.
///
/// Node presence columns `X_i` occupy `0..n`, edge columns `Y_ij` follow
/// immediately after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpLayout {
    nodes: usize,
}

impl OpLayout {
    /// Layout for an instance with `nodes` nodes.
    #[must_use]
    pub const fn new(nodes: usize) -> Self {
        Self { nodes }
    }

    /// Number of nodes.
    #[must_use]
    pub const fn nodes(self) -> usize {
        self.nodes
    }

    /// First edge column.
    #[must_use]
    pub const fn y_start(self) -> usize {
        self.nodes
    }

    /// Column of `X_node`.
    #[must_use]
    pub const fn x(self, node: usize) -> usize {
        node
    }

    /// Column of `Y_ij`.
    #[must_use]
    pub const fn y(self, i: usize, j: usize) -> usize {
        edge_index(i, j, self.nodes, self.y_start())
    }

    /// Total number of columns.
    #[must_use]
    pub const fn variable_count(self) -> usize {
        self.nodes + edge_count(self.nodes)
    }

    /// Iterate over `(i, j)` pairs with `i < j` in column order.
    pub fn pairs(self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.nodes;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
    }
}
