//! Subtour extraction from a 0/1 edge selection.
//!
//! Fragments are traced from the lowest unseen node, greedily following the
//! first unseen neighbour until none is left. Fragments of a single node carry
//! no edge and are never reported.

use orienteer_core::{Tour, arc_index, edge_index};

/// Rounding threshold for edge columns of the master formulation.
pub const MASTER_THRESHOLD: f64 = 0.95;

/// Rounding threshold for edge and arc columns of tour subproblems.
pub const TOUR_THRESHOLD: f64 = 0.5;

/// Selected edges over `size` nodes, undirected or directed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    directed: bool,
    links: Vec<bool>,
}

struct Walk {
    nodes: Vec<usize>,
    closed: bool,
}

impl AdjacencyMatrix {
    /// An undirected selection with no edge.
    #[must_use]
    pub fn undirected(size: usize) -> Self {
        Self {
            size,
            directed: false,
            links: vec![false; size * size],
        }
    }

    /// A directed selection with no arc.
    #[must_use]
    pub fn directed(size: usize) -> Self {
        Self {
            directed: true,
            ..Self::undirected(size)
        }
    }

    /// Read undirected edge columns numbered from `start`.
    ///
    /// An edge is selected when its column exceeds `threshold`.
    #[must_use]
    pub fn from_edge_values(values: &[f64], nodes: usize, start: usize, threshold: f64) -> Self {
        let mut matrix = Self::undirected(nodes);
        for i in 0..nodes {
            for j in (i + 1)..nodes {
                let column = edge_index(i, j, nodes, start);
                if values.get(column).is_some_and(|&value| value > threshold) {
                    matrix.link(i, j);
                }
            }
        }
        matrix
    }

    /// Read a dense `nodes x nodes` block of arc columns.
    #[must_use]
    pub fn from_arc_values(values: &[f64], nodes: usize, threshold: f64) -> Self {
        let mut matrix = Self::directed(nodes);
        for i in 0..nodes {
            for j in 0..nodes {
                let column = arc_index(i, j, nodes);
                if values.get(column).is_some_and(|&value| value > threshold) {
                    matrix.link(i, j);
                }
            }
        }
        matrix
    }

    /// Number of nodes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Select the edge `{i, j}`, or the arc `i -> j` when directed.
    ///
    /// # Panics
    ///
    /// Panics when either node is outside the matrix.
    pub fn link(&mut self, i: usize, j: usize) {
        assert!(
            i < self.size && j < self.size,
            "node pair ({i}, {j}) outside a selection of {} nodes",
            self.size
        );
        self.set(i, j);
        if !self.directed {
            self.set(j, i);
        }
    }

    fn set(&mut self, i: usize, j: usize) {
        if let Some(slot) = self.links.get_mut(i * self.size + j) {
            *slot = true;
        }
    }

    /// Whether the edge or arc from `i` to `j` is selected.
    #[must_use]
    pub fn is_linked(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.links.get(i * self.size + j) == Some(&true)
    }

    /// Every fragment holding at least one edge, in discovery order.
    #[must_use]
    pub fn fragments(&self) -> Vec<Tour> {
        self.walks()
            .into_iter()
            .filter(|walk| walk.nodes.len() > 1)
            .map(|walk| Tour::new(walk.nodes))
            .collect()
    }

    /// The shortest fragment, the first found on ties.
    ///
    /// Empty when no edge is selected. A single cycle through every node
    /// with an edge yields that whole cycle.
    ///
    /// # Examples
    /// ```
    /// use orienteer_solver::AdjacencyMatrix;
    ///
    /// let mut edges = AdjacencyMatrix::undirected(6);
    /// for (i, j) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
    ///     edges.link(i, j);
    /// }
    /// assert_eq!(edges.shortest_subtour().nodes(), &[0, 1, 2]);
    /// ```
    #[must_use]
    pub fn shortest_subtour(&self) -> Tour {
        shortest(self.walks().into_iter().filter(|walk| walk.nodes.len() > 1))
    }

    /// The shortest fragment of more than two nodes whose last node links
    /// back to its first.
    ///
    /// Open paths and single edges are ignored, so this only reports
    /// subtours an integral candidate actually closes.
    #[must_use]
    pub fn shortest_closed_subtour(&self) -> Tour {
        shortest(
            self.walks()
                .into_iter()
                .filter(|walk| walk.nodes.len() > 2 && walk.closed),
        )
    }

    fn walks(&self) -> Vec<Walk> {
        let mut seen = vec![false; self.size];
        let mut walks = Vec::new();
        for start in 0..self.size {
            if !mark(&mut seen, start) {
                continue;
            }
            let mut nodes = vec![start];
            let mut node = start;
            while let Some(next) = self.next_unseen(node, &seen) {
                mark(&mut seen, next);
                nodes.push(next);
                node = next;
            }
            let closed = self.is_linked(node, start);
            walks.push(Walk { nodes, closed });
        }
        walks
    }

    fn next_unseen(&self, node: usize, seen: &[bool]) -> Option<usize> {
        (0..self.size)
            .find(|&other| self.is_linked(node, other) && seen.get(other) == Some(&false))
    }
}

/// Mark `node` as seen and report whether it was unseen before.
fn mark(seen: &mut [bool], node: usize) -> bool {
    seen.get_mut(node)
        .is_some_and(|slot| !std::mem::replace(slot, true))
}

fn shortest(walks: impl Iterator<Item = Walk>) -> Tour {
    walks
        .fold(None::<Walk>, |best, walk| match best {
            Some(current) if current.nodes.len() <= walk.nodes.len() => Some(current),
            _ => Some(walk),
        })
        .map_or_else(Tour::empty, |walk| Tour::new(walk.nodes))
}
