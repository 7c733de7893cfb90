//! Sparse linear rows shared by base constraints and cuts.

use std::fmt;

/// Comparison operator of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    /// `activity <= rhs`
    LessEqual,
    /// `activity == rhs`
    Equal,
    /// `activity >= rhs`
    GreaterEqual,
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessEqual => "<=",
            Self::Equal => "=",
            Self::GreaterEqual => ">=",
        })
    }
}

/// `Σ coefficients[k] · x[indices[k]]  op  rhs`.
///
/// # Examples
/// ```
/// use orienteer_core::mip::{ConstraintOp, LinearConstraint};
///
/// let row = LinearConstraint::new(ConstraintOp::LessEqual, 1.0)
///     .with_term(0, 1.0)
///     .with_term(2, 1.0);
/// assert!(row.is_satisfied(&[1.0, 1.0, 0.0], 1e-6));
/// assert!(!row.is_satisfied(&[1.0, 0.0, 1.0], 1e-6));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Column indices.
    pub indices: Vec<usize>,
    /// Coefficient per index.
    pub coefficients: Vec<f64>,
    /// Comparison operator.
    pub op: ConstraintOp,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// An empty row.
    #[must_use]
    pub const fn new(op: ConstraintOp, rhs: f64) -> Self {
        Self {
            indices: Vec::new(),
            coefficients: Vec::new(),
            op,
            rhs,
        }
    }

    /// Append a term.
    pub fn push(&mut self, index: usize, coefficient: f64) {
        self.indices.push(index);
        self.coefficients.push(coefficient);
    }

    /// Append a term, builder style.
    #[must_use]
    pub fn with_term(mut self, index: usize, coefficient: f64) -> Self {
        self.push(index, coefficient);
        self
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the row has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, coefficient)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.coefficients.iter().copied())
    }

    /// Left-hand side evaluated at `values`; missing columns count as zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "row activity is a weighted sum of column values"
    )]
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms()
            .map(|(index, coefficient)| coefficient * values.get(index).copied().unwrap_or(0.0))
            .sum()
    }

    /// Whether `values` satisfy the row within `tolerance`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "feasibility is checked against a tolerance band"
    )]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let activity = self.activity(values);
        match self.op {
            ConstraintOp::LessEqual => activity <= self.rhs + tolerance,
            ConstraintOp::Equal => (activity - self.rhs).abs() <= tolerance,
            ConstraintOp::GreaterEqual => activity >= self.rhs - tolerance,
        }
    }

    /// Largest column index referenced by the row.
    #[must_use]
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (index, coefficient)) in self.terms().enumerate() {
            if position > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{coefficient}*x{index}")?;
        }
        write!(f, " {} {}", self.op, self.rhs)
    }
}
