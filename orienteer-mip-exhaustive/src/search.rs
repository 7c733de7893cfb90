//! Depth-first enumeration with interval propagation.
//!
//! Columns are fixed in index order. At every node each row's activity
//! range over the unfixed columns is checked against its right-hand side,
//! and the optimistic objective is compared with the incumbent. Objectives
//! are handled internally as maximisation by multiplying with `sign`.
#![expect(
    clippy::float_arithmetic,
    reason = "bounding and propagation evaluate floating-point rows and objectives"
)]

use std::time::Instant;

use orienteer_core::mip::{
    CandidateContext, ConstraintOp, LinearConstraint, MipCallback, MipError, MipStatus,
    NodeContext, Sense, VarType, Variable,
};

const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Incumbent {
    pub(crate) values: Vec<f64>,
    pub(crate) objective: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) status: MipStatus,
    pub(crate) incumbent: Option<Incumbent>,
    pub(crate) bound: f64,
    pub(crate) solutions: usize,
}

pub(crate) struct Search {
    variables: Vec<Variable>,
    domains: Vec<Vec<f64>>,
    ranges: Vec<(f64, f64)>,
    rows: Vec<LinearConstraint>,
    base_rows: usize,
    sign: f64,
    lazy_enabled: bool,
    deadline: Option<Instant>,
    values: Vec<f64>,
    incumbent: Option<Incumbent>,
    solutions: usize,
    nodes: u64,
    timed_out: bool,
    root_bound: f64,
}

impl Search {
    pub(crate) fn new(
        variables: Vec<Variable>,
        rows: Vec<LinearConstraint>,
        sense: Sense,
        lazy_enabled: bool,
        deadline: Option<Instant>,
    ) -> Self {
        let sign = match sense {
            Sense::Maximize => 1.0,
            Sense::Minimize => -1.0,
        };
        let domains: Vec<Vec<f64>> = variables
            .iter()
            .map(|variable| ordered_domain(variable, sign))
            .collect();
        let ranges = domains
            .iter()
            .map(|domain| {
                domain
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    })
            })
            .collect();
        let count = variables.len();
        let base_rows = rows.len();
        Self {
            variables,
            domains,
            ranges,
            rows,
            base_rows,
            sign,
            lazy_enabled,
            deadline,
            values: vec![0.0; count],
            incumbent: None,
            solutions: 0,
            nodes: 0,
            timed_out: false,
            root_bound: 0.0,
        }
    }

    pub(crate) fn run(
        &mut self,
        start: Option<Vec<f64>>,
        callback: &mut Option<&mut dyn MipCallback>,
    ) -> Result<(), MipError> {
        self.root_bound = self.sign * self.optimistic(0);
        if let Some(start) = start {
            self.try_start(start, callback)?;
        }
        self.explore(0, callback)
    }

    pub(crate) const fn nodes_explored(&self) -> u64 {
        self.nodes
    }

    pub(crate) fn new_lazy_rows(&self) -> &[LinearConstraint] {
        self.rows.get(self.base_rows..).unwrap_or(&[])
    }

    pub(crate) fn into_outcome(self, interrupted: bool) -> Outcome {
        let status = if interrupted {
            MipStatus::Interrupted
        } else if self.timed_out {
            MipStatus::TimeLimit
        } else if self.incumbent.is_some() {
            MipStatus::Optimal
        } else {
            MipStatus::InfeasibleOrUnbounded
        };
        let bound = match (&self.incumbent, status) {
            (Some(incumbent), MipStatus::Optimal) => incumbent.objective,
            _ => self.root_bound,
        };
        Outcome {
            status,
            incumbent: self.incumbent,
            bound,
            solutions: self.solutions,
        }
    }

    fn explore(
        &mut self,
        depth: usize,
        callback: &mut Option<&mut dyn MipCallback>,
    ) -> Result<(), MipError> {
        if self.timed_out || self.deadline_passed() {
            self.timed_out = true;
            return Ok(());
        }
        self.nodes += 1;
        if !self.rows_possible(depth) || !self.can_improve(self.optimistic(depth)) {
            return Ok(());
        }
        if depth == self.variables.len() {
            return self.offer_candidate(callback);
        }
        if let Some(handler) = callback.as_mut() {
            let mut view = NodeView { search: self };
            handler.on_node(&mut view)?;
        }
        let Some(domain) = self.domains.get(depth).cloned() else {
            return Ok(());
        };
        for value in domain {
            if let Some(slot) = self.values.get_mut(depth) {
                *slot = value;
            }
            self.explore(depth + 1, callback)?;
            if self.timed_out {
                break;
            }
        }
        Ok(())
    }

    fn try_start(
        &mut self,
        start: Vec<f64>,
        callback: &mut Option<&mut dyn MipCallback>,
    ) -> Result<(), MipError> {
        if let Err(reason) = self.check_complete(&start) {
            log::debug!("ignoring start solution: {reason}");
            return Ok(());
        }
        self.values = start;
        let result = self.offer_candidate(callback);
        self.values = vec![0.0; self.variables.len()];
        result
    }

    fn offer_candidate(
        &mut self,
        callback: &mut Option<&mut dyn MipCallback>,
    ) -> Result<(), MipError> {
        let objective = self.objective_of(&self.values);
        if !self.can_improve(self.sign * objective) {
            return Ok(());
        }
        if let Some(handler) = callback.as_mut() {
            let mut view = CandidateView {
                values: &self.values,
                objective,
                lazy_enabled: self.lazy_enabled,
                columns: self.variables.len(),
                added: Vec::new(),
            };
            handler.on_candidate(&mut view)?;
            let added = view.added;
            let violated = added
                .iter()
                .any(|row| !row.is_satisfied(&self.values, TOLERANCE));
            self.rows.extend(added);
            if violated {
                return Ok(());
            }
        }
        self.accept(self.values.clone(), objective);
        Ok(())
    }

    fn accept(&mut self, values: Vec<f64>, objective: f64) {
        self.incumbent = Some(Incumbent { values, objective });
        self.solutions += 1;
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn can_improve(&self, signed_objective: f64) -> bool {
        self.incumbent.as_ref().is_none_or(|incumbent| {
            signed_objective > self.sign * incumbent.objective + TOLERANCE
        })
    }

    fn objective_of(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(variable, value)| variable.objective * value)
            .sum()
    }

    /// Best signed objective reachable once columns `depth..` are fixed.
    fn optimistic(&self, depth: usize) -> f64 {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, variable)| {
                let weight = self.sign * variable.objective;
                let (lo, hi) = self.interval(index, depth);
                (weight * lo).max(weight * hi)
            })
            .sum()
    }

    /// Values column `index` may still take once columns `..depth` are fixed.
    fn interval(&self, index: usize, depth: usize) -> (f64, f64) {
        if index < depth {
            let value = self.values.get(index).copied().unwrap_or_default();
            (value, value)
        } else {
            self.ranges.get(index).copied().unwrap_or_default()
        }
    }

    fn rows_possible(&self, depth: usize) -> bool {
        self.rows.iter().all(|row| {
            let (min, max) = self.activity_range(row, depth);
            match row.op {
                ConstraintOp::LessEqual => min <= row.rhs + TOLERANCE,
                ConstraintOp::GreaterEqual => max >= row.rhs - TOLERANCE,
                ConstraintOp::Equal => {
                    min <= row.rhs + TOLERANCE && max >= row.rhs - TOLERANCE
                }
            }
        })
    }

    fn activity_range(&self, row: &LinearConstraint, depth: usize) -> (f64, f64) {
        row.terms()
            .fold((0.0, 0.0), |(min, max), (index, coefficient)| {
                let (lo, hi) = self.interval(index, depth);
                let (a, b) = (coefficient * lo, coefficient * hi);
                (min + a.min(b), max + a.max(b))
            })
    }

    fn check_complete(&self, values: &[f64]) -> Result<(), String> {
        if values.len() != self.variables.len() {
            return Err(format!(
                "expected {} values, got {}",
                self.variables.len(),
                values.len()
            ));
        }
        for (variable, &value) in self.variables.iter().zip(values) {
            if value < variable.lower - TOLERANCE || value > variable.upper + TOLERANCE {
                return Err(format!("{} = {value} violates its bounds", variable.name));
            }
            if variable.var_type == VarType::Binary && (value - value.round()).abs() > TOLERANCE
            {
                return Err(format!("{} = {value} is not integral", variable.name));
            }
        }
        if let Some(row) = self
            .rows
            .iter()
            .find(|row| !row.is_satisfied(values, TOLERANCE))
        {
            return Err(format!("row {row} is violated"));
        }
        Ok(())
    }
}

/// Values a column may take, best objective contribution first.
fn ordered_domain(variable: &Variable, sign: f64) -> Vec<f64> {
    let mut domain = match variable.var_type {
        VarType::Binary => {
            let lo = variable.lower.max(0.0).ceil();
            let hi = variable.upper.min(1.0).floor();
            if lo < hi { vec![lo, hi] } else { vec![lo] }
        }
        VarType::Continuous => {
            if variable.lower < variable.upper {
                vec![variable.lower, variable.upper]
            } else {
                vec![variable.lower]
            }
        }
    };
    let weight = sign * variable.objective;
    domain.sort_by(|a, b| {
        (weight * b)
            .total_cmp(&(weight * a))
            .then_with(|| a.total_cmp(b))
    });
    domain
}

struct CandidateView<'a> {
    values: &'a [f64],
    objective: f64,
    lazy_enabled: bool,
    columns: usize,
    added: Vec<LinearConstraint>,
}

impl CandidateContext for CandidateView<'_> {
    fn values(&self) -> Result<Vec<f64>, MipError> {
        Ok(self.values.to_vec())
    }

    fn objective(&self) -> Result<f64, MipError> {
        Ok(self.objective)
    }

    fn add_lazy(&mut self, constraint: LinearConstraint) -> Result<(), MipError> {
        if !self.lazy_enabled {
            return Err(MipError::LazyConstraintsDisabled);
        }
        if let Some(index) = constraint.max_index().filter(|&index| index >= self.columns) {
            return Err(MipError::UnknownColumn {
                index,
                count: self.columns,
            });
        }
        self.added.push(constraint);
        Ok(())
    }
}

struct NodeView<'a> {
    search: &'a mut Search,
}

impl NodeContext for NodeView<'_> {
    fn best_objective(&self) -> Result<f64, MipError> {
        Ok(self.search.incumbent.as_ref().map_or(
            if self.search.sign > 0.0 {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
            |incumbent| incumbent.objective,
        ))
    }

    fn inject_solution(&mut self, values: &[f64]) -> Result<f64, MipError> {
        self.search
            .check_complete(values)
            .map_err(MipError::SolutionRejected)?;
        let objective = self.search.objective_of(values);
        if !self.search.can_improve(self.search.sign * objective) {
            return Err(MipError::SolutionRejected(format!(
                "objective {objective} does not improve the incumbent"
            )));
        }
        self.search.accept(values.to_vec(), objective);
        Ok(objective)
    }
}
