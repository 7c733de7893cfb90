//! [`MipModel`] implementation backed by [`Search`].

use std::time::{Duration, Instant};

use orienteer_core::mip::{
    LinearConstraint, MipBackend, MipCallback, MipError, MipModel, MipStatus, Sense, VarType,
    Variable,
};

use crate::search::{Outcome, Search};

/// Creates [`ExhaustiveModel`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveBackend;

impl MipBackend for ExhaustiveBackend {
    type Model = ExhaustiveModel;

    fn create_model(&self, name: &str) -> Result<Self::Model, MipError> {
        Ok(ExhaustiveModel::new(name))
    }
}

/// A model solved by complete enumeration.
///
/// Lazy rows added by callbacks persist across [`MipModel::optimize`] calls.
/// Adding columns or rows discards the previous outcome.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveModel {
    name: String,
    variables: Vec<Variable>,
    rows: Vec<(String, LinearConstraint)>,
    lazy_rows: Vec<LinearConstraint>,
    sense: Sense,
    lazy_enabled: bool,
    time_limit: Option<Duration>,
    start: Option<Vec<f64>>,
    outcome: Option<Outcome>,
}

impl ExhaustiveModel {
    /// An empty minimisation model.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Named rows registered with [`MipModel::add_constraint`].
    #[must_use]
    pub fn constraints(&self) -> &[(String, LinearConstraint)] {
        &self.rows
    }

    /// Lazy rows collected from callbacks so far.
    #[must_use]
    pub fn lazy_constraints(&self) -> &[LinearConstraint] {
        &self.lazy_rows
    }

    /// Registered columns.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn outcome(&self) -> Result<&Outcome, MipError> {
        self.outcome.as_ref().ok_or(MipError::NotOptimised)
    }

    fn check_row(&self, name: &str, constraint: &LinearConstraint) -> Result<(), MipError> {
        if constraint.indices.len() != constraint.coefficients.len() {
            return Err(MipError::MalformedRow {
                name: name.to_owned(),
                indices: constraint.indices.len(),
                coefficients: constraint.coefficients.len(),
            });
        }
        match constraint.max_index() {
            Some(index) if index >= self.variables.len() => Err(MipError::UnknownColumn {
                index,
                count: self.variables.len(),
            }),
            _ => Ok(()),
        }
    }
}

fn has_values(variable: &Variable) -> bool {
    match variable.var_type {
        VarType::Continuous => variable.lower <= variable.upper,
        VarType::Binary => variable.lower.max(0.0).ceil() <= variable.upper.min(1.0).floor(),
    }
}

impl MipModel for ExhaustiveModel {
    fn add_var(&mut self, variable: Variable) -> Result<usize, MipError> {
        if !has_values(&variable) {
            return Err(MipError::EmptyBounds {
                name: variable.name,
                lower: variable.lower,
                upper: variable.upper,
            });
        }
        self.outcome = None;
        self.variables.push(variable);
        Ok(self.variables.len() - 1)
    }

    fn add_constraint(
        &mut self,
        name: &str,
        constraint: LinearConstraint,
    ) -> Result<(), MipError> {
        self.check_row(name, &constraint)?;
        self.outcome = None;
        self.rows.push((name.to_owned(), constraint));
        Ok(())
    }

    fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    fn set_lazy_constraints(&mut self, enabled: bool) {
        self.lazy_enabled = enabled;
    }

    fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    fn set_start(&mut self, values: &[f64]) -> Result<(), MipError> {
        if values.len() != self.variables.len() {
            return Err(MipError::DimensionMismatch {
                expected: self.variables.len(),
                actual: values.len(),
            });
        }
        self.start = Some(values.to_vec());
        Ok(())
    }

    fn optimize(&mut self, callback: Option<&mut dyn MipCallback>) -> Result<(), MipError> {
        let deadline = self.time_limit.map(|limit| Instant::now() + limit);
        let rows = self
            .rows
            .iter()
            .map(|(_, row)| row.clone())
            .chain(self.lazy_rows.iter().cloned())
            .collect();
        let mut search = Search::new(
            self.variables.clone(),
            rows,
            self.sense,
            self.lazy_enabled,
            deadline,
        );
        let mut callback = callback;
        let result = search.run(self.start.take(), &mut callback);
        log::debug!(
            "model {}: explored {} nodes, {} lazy rows added",
            self.name,
            search.nodes_explored(),
            search.new_lazy_rows().len()
        );
        self.lazy_rows.extend_from_slice(search.new_lazy_rows());
        let outcome = search.into_outcome(result.is_err());
        self.outcome = Some(outcome);
        result
    }

    fn status(&self) -> Result<MipStatus, MipError> {
        self.outcome().map(|outcome| outcome.status)
    }

    fn objective_value(&self) -> Result<f64, MipError> {
        self.outcome()?
            .incumbent
            .as_ref()
            .map(|incumbent| incumbent.objective)
            .ok_or(MipError::NoSolution)
    }

    fn objective_bound(&self) -> Result<f64, MipError> {
        self.outcome().map(|outcome| outcome.bound)
    }

    fn solution(&self) -> Result<Vec<f64>, MipError> {
        self.outcome()?
            .incumbent
            .as_ref()
            .map(|incumbent| incumbent.values.clone())
            .ok_or(MipError::NoSolution)
    }

    fn solution_count(&self) -> usize {
        self.outcome.as_ref().map_or(0, |outcome| outcome.solutions)
    }

    fn var_count(&self) -> usize {
        self.variables.len()
    }
}

#[cfg(test)]
mod tests;
