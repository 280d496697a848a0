use std::collections::BTreeMap;

use thiserror::Error;

use crate::basis::Basis;
use crate::iterate::{Phase, PhaseLoop, PhaseOutcome};
use crate::matrix::{dot, SingularMatrix};
use crate::pivot::PivotSelector;
use crate::problem::LpProblem;
use crate::report::{Note, NullSink, ReportSink};
use crate::solution::{Solution, SolveStatus};
use crate::standard::{standardize, StandardForm, VarKind};

/// Fatal solver failures. Business outcomes (infeasible, unbounded, the
/// iteration cap) are reported through [`SolveStatus`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    NumericalSingularity(#[from] SingularMatrix),
}

/// Two-phase revised simplex engine. One instance owns one problem's
/// mutable basis state; `reload` fully resets it for reuse. Pivot selection
/// is deterministic, so identical input always yields identical status,
/// values, and basis.
#[derive(Debug, Clone)]
pub struct RevisedSimplex {
    problem: LpProblem,
    form: Option<StandardForm>,
    basis: Option<Basis>,
    selector: PivotSelector,
    iterations: usize,
    status: SolveStatus,
    max_iterations: usize,
    tolerance: f64,
}

impl RevisedSimplex {
    pub fn new(problem: LpProblem) -> Self {
        Self {
            problem,
            form: None,
            basis: None,
            selector: PivotSelector::new(),
            iterations: 0,
            status: SolveStatus::Unset,
            max_iterations: 100,
            tolerance: 1e-9,
        }
    }

    /// Iteration cap shared by both phases; a cycling guard, not a
    /// convergence proof.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Tolerance for the feasibility checks after each phase.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Replaces the loaded problem and resets all iteration, degeneracy,
    /// and basis state.
    pub fn reload(&mut self, problem: LpProblem) {
        self.problem = problem;
        self.reset();
    }

    fn reset(&mut self) {
        self.form = None;
        self.basis = None;
        self.selector.reset();
        self.iterations = 0;
        self.status = SolveStatus::Unset;
    }

    /// Runs the two-phase method without narration.
    pub fn solve(&mut self) -> Result<SolveStatus, SolveError> {
        self.solve_with_report(&mut NullSink)
    }

    /// Runs the two-phase method, narrating every step to the report
    /// collaborator in temporal order.
    pub fn solve_with_report(
        &mut self,
        sink: &mut dyn ReportSink,
    ) -> Result<SolveStatus, SolveError> {
        self.reset();

        sink.section(Note::ProblemStatement);
        sink.matrix("A", &self.problem.constraint_matrix);
        sink.vector("c", &self.problem.objective);
        sink.vector("b", &self.problem.rhs);

        let mut form = standardize(&self.problem);
        sink.note(Note::Standardization);
        sink.matrix("A", &form.matrix);
        sink.table(&form.variable_names(), &form.values);

        // Maximization is minimized internally; the reported optimum comes
        // from the untouched user objective.
        let mut internal_costs = self.problem.objective.clone();
        if self.problem.maximize {
            for cost in &mut internal_costs {
                *cost = -*cost;
            }
            sink.note(Note::CostNegatedForMaximization);
            sink.vector("c", &internal_costs);
        }

        let mut from_phase_one = false;
        let mut basis;

        if form.num_artificial > 0 {
            sink.page_break();
            sink.section(Note::PhaseOne);
            let mut costs = vec![0.0; form.total()];
            for (i, variable) in form.variables.iter().enumerate() {
                if variable.kind == VarKind::Artificial {
                    costs[i] = 1.0;
                }
            }
            sink.note(Note::ArtificialCosts);
            sink.table(&form.variable_names(), &costs);

            basis = Basis::phase_one(&form);
            sink.note(Note::InitialBasis);
            sink.names("x_b", &basis.basic_names(&form));
            sink.names("x_n", &basis.non_basic_names(&form));

            let outcome = PhaseLoop {
                form: &mut form,
                basis: &mut basis,
                selector: &mut self.selector,
                costs: &costs,
                phase: Phase::One,
                iterations: &mut self.iterations,
                max_iterations: self.max_iterations,
            }
            .run(sink)?;

            match outcome {
                PhaseOutcome::Unbounded => {
                    return Ok(self.finish(form, basis, SolveStatus::Unbounded, sink));
                }
                PhaseOutcome::IterationLimit => {
                    return Ok(self.finish(form, basis, SolveStatus::MaxIterationsExceeded, sink));
                }
                PhaseOutcome::Converged => {}
            }

            if self.phase_one_infeasible(&form, &basis) {
                return Ok(self.finish(form, basis, SolveStatus::InfeasiblePhase1, sink));
            }

            sink.note(Note::PhaseOneComplete);
            sink.table(&form.variable_names(), &form.values);
            basis.strip_artificials(&form);
            form.strip_artificials();
            from_phase_one = true;
        } else {
            basis = Basis::phase_two(&form);
        }

        sink.page_break();
        sink.section(Note::PhaseTwo);
        if from_phase_one {
            sink.note(Note::PhaseOneCarriedBasis);
        } else {
            sink.note(Note::PhaseOneSkipped);
        }
        sink.names("x_b", &basis.basic_names(&form));
        sink.names("x_n", &basis.non_basic_names(&form));

        // Objective extended with zeros for the slack columns.
        let mut costs = internal_costs;
        costs.resize(form.total(), 0.0);

        let outcome = PhaseLoop {
            form: &mut form,
            basis: &mut basis,
            selector: &mut self.selector,
            costs: &costs,
            phase: Phase::Two,
            iterations: &mut self.iterations,
            max_iterations: self.max_iterations,
        }
        .run(sink)?;

        let status = match outcome {
            PhaseOutcome::Unbounded => SolveStatus::Unbounded,
            PhaseOutcome::IterationLimit => SolveStatus::MaxIterationsExceeded,
            PhaseOutcome::Converged => {
                if form.values.iter().any(|&v| v < -self.tolerance) {
                    SolveStatus::InfeasiblePhase2
                } else if self.selector.degenerate_iterations().is_empty() {
                    SolveStatus::Optimal
                } else {
                    SolveStatus::Degenerate
                }
            }
        };
        Ok(self.finish(form, basis, status, sink))
    }

    /// Infeasible after Phase 1 when an artificial is still basic or still
    /// carries a non-zero value.
    fn phase_one_infeasible(&self, form: &StandardForm, basis: &Basis) -> bool {
        basis.contains_artificial(form)
            || form
                .values
                .iter()
                .zip(&form.variables)
                .any(|(&value, variable)| {
                    variable.kind == VarKind::Artificial && value.abs() > self.tolerance
                })
    }

    fn finish(
        &mut self,
        form: StandardForm,
        basis: Basis,
        status: SolveStatus,
        sink: &mut dyn ReportSink,
    ) -> SolveStatus {
        sink.section(Note::Conclusion);
        if matches!(status, SolveStatus::Optimal | SolveStatus::Degenerate) {
            sink.table(&form.variable_names(), &form.values);
            sink.names("x_b", &basis.basic_names(&form));
            sink.names("x_n", &basis.non_basic_names(&form));
        }
        self.form = Some(form);
        self.basis = Some(basis);
        self.status = status;
        sink.outcome(status, self.objective_value());
        status
    }

    /// Objective value at the current variable values, in the user's sense
    /// (maximization values are not negated).
    pub fn objective_value(&self) -> f64 {
        match &self.form {
            Some(form) => dot(
                &self.problem.objective,
                &form.values[..self.problem.num_variables()],
            ),
            None => 0.0,
        }
    }

    /// Final value of every surviving variable (decision and slack);
    /// artificial variables never appear.
    pub fn get_solution(&self) -> BTreeMap<String, f64> {
        match &self.form {
            Some(form) => form
                .variables
                .iter()
                .zip(&form.values)
                .filter(|(variable, _)| variable.kind != VarKind::Artificial)
                .map(|(variable, &value)| (variable.name.clone(), value))
                .collect(),
            None => BTreeMap::new(),
        }
    }

    /// Final ordered basic variable names; empty before any solve.
    pub fn basis(&self) -> Vec<String> {
        match (&self.form, &self.basis) {
            (Some(form), Some(basis)) => basis.basic_names(form),
            _ => Vec::new(),
        }
    }

    /// Final ordered non-basic variable names; empty before any solve.
    pub fn non_basis(&self) -> Vec<String> {
        match (&self.form, &self.basis) {
            (Some(form), Some(basis)) => basis.non_basic_names(form),
            _ => Vec::new(),
        }
    }

    /// Iteration numbers at which a degeneracy (tie) was observed, over
    /// both phases.
    pub fn degenerate_iterations(&self) -> Vec<usize> {
        self.selector.degenerate_iterations().iter().copied().collect()
    }

    /// Summarizes the finished solve.
    pub fn solution(&self) -> Solution {
        Solution {
            status: self.status,
            values: self.get_solution(),
            basis: self.basis(),
            non_basis: self.non_basis(),
            objective_value: self.objective_value(),
            degenerate_iterations: self.degenerate_iterations(),
        }
    }
}
