use crate::basis::Basis;
use crate::matrix::{dot, SingularMatrix};
use crate::pivot::PivotSelector;
use crate::report::{Note, ReportSink};
use crate::standard::StandardForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    One,
    Two,
}

/// How a phase ended. Unbounded and the iteration cap are statuses for the
/// controller to map; a singular basis matrix is propagated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseOutcome {
    Converged,
    Unbounded,
    IterationLimit,
}

/// The shared per-phase iteration loop: inversion, pricing, ratio test,
/// pivot, update. Both phases run the same loop; only the cost vector, the
/// phase flag, and Phase 1's early feasibility exit differ.
pub(crate) struct PhaseLoop<'a> {
    pub form: &'a mut StandardForm,
    pub basis: &'a mut Basis,
    pub selector: &'a mut PivotSelector,
    pub costs: &'a [f64],
    pub phase: Phase,
    /// Iteration counter shared by both phases of one solve.
    pub iterations: &'a mut usize,
    pub max_iterations: usize,
}

impl PhaseLoop<'_> {
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> Result<PhaseOutcome, SingularMatrix> {
        loop {
            *self.iterations += 1;
            let iteration = *self.iterations;
            if iteration > self.max_iterations {
                sink.note(Note::IterationLimit);
                return Ok(PhaseOutcome::IterationLimit);
            }

            sink.note(Note::Iteration {
                number: iteration,
                phase: self.phase,
            });
            sink.table(&self.form.variable_names(), &self.form.values);
            sink.names("x_b", &self.basis.basic_names(self.form));
            sink.names("x_n", &self.basis.non_basic_names(self.form));

            let b_inv = self.basis.basic_matrix(self.form).inverse()?;
            let x_b = b_inv.mul_vec(&self.form.rhs);
            sink.matrix("B^-1", &b_inv);
            sink.vector("x_b", &x_b);

            // p = c_b · B⁻¹, then price the non-basic columns.
            let c_b: Vec<f64> = self.basis.basic().iter().map(|&i| self.costs[i]).collect();
            let multipliers = b_inv.vec_mul(&c_b);
            let reduced: Vec<f64> = self
                .basis
                .non_basic()
                .iter()
                .map(|&j| self.costs[j] - dot(&multipliers, &self.form.matrix.column(j)))
                .collect();
            sink.vector("c_r", &reduced);

            let Some(enter) = self.selector.entering(&reduced, iteration) else {
                sink.note(Note::OptimumReached);
                return Ok(PhaseOutcome::Converged);
            };
            let entering = self.basis.non_basic()[enter.index];
            sink.note(Note::EnteringChosen {
                variable: self.form.variables[entering].name.clone(),
            });
            if enter.tied {
                sink.note(Note::EnteringTie);
            }

            sink.note(Note::Direction);
            let direction = b_inv.mul_vec(&self.form.matrix.column(entering));
            sink.vector("y", &direction);
            if direction.iter().all(|&y| y <= 0.0) {
                sink.note(Note::UnboundedDirection);
                return Ok(PhaseOutcome::Unbounded);
            }

            sink.note(Note::RatioTest);
            let ratios: Vec<f64> = x_b
                .iter()
                .zip(&direction)
                .map(|(&x, &y)| if y > 0.0 { x / y } else { f64::INFINITY })
                .collect();
            sink.vector("ratio", &ratios);

            let leave = self.selector.leaving(&ratios, iteration);
            let leaving = self.basis.basic()[leave.index];
            sink.note(Note::LeavingChosen {
                variable: self.form.variables[leaving].name.clone(),
            });
            if leave.tied {
                sink.note(Note::LeavingTie);
            }

            // Pivot: move every basic value along the direction, bring the
            // entering variable in at the blocking ratio, swap the pair.
            let pivot_value = x_b[leave.index] / direction[leave.index];
            for (slot, &var) in self.basis.basic().iter().enumerate() {
                self.form.values[var] = x_b[slot] - pivot_value * direction[slot];
            }
            self.form.values[entering] = pivot_value;
            self.basis.swap(leave.index, enter.index);

            // Phase 1 stops as soon as feasibility is reached, not at
            // auxiliary-objective optimality.
            if self.phase == Phase::One && !self.basis.contains_artificial(self.form) {
                sink.note(Note::FeasibleBasisReached);
                return Ok(PhaseOutcome::Converged);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::LpProblem;
    use crate::report::NullSink;
    use crate::standard::standardize;

    fn run(
        problem: &LpProblem,
        costs: Vec<f64>,
        max_iterations: usize,
    ) -> (PhaseOutcome, StandardForm, Basis, usize) {
        let mut form = standardize(problem);
        let mut basis = Basis::phase_two(&form);
        let mut selector = PivotSelector::new();
        let mut iterations = 0;
        let outcome = PhaseLoop {
            form: &mut form,
            basis: &mut basis,
            selector: &mut selector,
            costs: &costs,
            phase: Phase::Two,
            iterations: &mut iterations,
            max_iterations,
        }
        .run(&mut NullSink)
        .unwrap();
        (outcome, form, basis, iterations)
    }

    #[test]
    fn converges_on_a_bounded_problem() {
        // max 3x + 5y; x + y <= 4; 2x + 3y <= 9 (internal minimize form)
        let problem = LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 1.0], vec![2.0, 3.0]],
            true,
            vec![4.0, 9.0],
            None,
        )
        .unwrap();
        let costs = vec![-3.0, -5.0, 0.0, 0.0];
        let (outcome, form, basis, iterations) = run(&problem, costs, 100);

        assert_eq!(outcome, PhaseOutcome::Converged);
        assert_eq!(iterations, 2);
        assert_eq!(basis.basic_names(&form), vec!["s_1", "x2"]);
        assert_eq!(form.values, vec![0.0, 3.0, 1.0, 0.0]);
    }

    #[test]
    fn detects_an_unbounded_direction() {
        // max x + y; x - y <= 1; -x + y <= 1
        let problem = LpProblem::from_parts(
            vec![1.0, 1.0],
            vec![vec![1.0, -1.0], vec![-1.0, 1.0]],
            true,
            vec![1.0, 1.0],
            None,
        )
        .unwrap();
        let costs = vec![-1.0, -1.0, 0.0, 0.0];
        let (outcome, _, _, _) = run(&problem, costs, 100);
        assert_eq!(outcome, PhaseOutcome::Unbounded);
    }

    #[test]
    fn stops_at_the_iteration_cap() {
        let problem = LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 1.0], vec![2.0, 3.0]],
            true,
            vec![4.0, 9.0],
            None,
        )
        .unwrap();
        let costs = vec![-3.0, -5.0, 0.0, 0.0];
        let (outcome, _, _, iterations) = run(&problem, costs, 1);
        assert_eq!(outcome, PhaseOutcome::IterationLimit);
        assert_eq!(iterations, 2);
    }
}
