use crate::matrix::Matrix;
use crate::standard::{StandardForm, VarKind};

/// Ordered basic/non-basic partition of the standard-form variable table,
/// held as permanent integer indexes. `basic[i]` corresponds to column `i`
/// of the basis matrix B; the pairing is updated atomically on every pivot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    basic: Vec<usize>,
    non_basic: Vec<usize>,
}

impl Basis {
    /// Initial Phase-1 partition: each row is represented by its slack when
    /// that slack starts at a non-zero value (a pure `<=` row), otherwise by
    /// the row's artificial. Leftover artificials fill any remaining slots
    /// in declaration order; a slot still open after that falls back to the
    /// row's zero-valued slack.
    pub fn phase_one(form: &StandardForm) -> Self {
        let m = form.rhs.len();
        let mut slots: Vec<Option<usize>> = Vec::with_capacity(m);
        for row in 0..m {
            let live_slack = form.slack_of_row[row].filter(|&s| form.values[s] != 0.0);
            if let Some(s) = live_slack {
                slots.push(Some(s));
            } else if let Some(a) = form.artificial_of_row[row] {
                slots.push(Some(a));
            } else {
                slots.push(None);
            }
        }

        let taken: Vec<usize> = slots.iter().flatten().copied().collect();
        let mut leftovers = (0..form.total())
            .filter(|&i| form.variables[i].kind == VarKind::Artificial && !taken.contains(&i));
        for (row, slot) in slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = leftovers.next().or(form.slack_of_row[row]);
            }
        }

        let basic: Vec<usize> = slots.into_iter().flatten().collect();
        debug_assert_eq!(basic.len(), m);
        Self::with_complement(basic, form.total())
    }

    /// Initial Phase-2 partition when Phase 1 was skipped: every slack is
    /// basic, every decision variable non-basic. Only valid when the form
    /// carries no artificials.
    pub fn phase_two(form: &StandardForm) -> Self {
        let basic: Vec<usize> = (0..form.total())
            .filter(|&i| form.variables[i].kind == VarKind::Slack)
            .collect();
        Self::with_complement(basic, form.total())
    }

    fn with_complement(basic: Vec<usize>, total: usize) -> Self {
        let non_basic: Vec<usize> = (0..total).filter(|i| !basic.contains(i)).collect();
        Self { basic, non_basic }
    }

    pub fn basic(&self) -> &[usize] {
        &self.basic
    }

    pub fn non_basic(&self) -> &[usize] {
        &self.non_basic
    }

    /// Selects the basic columns of the constraint matrix, in basis order.
    pub fn basic_matrix(&self, form: &StandardForm) -> Matrix {
        form.matrix.select_columns(&self.basic)
    }

    /// Exchanges the entering and leaving variables between the two lists at
    /// their matching positions.
    pub fn swap(&mut self, basic_slot: usize, non_basic_slot: usize) {
        std::mem::swap(
            &mut self.basic[basic_slot],
            &mut self.non_basic[non_basic_slot],
        );
    }

    pub fn contains_artificial(&self, form: &StandardForm) -> bool {
        self.basic.iter().any(|&i| form.is_artificial(i))
    }

    /// Removes artificial indexes from the non-basic list after Phase 1.
    /// Artificial columns are the trailing ones, so the surviving indexes
    /// stay valid once the form is stripped.
    pub fn strip_artificials(&mut self, form: &StandardForm) {
        debug_assert!(!self.contains_artificial(form));
        self.non_basic.retain(|&i| !form.is_artificial(i));
    }

    pub fn basic_names(&self, form: &StandardForm) -> Vec<String> {
        self.basic
            .iter()
            .map(|&i| form.variables[i].name.clone())
            .collect()
    }

    pub fn non_basic_names(&self, form: &StandardForm) -> Vec<String> {
        self.non_basic
            .iter()
            .map(|&i| form.variables[i].name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{LpProblem, Relation};
    use crate::standard::standardize;

    #[test]
    fn phase_one_prefers_live_slacks_over_artificials() {
        // x + y >= 4; x <= 3; x + 2y = 5 → vars [x, y, s_1, s_2, a_1, a_3]
        let problem = LpProblem::new(
            vec!["x".into(), "y".into()],
            vec![1.0, 1.0],
            vec![vec![1.0, 1.0], vec![1.0, 0.0], vec![1.0, 2.0]],
            vec![Relation::Ge, Relation::Le, Relation::Eq],
            vec![4.0, 3.0, 5.0],
            false,
        )
        .unwrap();
        let form = standardize(&problem);
        let basis = Basis::phase_one(&form);

        // row 0 (>=) gets a_1, row 1 (<=) keeps s_2, row 2 (=) gets a_3
        assert_eq!(basis.basic(), &[4, 3, 5]);
        assert_eq!(basis.non_basic(), &[0, 1, 2]);
    }

    #[test]
    fn phase_two_uses_every_slack() {
        let problem = LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 1.0], vec![2.0, 3.0]],
            true,
            vec![4.0, 9.0],
            None,
        )
        .unwrap();
        let form = standardize(&problem);
        let basis = Basis::phase_two(&form);
        assert_eq!(basis.basic_names(&form), vec!["s_1", "s_2"]);
        assert_eq!(basis.non_basic_names(&form), vec!["x1", "x2"]);
    }

    #[test]
    fn swap_exchanges_matching_positions() {
        let problem = LpProblem::from_parts(
            vec![1.0, 1.0],
            vec![vec![1.0, 1.0]],
            true,
            vec![2.0],
            None,
        )
        .unwrap();
        let form = standardize(&problem);
        let mut basis = Basis::phase_two(&form);
        basis.swap(0, 1);
        assert_eq!(basis.basic(), &[1]);
        assert_eq!(basis.non_basic(), &[0, 2]);
    }

    #[test]
    fn basic_matrix_follows_basis_order() {
        let problem = LpProblem::new(
            vec!["x".into()],
            vec![1.0],
            vec![vec![2.0], vec![3.0]],
            vec![Relation::Le, Relation::Le],
            vec![4.0, 6.0],
            true,
        )
        .unwrap();
        let form = standardize(&problem);
        let basis = Basis::phase_two(&form);
        let b = basis.basic_matrix(&form);
        assert_eq!(b.column(0), vec![1.0, 0.0]);
        assert_eq!(b.column(1), vec![0.0, 1.0]);
    }
}
