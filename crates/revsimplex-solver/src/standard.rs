use crate::matrix::Matrix;
use crate::problem::{LpProblem, Relation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandardizationError {
    #[error("unrecognized constraint relation `{0}`")]
    UnknownRelation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Decision,
    Slack,
    Artificial,
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
}

/// The problem in standard equality form: the original columns extended
/// with slack columns (row order) and then artificial columns (row order),
/// plus a value vector parallel to the full variable table. The column
/// order is load-bearing: initial-basis construction relies on every row
/// having exactly one added variable whose initial value equals its rhs.
#[derive(Debug, Clone)]
pub struct StandardForm {
    pub variables: Vec<Variable>,
    pub matrix: Matrix,
    pub rhs: Vec<f64>,
    pub values: Vec<f64>,
    pub num_decision: usize,
    pub num_slack: usize,
    pub num_artificial: usize,
    /// Index of each row's slack variable, if the row has one.
    pub slack_of_row: Vec<Option<usize>>,
    /// Index of each row's artificial variable, if the row has one.
    pub artificial_of_row: Vec<Option<usize>>,
}

impl StandardForm {
    pub fn total(&self) -> usize {
        self.variables.len()
    }

    pub fn is_artificial(&self, index: usize) -> bool {
        self.variables[index].kind == VarKind::Artificial
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Drops every artificial variable from the table, the matrix, and the
    /// value vector. Only valid after a successful Phase 1, when no
    /// artificial is basic.
    pub fn strip_artificials(&mut self) {
        let keep = self.num_decision + self.num_slack;
        self.variables.truncate(keep);
        self.values.truncate(keep);
        self.matrix.truncate_columns(keep);
        self.num_artificial = 0;
        for entry in &mut self.artificial_of_row {
            *entry = None;
        }
    }
}

/// Appends slack and artificial columns per row relation:
/// `<=` gets a +1 slack valued at rhs, `>=` a -1 slack valued 0 plus a +1
/// artificial valued at rhs, `=` a +1 artificial valued at rhs.
pub fn standardize(problem: &LpProblem) -> StandardForm {
    let m = problem.num_constraints();
    let n = problem.num_variables();

    let mut variables: Vec<Variable> = problem
        .variables
        .iter()
        .map(|name| Variable {
            name: name.clone(),
            kind: VarKind::Decision,
        })
        .collect();
    let mut matrix = problem.constraint_matrix.clone();
    let mut values = vec![0.0; n];
    let mut slack_of_row = vec![None; m];
    let mut artificial_of_row = vec![None; m];

    // Slack columns first, in row order.
    for (row, relation) in problem.relations.iter().enumerate() {
        let coefficient = match relation {
            Relation::Le => 1.0,
            Relation::Ge => -1.0,
            Relation::Eq => continue,
        };
        slack_of_row[row] = Some(variables.len());
        variables.push(Variable {
            name: format!("s_{}", row + 1),
            kind: VarKind::Slack,
        });
        let mut column = vec![0.0; m];
        column[row] = coefficient;
        matrix.push_column(&column);
        values.push(if coefficient > 0.0 {
            problem.rhs[row]
        } else {
            0.0
        });
    }
    let num_slack = variables.len() - n;

    // Then artificial columns, in row order.
    for (row, relation) in problem.relations.iter().enumerate() {
        if matches!(relation, Relation::Le) {
            continue;
        }
        artificial_of_row[row] = Some(variables.len());
        variables.push(Variable {
            name: format!("a_{}", row + 1),
            kind: VarKind::Artificial,
        });
        let mut column = vec![0.0; m];
        column[row] = 1.0;
        matrix.push_column(&column);
        values.push(problem.rhs[row]);
    }
    let num_artificial = variables.len() - n - num_slack;

    StandardForm {
        variables,
        matrix,
        rhs: problem.rhs.clone(),
        values,
        num_decision: n,
        num_slack,
        num_artificial,
        slack_of_row,
        artificial_of_row,
    }
}
