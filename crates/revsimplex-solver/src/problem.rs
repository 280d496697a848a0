use crate::matrix::Matrix;
use crate::standard::StandardizationError;
use thiserror::Error;

/// Constraint relation as supplied by the parser collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (≤)
    Le,
    /// Equal (=)
    Eq,
    /// Greater than or equal (≥)
    Ge,
}

impl Relation {
    /// Parses the textual symbol of a constraint row. Unrecognized symbols
    /// fail fast here, before any solving starts.
    pub fn from_symbol(symbol: &str) -> Result<Self, StandardizationError> {
        match symbol {
            "<=" | "≤" => Ok(Relation::Le),
            "=" => Ok(Relation::Eq),
            ">=" | "≥" => Ok(Relation::Ge),
            other => Err(StandardizationError::UnknownRelation(other.to_string())),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Le => "<=",
            Relation::Eq => "=",
            Relation::Ge => ">=",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("duplicate variable name `{0}`")]
    DuplicateVariable(String),
    #[error("objective has {got} coefficients for {expected} variables")]
    ObjectiveLength { got: usize, expected: usize },
    #[error("constraint row {row} has {got} coefficients for {expected} variables")]
    RowLength {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("{got} right-hand-side values for {expected} constraint rows")]
    RhsLength { got: usize, expected: usize },
    #[error("{got} relation symbols for {expected} constraint rows")]
    RelationCount { got: usize, expected: usize },
}

/// A linear program in the normalized form the parser collaborator emits:
/// named decision variables, an objective vector, a dense constraint
/// matrix, one relation and right-hand side per row. All decision
/// variables are implicitly non-negative.
#[derive(Debug, Clone)]
pub struct LpProblem {
    pub variables: Vec<String>,
    pub objective: Vec<f64>,
    pub constraint_matrix: Matrix,
    pub relations: Vec<Relation>,
    pub rhs: Vec<f64>,
    pub maximize: bool,
}

impl LpProblem {
    /// Validates mutual consistency of all fields and builds the problem.
    /// Shape violations are rejected here, never inside the solver.
    pub fn new(
        variables: Vec<String>,
        objective: Vec<f64>,
        constraint_rows: Vec<Vec<f64>>,
        relations: Vec<Relation>,
        rhs: Vec<f64>,
        maximize: bool,
    ) -> Result<Self, ProblemError> {
        let n = variables.len();
        for (i, name) in variables.iter().enumerate() {
            if variables[..i].contains(name) {
                return Err(ProblemError::DuplicateVariable(name.clone()));
            }
        }
        if objective.len() != n {
            return Err(ProblemError::ObjectiveLength {
                got: objective.len(),
                expected: n,
            });
        }
        for (row, coefficients) in constraint_rows.iter().enumerate() {
            if coefficients.len() != n {
                return Err(ProblemError::RowLength {
                    row,
                    got: coefficients.len(),
                    expected: n,
                });
            }
        }
        let m = constraint_rows.len();
        if rhs.len() != m {
            return Err(ProblemError::RhsLength {
                got: rhs.len(),
                expected: m,
            });
        }
        if relations.len() != m {
            return Err(ProblemError::RelationCount {
                got: relations.len(),
                expected: m,
            });
        }

        Ok(Self {
            variables,
            objective,
            constraint_matrix: Matrix::from_rows(constraint_rows, n),
            relations,
            rhs,
            maximize,
        })
    }

    /// Builds a problem straight from numeric arrays, auto-naming the
    /// decision variables `x1..xn`. When `relations` is `None` every row is
    /// taken as `<=`.
    pub fn from_parts(
        objective: Vec<f64>,
        constraint_rows: Vec<Vec<f64>>,
        maximize: bool,
        rhs: Vec<f64>,
        relations: Option<Vec<Relation>>,
    ) -> Result<Self, ProblemError> {
        let variables = (1..=objective.len()).map(|i| format!("x{i}")).collect();
        let relations = relations.unwrap_or_else(|| vec![Relation::Le; constraint_rows.len()]);
        Self::new(variables, objective, constraint_rows, relations, rhs, maximize)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_symbols_round_trip() {
        assert_eq!(Relation::from_symbol("<=").unwrap(), Relation::Le);
        assert_eq!(Relation::from_symbol("≥").unwrap(), Relation::Ge);
        assert_eq!(Relation::from_symbol("=").unwrap(), Relation::Eq);
    }

    #[test]
    fn unknown_relation_fails_fast() {
        let err = Relation::from_symbol("!=").unwrap_err();
        assert_eq!(
            err,
            StandardizationError::UnknownRelation("!=".to_string())
        );
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let err = LpProblem::new(
            vec!["x".into(), "y".into()],
            vec![1.0],
            vec![],
            vec![],
            vec![],
            true,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProblemError::ObjectiveLength {
                got: 1,
                expected: 2
            }
        );

        let err = LpProblem::new(
            vec!["x".into()],
            vec![1.0],
            vec![vec![1.0]],
            vec![Relation::Le],
            vec![],
            true,
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::RhsLength { got: 0, expected: 1 });
    }

    #[test]
    fn duplicate_variables_are_rejected() {
        let err = LpProblem::new(
            vec!["x".into(), "x".into()],
            vec![1.0, 1.0],
            vec![],
            vec![],
            vec![],
            false,
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::DuplicateVariable("x".to_string()));
    }

    #[test]
    fn from_parts_names_variables() {
        let problem = LpProblem::from_parts(
            vec![3.0, 5.0],
            vec![vec![1.0, 1.0]],
            true,
            vec![4.0],
            None,
        )
        .unwrap();
        assert_eq!(problem.variables, vec!["x1", "x2"]);
        assert_eq!(problem.relations, vec![Relation::Le]);
    }
}
