mod basis;
mod iterate;
mod matrix;
mod pivot;
mod problem;
mod report;
mod solution;
mod solver;
mod standard;

pub use basis::Basis;
pub use iterate::Phase;
pub use matrix::{Matrix, SingularMatrix};
pub use pivot::{Choice, PivotSelector};
pub use problem::{LpProblem, ProblemError, Relation};
pub use report::{Note, NullSink, RecordingSink, ReportEvent, ReportSink};
pub use solution::{Solution, SolveStatus};
pub use solver::{RevisedSimplex, SolveError};
pub use standard::{standardize, StandardForm, StandardizationError, VarKind, Variable};
