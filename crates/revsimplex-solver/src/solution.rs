use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Terminal outcome of one solve. Every algorithmic outcome is a status
/// value, never an error, so callers handle all four outcome families
/// without exception-driven branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolveStatus {
    #[default]
    Unset,
    Optimal,
    Degenerate,
    Unbounded,
    InfeasiblePhase1,
    InfeasiblePhase2,
    MaxIterationsExceeded,
}

impl SolveStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SolveStatus::Unset)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SolveStatus::InfeasiblePhase1 | SolveStatus::InfeasiblePhase2
        )
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SolveStatus::Unset => "unset",
            SolveStatus::Optimal => "optimal",
            SolveStatus::Degenerate => "degenerate",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::InfeasiblePhase1 => "infeasible/phase_1",
            SolveStatus::InfeasiblePhase2 => "infeasible/phase_2",
            SolveStatus::MaxIterationsExceeded => "maximum_iterations_exceeded",
        };
        f.write_str(text)
    }
}

/// Snapshot of a finished solve: the surviving variable values (decision
/// and slack, artificials never appear), the final partition, and the
/// degeneracy diagnostics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    pub status: SolveStatus,
    pub values: BTreeMap<String, f64>,
    pub basis: Vec<String>,
    pub non_basis: Vec<String>,
    pub objective_value: f64,
    pub degenerate_iterations: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_identifies_infeasibility_phase() {
        assert_eq!(SolveStatus::InfeasiblePhase1.to_string(), "infeasible/phase_1");
        assert!(SolveStatus::InfeasiblePhase2.to_string().contains("infeasible"));
        assert!(SolveStatus::InfeasiblePhase1.is_infeasible());
        assert!(!SolveStatus::Optimal.is_infeasible());
    }

    #[test]
    fn unset_is_the_only_non_terminal_status() {
        assert!(!SolveStatus::Unset.is_terminal());
        assert!(SolveStatus::MaxIterationsExceeded.is_terminal());
        assert_eq!(SolveStatus::default(), SolveStatus::Unset);
    }
}
