use std::collections::BTreeSet;

/// Outcome of one entering or leaving selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub index: usize,
    /// More than one candidate achieved the minimum.
    pub tied: bool,
}

/// Deterministic entering/leaving selection with degeneracy bookkeeping.
/// Ties are broken by first occurrence in array order; a tie is recorded as
/// a degeneracy event keyed by the iteration number, at most once per
/// iteration. The events never change pivoting behavior.
#[derive(Debug, Clone, Default)]
pub struct PivotSelector {
    degenerate: BTreeSet<usize>,
}

impl PivotSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.degenerate.clear();
    }

    /// Dantzig rule over the non-basic reduced costs: the most negative
    /// entry enters. `None` means no negative entry exists and the current
    /// phase is locally optimal.
    pub fn entering(&mut self, reduced_costs: &[f64], iteration: usize) -> Option<Choice> {
        let mut min_value = 0.0;
        let mut min_index = None;
        for (j, &cost) in reduced_costs.iter().enumerate() {
            if cost < 0.0 && (min_index.is_none() || cost < min_value) {
                min_value = cost;
                min_index = Some(j);
            }
        }
        let index = min_index?;
        let tied = reduced_costs.iter().filter(|&&c| c == min_value).count() > 1;
        if tied {
            self.degenerate.insert(iteration);
        }
        Some(Choice { index, tied })
    }

    /// Minimum-ratio test. The caller guards unboundedness first, so at
    /// least one ratio is finite.
    pub fn leaving(&mut self, ratios: &[f64], iteration: usize) -> Choice {
        debug_assert!(!ratios.is_empty());
        let mut min_value = ratios[0];
        let mut min_index = 0;
        for (i, &ratio) in ratios.iter().enumerate().skip(1) {
            if ratio < min_value {
                min_value = ratio;
                min_index = i;
            }
        }
        let tied = ratios.iter().filter(|&&r| r == min_value).count() > 1;
        if tied {
            self.degenerate.insert(iteration);
        }
        Choice {
            index: min_index,
            tied,
        }
    }

    /// Iteration numbers at which a tie was observed, for the whole solve.
    pub fn degenerate_iterations(&self) -> &BTreeSet<usize> {
        &self.degenerate
    }
}
