use crate::iterate::Phase;
use crate::matrix::Matrix;
use crate::solution::SolveStatus;

/// Narration moments emitted during a solve. The core stays
/// language-agnostic: a writer maps each note to whatever prose or markup
/// it wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    ProblemStatement,
    Standardization,
    CostNegatedForMaximization,
    PhaseOne,
    ArtificialCosts,
    InitialBasis,
    PhaseOneSkipped,
    PhaseOneCarriedBasis,
    PhaseOneComplete,
    FeasibleBasisReached,
    PhaseTwo,
    Iteration { number: usize, phase: Phase },
    EnteringChosen { variable: String },
    EnteringTie,
    OptimumReached,
    Direction,
    RatioTest,
    UnboundedDirection,
    LeavingChosen { variable: String },
    LeavingTie,
    IterationLimit,
    Conclusion,
}

/// Ordered semantic write calls from the core to a report-writer
/// collaborator. The core never emits markup; labels are plain math
/// symbols and all language/typeset concerns live in the implementation.
pub trait ReportSink {
    fn section(&mut self, note: Note);
    fn note(&mut self, note: Note);
    fn matrix(&mut self, label: &str, matrix: &Matrix);
    fn vector(&mut self, label: &str, values: &[f64]);
    fn names(&mut self, label: &str, names: &[String]);
    /// A one-row value table keyed by variable names.
    fn table(&mut self, headers: &[String], values: &[f64]);
    fn outcome(&mut self, status: SolveStatus, objective: f64);
    fn page_break(&mut self);
}

/// Discards everything; used by the non-narrated solve path.
#[derive(Debug, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn section(&mut self, _note: Note) {}
    fn note(&mut self, _note: Note) {}
    fn matrix(&mut self, _label: &str, _matrix: &Matrix) {}
    fn vector(&mut self, _label: &str, _values: &[f64]) {}
    fn names(&mut self, _label: &str, _names: &[String]) {}
    fn table(&mut self, _headers: &[String], _values: &[f64]) {}
    fn outcome(&mut self, _status: SolveStatus, _objective: f64) {}
    fn page_break(&mut self) {}
}

/// One recorded write call, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Section(Note),
    Note(Note),
    Matrix { label: String, rows: Vec<Vec<f64>> },
    Vector { label: String, values: Vec<f64> },
    Names { label: String, names: Vec<String> },
    Table { headers: Vec<String>, values: Vec<f64> },
    Outcome { status: SolveStatus, objective: f64 },
    PageBreak,
}

/// Captures the full transcript for tests and programmatic consumers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ReportEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> Vec<&Note> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Section(n) | ReportEvent::Note(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for RecordingSink {
    fn section(&mut self, note: Note) {
        self.events.push(ReportEvent::Section(note));
    }

    fn note(&mut self, note: Note) {
        self.events.push(ReportEvent::Note(note));
    }

    fn matrix(&mut self, label: &str, matrix: &Matrix) {
        self.events.push(ReportEvent::Matrix {
            label: label.to_string(),
            rows: matrix.to_rows(),
        });
    }

    fn vector(&mut self, label: &str, values: &[f64]) {
        self.events.push(ReportEvent::Vector {
            label: label.to_string(),
            values: values.to_vec(),
        });
    }

    fn names(&mut self, label: &str, names: &[String]) {
        self.events.push(ReportEvent::Names {
            label: label.to_string(),
            names: names.to_vec(),
        });
    }

    fn table(&mut self, headers: &[String], values: &[f64]) {
        self.events.push(ReportEvent::Table {
            headers: headers.to_vec(),
            values: values.to_vec(),
        });
    }

    fn outcome(&mut self, status: SolveStatus, objective: f64) {
        self.events.push(ReportEvent::Outcome { status, objective });
    }

    fn page_break(&mut self) {
        self.events.push(ReportEvent::PageBreak);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_preserves_call_order() {
        let mut sink = RecordingSink::new();
        sink.section(Note::ProblemStatement);
        sink.vector("b", &[1.0, 2.0]);
        sink.page_break();
        sink.outcome(SolveStatus::Optimal, 3.0);

        assert_eq!(
            sink.events,
            vec![
                ReportEvent::Section(Note::ProblemStatement),
                ReportEvent::Vector {
                    label: "b".to_string(),
                    values: vec![1.0, 2.0],
                },
                ReportEvent::PageBreak,
                ReportEvent::Outcome {
                    status: SolveStatus::Optimal,
                    objective: 3.0,
                },
            ]
        );
    }
}
