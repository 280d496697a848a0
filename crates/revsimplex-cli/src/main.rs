use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

use revsimplex_solver::{
    LpProblem, Matrix, Note, Phase, Relation, ReportSink, RevisedSimplex, SolveStatus,
};

#[derive(Parser)]
#[command(name = "revsimplex")]
#[command(about = "Two-phase revised simplex solver for linear programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the solution
    Solve {
        /// JSON file describing the problem
        file: PathBuf,
        /// Narrate every iteration of both phases
        #[arg(short, long)]
        steps: bool,
        /// Emit the solution summary as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Validate a problem file and print its shape
    Check {
        /// The file to check
        file: PathBuf,
    },
}

/// On-disk problem record: the normalized form the parser collaborator
/// produces. Relations are textual symbols so input errors surface through
/// the solver's own taxonomy.
#[derive(Deserialize)]
struct ProblemFile {
    #[serde(default)]
    variables: Option<Vec<String>>,
    objective: Vec<f64>,
    maximize: bool,
    constraints: Vec<ConstraintEntry>,
}

#[derive(Deserialize)]
struct ConstraintEntry {
    coefficients: Vec<f64>,
    relation: String,
    rhs: f64,
}

impl ProblemFile {
    fn into_problem(self) -> Result<LpProblem, String> {
        let mut rows = Vec::with_capacity(self.constraints.len());
        let mut relations = Vec::with_capacity(self.constraints.len());
        let mut rhs = Vec::with_capacity(self.constraints.len());
        for entry in self.constraints {
            relations.push(Relation::from_symbol(&entry.relation).map_err(|e| e.to_string())?);
            rows.push(entry.coefficients);
            rhs.push(entry.rhs);
        }
        let problem = match self.variables {
            Some(variables) => {
                LpProblem::new(variables, self.objective, rows, relations, rhs, self.maximize)
                    .map_err(|e| e.to_string())?
            }
            None => {
                LpProblem::from_parts(self.objective, rows, self.maximize, rhs, Some(relations))
                    .map_err(|e| e.to_string())?
            }
        };
        Ok(problem)
    }
}

fn load_problem(file: &PathBuf) -> LpProblem {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };
    let parsed: ProblemFile = match serde_json::from_str(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };
    match parsed.into_problem() {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Invalid problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { file, steps, json } => {
            let problem = load_problem(&file);
            let mut solver = RevisedSimplex::new(problem);

            let result = if steps {
                solver.solve_with_report(&mut TextReport)
            } else {
                solver.solve()
            };
            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    eprintln!("Solver error: {}", e);
                    std::process::exit(1);
                }
            };

            if json {
                match serde_json::to_string_pretty(&solver.solution()) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Serialization error: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            match status {
                SolveStatus::Optimal | SolveStatus::Degenerate => {
                    println!("Status: {}", status);
                    println!("Objective: {:.4}", solver.objective_value());
                    println!();
                    println!("Solution:");
                    for (name, value) in solver.get_solution() {
                        println!("  {:12} {:12.6}", name, value);
                    }
                    println!();
                    println!("Basis: [{}]", solver.basis().join(", "));
                    if status == SolveStatus::Degenerate {
                        let points: Vec<String> = solver
                            .degenerate_iterations()
                            .iter()
                            .map(|i| i.to_string())
                            .collect();
                        println!("Degenerate at iterations: {}", points.join(", "));
                    }
                }
                SolveStatus::Unbounded => {
                    println!("Status: {}", status);
                    println!("The objective can be improved without bound.");
                    std::process::exit(1);
                }
                SolveStatus::InfeasiblePhase1 | SolveStatus::InfeasiblePhase2 => {
                    println!("Status: {}", status);
                    println!("No feasible point satisfies every constraint.");
                    std::process::exit(1);
                }
                SolveStatus::MaxIterationsExceeded => {
                    println!("Status: {}", status);
                    println!("The iteration cap was reached before a conclusion.");
                    std::process::exit(1);
                }
                SolveStatus::Unset => unreachable!("solve always sets a terminal status"),
            }
        }
        Commands::Check { file } => {
            let problem = load_problem(&file);
            println!("✓ {} is valid", file.display());
            println!("  {} variables", problem.num_variables());
            println!("  {} constraints", problem.num_constraints());
            println!(
                "  sense: {}",
                if problem.maximize { "maximize" } else { "minimize" }
            );
        }
    }
}

/// Renders the solver's semantic report calls as plain English text. All
/// language choices live here, outside the core.
struct TextReport;

impl TextReport {
    fn describe(note: &Note) -> String {
        match note {
            Note::ProblemStatement => "Problem".to_string(),
            Note::Standardization => {
                "Standardized with slack and artificial variables:".to_string()
            }
            Note::CostNegatedForMaximization => {
                "Maximization: the cost vector is negated and minimized internally.".to_string()
            }
            Note::PhaseOne => "Phase 1".to_string(),
            Note::ArtificialCosts => {
                "Auxiliary objective: unit cost on every artificial variable.".to_string()
            }
            Note::InitialBasis => "Initial feasible basis:".to_string(),
            Note::PhaseOneSkipped => {
                "No artificial variables; Phase 1 skipped, slack basis used.".to_string()
            }
            Note::PhaseOneCarriedBasis => {
                "Continuing from the Phase 1 basis, artificials removed.".to_string()
            }
            Note::PhaseOneComplete => "Phase 1 complete; the problem is feasible.".to_string(),
            Note::FeasibleBasisReached => {
                "No artificial variable remains basic; feasibility reached.".to_string()
            }
            Note::PhaseTwo => "Phase 2".to_string(),
            Note::Iteration { number, phase } => {
                let phase = match phase {
                    Phase::One => "phase 1",
                    Phase::Two => "phase 2",
                };
                format!("Iteration {} ({})", number, phase)
            }
            Note::EnteringChosen { variable } => {
                format!("Entering variable: {}", variable)
            }
            Note::EnteringTie => {
                "Tie among entering candidates; degeneracy recorded.".to_string()
            }
            Note::OptimumReached => {
                "No negative reduced cost; this phase is optimal.".to_string()
            }
            Note::Direction => "Direction along the entering column:".to_string(),
            Note::RatioTest => "Minimum-ratio test:".to_string(),
            Note::UnboundedDirection => {
                "The direction never blocks; the problem is unbounded.".to_string()
            }
            Note::LeavingChosen { variable } => {
                format!("Leaving variable: {}", variable)
            }
            Note::LeavingTie => "Tie in the ratio test; degeneracy recorded.".to_string(),
            Note::IterationLimit => "Maximum number of iterations exceeded.".to_string(),
            Note::Conclusion => "Conclusion".to_string(),
        }
    }
}

impl ReportSink for TextReport {
    fn section(&mut self, note: Note) {
        println!();
        println!("== {} ==", Self::describe(&note));
    }

    fn note(&mut self, note: Note) {
        println!("{}", Self::describe(&note));
    }

    fn matrix(&mut self, label: &str, matrix: &Matrix) {
        println!("{} =", label);
        for row in matrix.to_rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:10.4}", v)).collect();
            println!("  [{}]", cells.join(" "));
        }
    }

    fn vector(&mut self, label: &str, values: &[f64]) {
        let cells: Vec<String> = values.iter().map(|v| format!("{:.4}", v)).collect();
        println!("{} = [{}]", label, cells.join(", "));
    }

    fn names(&mut self, label: &str, names: &[String]) {
        println!("{}: [{}]", label, names.join(", "));
    }

    fn table(&mut self, headers: &[String], values: &[f64]) {
        let header_cells: Vec<String> = headers.iter().map(|h| format!("{:>10}", h)).collect();
        let value_cells: Vec<String> = values.iter().map(|v| format!("{:10.4}", v)).collect();
        println!("  {}", header_cells.join(" "));
        println!("  {}", value_cells.join(" "));
    }

    fn outcome(&mut self, status: SolveStatus, objective: f64) {
        println!("Status: {}", status);
        if matches!(status, SolveStatus::Optimal | SolveStatus::Degenerate) {
            println!("Objective value: {:.4}", objective);
        }
    }

    fn page_break(&mut self) {
        println!();
        println!("{}", "-".repeat(64));
    }
}
