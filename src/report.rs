use core::fmt;
use std::time::Duration;

/// The three frontier strategies a run can use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// FIFO expansion, equivalent to Dijkstra's algorithm under unit edge cost.
    Dijkstra,
    AStar,
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::GreedyBestFirst,
    ];

    /// Fixed-width tag used at the front of a report line.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "[ Dijkstra ]",
            Algorithm::AStar => "[    A*    ]",
            Algorithm::GreedyBestFirst => "[Greedy BFS]",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::GreedyBestFirst => "Greedy BFS",
        })
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Found,
    /// The frontier emptied without reaching the finish.
    Exhausted,
    /// The running flag was cleared before the search finished.
    Cancelled,
    /// No start or no finish cell was painted; nothing was searched.
    MissingEndpoints,
}

/// Summary of a single run. Built once when the run ends and never changed.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    /// Cells taken off the frontier and expanded. The start always counts.
    /// Popping the finish ends the search rather than expanding it, so it is
    /// not counted, and a run that never starts reports 0 rather than 1.
    pub nodes_explored: usize,
    /// Steps from start to finish along the reconstructed path, 0 if none.
    pub path_length: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn missing_endpoints(algorithm: Algorithm) -> RunReport {
        RunReport {
            algorithm,
            outcome: Outcome::MissingEndpoints,
            nodes_explored: 0,
            path_length: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The one-line summary shown to the user after a run.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.outcome {
            Outcome::Found => write!(
                f,
                "{} visited {} nodes, path length = {}, time taken = {:.3}s",
                self.algorithm.label(),
                self.nodes_explored,
                self.path_length,
                self.elapsed_seconds()
            ),
            Outcome::Exhausted | Outcome::Cancelled => f.write_str("path not found"),
            Outcome::MissingEndpoints => f.write_str("start/finish cell not placed"),
        }
    }
}
