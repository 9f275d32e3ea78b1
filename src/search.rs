use crate::backtrack::Backtrack;
use crate::cell::{CellId, CellState};
use crate::error::Quit;
use crate::pathing_grid::PathingGrid;
use crate::report::{Outcome, RunReport};
use crate::solver::FrontierStrategy;
use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared "a search is running" flag. A run raises it when it starts and
/// checks it before every expansion; whoever holds a clone can lower it with
/// [stop](RunningFlag::stop) to cancel the run at its next step.
#[derive(Clone, Debug, Default)]
pub struct RunningFlag(Arc<AtomicBool>);

impl RunningFlag {
    pub fn new() -> RunningFlag {
        RunningFlag::default()
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// What a single call to [Search::step] did. All cell state changes belonging
/// to the step are complete when it is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
    /// A cell was taken off the frontier and its neighbours admitted.
    Expanded(CellId),
    /// A cell on the reconstructed path was marked.
    Backtracked(CellId),
    /// The run is over. Further steps keep returning the same report.
    Finished(RunReport),
}

/// Answer of a [StepObserver] after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// Abandon the run and terminate; no report is produced.
    Quit,
}

/// Render and input hook called once per step by [Search::run].
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent, grid: &PathingGrid) -> Signal;
}

impl<F> StepObserver for F
where
    F: FnMut(&StepEvent, &PathingGrid) -> Signal,
{
    fn on_step(&mut self, event: &StepEvent, grid: &PathingGrid) -> Signal {
        self(event, grid)
    }
}

/// Observer that renders nothing and never quits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl StepObserver for Headless {
    fn on_step(&mut self, _: &StepEvent, _: &PathingGrid) -> Signal {
        Signal::Continue
    }
}

#[derive(Clone, Debug)]
enum Phase {
    Searching,
    Backtracking(Backtrack),
    Done(RunReport),
}

/// One run of a [FrontierStrategy] over a borrowed grid, advanced one
/// expansion at a time. Not calling [step](Search::step) pauses the run;
/// lowering the [RunningFlag] cancels it.
pub struct Search<'g, S: FrontierStrategy + ?Sized> {
    grid: &'g mut PathingGrid,
    strategy: &'g mut S,
    flag: RunningFlag,
    endpoints: Option<(CellId, CellId)>,
    nodes_explored: usize,
    started: Instant,
    elapsed: Duration,
    phase: Phase,
}

impl<'g, S: FrontierStrategy + ?Sized> Search<'g, S> {
    /// Scans the grid for its start and finish cells and prepares a run
    /// between them.
    pub fn new(
        grid: &'g mut PathingGrid,
        strategy: &'g mut S,
        flag: RunningFlag,
    ) -> Search<'g, S> {
        let start = grid.find_state(CellState::Start);
        let finish = grid.find_state(CellState::Finish);
        Search::with_endpoints(grid, strategy, flag, start, finish)
    }

    /// Prepares a run between explicit endpoints. If either is missing the
    /// grid is left untouched and the first step reports
    /// [Outcome::MissingEndpoints].
    pub fn with_endpoints(
        grid: &'g mut PathingGrid,
        strategy: &'g mut S,
        flag: RunningFlag,
        start: Option<CellId>,
        finish: Option<CellId>,
    ) -> Search<'g, S> {
        let algorithm = strategy.algorithm();
        let mut search = Search {
            grid,
            strategy,
            flag,
            endpoints: None,
            nodes_explored: 0,
            started: Instant::now(),
            elapsed: Duration::ZERO,
            phase: Phase::Done(RunReport::missing_endpoints(algorithm)),
        };
        let (Some(start), Some(finish)) = (start, finish) else {
            info!("{}: start/finish cell not placed", algorithm);
            return search;
        };
        if search.flag.is_running() {
            warn!("{} started while the running flag was already raised", algorithm);
        }
        search.grid.prepare_search();
        search.strategy.seed(search.grid, start, finish);
        if !search.grid.reachable(start, finish) {
            debug!(
                "Finish is not reachable, {} will exhaust a region of {} cells",
                algorithm,
                search.grid.region_size(start)
            );
        }
        info!(
            "{} search from ({}, {}) to ({}, {})",
            algorithm,
            search.grid[start].row(),
            search.grid[start].col(),
            search.grid[finish].row(),
            search.grid[finish].col()
        );
        search.endpoints = Some((start, finish));
        search.phase = Phase::Searching;
        search.flag.raise();
        search.started = Instant::now();
        search
    }

    pub fn grid(&self) -> &PathingGrid {
        self.grid
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    pub fn frontier_len(&self) -> usize {
        self.strategy.frontier_len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// The final report, once the run is over.
    pub fn report(&self) -> Option<&RunReport> {
        match &self.phase {
            Phase::Done(report) => Some(report),
            _ => None,
        }
    }

    /// Advances the run by one expansion, or by one path cell once the finish
    /// has been reached.
    pub fn step(&mut self) -> StepEvent {
        match &self.phase {
            Phase::Done(report) => StepEvent::Finished(report.clone()),
            Phase::Searching => self.expand(),
            Phase::Backtracking(_) => self.backtrack(),
        }
    }

    /// Steps until the run is over, handing every step to `observer`.
    pub fn run<O: StepObserver + ?Sized>(mut self, observer: &mut O) -> Result<RunReport, Quit> {
        loop {
            let event = self.step();
            if let StepEvent::Finished(report) = event {
                return Ok(report);
            }
            if observer.on_step(&event, self.grid) == Signal::Quit {
                self.flag.stop();
                return Err(Quit);
            }
        }
    }

    fn expand(&mut self) -> StepEvent {
        let Some((start, finish)) = self.endpoints else {
            return self.conclude(Outcome::MissingEndpoints);
        };
        if !self.flag.is_running() {
            debug!(
                "{} cancelled after {} expansions",
                self.strategy.algorithm(),
                self.nodes_explored
            );
            return self.conclude(Outcome::Cancelled);
        }
        let Some(current) = self.strategy.select(self.grid) else {
            return self.conclude(Outcome::Exhausted);
        };
        if current == finish {
            self.elapsed = self.started.elapsed();
            self.strategy.clear();
            self.grid.reset_transient_state();
            self.phase = Phase::Backtracking(Backtrack::new(self.grid, start, finish));
            return self.backtrack();
        }
        self.strategy.admit_neighbours(self.grid, current);
        if self.grid.state(current) != CellState::Start {
            self.grid.set_state_of(current, CellState::Visited);
        }
        self.nodes_explored += 1;
        trace!(
            "Expanded ({}, {}), {} queued",
            self.grid[current].row(),
            self.grid[current].col(),
            self.strategy.frontier_len()
        );
        StepEvent::Expanded(current)
    }

    fn backtrack(&mut self) -> StepEvent {
        let Phase::Backtracking(backtrack) = &mut self.phase else {
            return self.step();
        };
        match backtrack.step(self.grid) {
            Some(cell) => StepEvent::Backtracked(cell),
            None => self.conclude(Outcome::Found),
        }
    }

    /// Builds the report, lowers the flag and drops whatever the run left
    /// behind. Only a found path survives on the grid.
    fn conclude(&mut self, outcome: Outcome) -> StepEvent {
        let path_length = match &self.phase {
            Phase::Backtracking(backtrack) => backtrack.path_length(),
            _ => 0,
        };
        if outcome != Outcome::Found && outcome != Outcome::MissingEndpoints {
            self.elapsed = self.started.elapsed();
            self.strategy.clear();
            self.grid.prepare_search();
        }
        self.flag.stop();
        let report = RunReport {
            algorithm: self.strategy.algorithm(),
            outcome,
            nodes_explored: self.nodes_explored,
            path_length,
            elapsed: self.elapsed,
        };
        info!("{}", report);
        self.phase = Phase::Done(report.clone());
        StepEvent::Finished(report)
    }
}

/// A search dropped before it is done is abandoned: the flag is lowered and
/// nothing it queued or visited stays on the grid.
impl<'g, S: FrontierStrategy + ?Sized> Drop for Search<'g, S> {
    fn drop(&mut self) {
        if self.is_finished() {
            return;
        }
        debug!(
            "{} abandoned after {} expansions",
            self.strategy.algorithm(),
            self.nodes_explored
        );
        self.strategy.clear();
        self.grid.prepare_search();
        self.flag.stop();
    }
}
