/// Fuzzes the three searches on many random grids: a path is found exactly when
/// the finish shares a connected component with the start, the two optimal
/// searches agree on its length and greedy best-first never beats them.
use grid_visualizer::*;
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng, density: f64) -> PathingGrid {
    let mut grid = PathingGrid::new(n, n).unwrap();
    for row in 1..n - 1 {
        for col in 1..n - 1 {
            if rng.gen_bool(density) {
                grid.set_state(row, col, CellState::Barrier).unwrap();
            }
        }
    }
    grid.set_state(1, 1, CellState::Start).unwrap();
    grid.set_state(n - 2, n - 2, CellState::Finish).unwrap();
    grid
}

#[test]
fn fuzz() {
    const N: usize = 12;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut pathfinder = Pathfinder::new(random_grid(N, &mut rng, 0.1));
        let start = pathfinder.grid.find_state(CellState::Start).unwrap();
        let finish = pathfinder.grid.find_state(CellState::Finish).unwrap();
        let reachable = pathfinder.grid.reachable(start, finish);
        let interior = pathfinder.grid.interior_len();

        let reports: Vec<RunReport> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| pathfinder.run(algorithm, &mut Headless).unwrap())
            .collect();
        for report in &reports {
            if report.found() != reachable {
                println!("{}", pathfinder.grid);
            }
            assert_eq!(report.found(), reachable);
            assert!(report.nodes_explored >= 1 && report.nodes_explored <= interior);
        }
        if reachable {
            let (dijkstra, astar, greedy) = (&reports[0], &reports[1], &reports[2]);
            assert_eq!(dijkstra.path_length, astar.path_length);
            assert!(greedy.path_length >= astar.path_length);
            assert!(astar.path_length >= 2 * (N - 3));
        } else {
            for report in &reports {
                assert_eq!(report.outcome, Outcome::Exhausted);
                assert_eq!(report.nodes_explored, pathfinder.grid.region_size(start));
            }
        }
    }
}

fn run_recording(pathfinder: &mut Pathfinder, algorithm: Algorithm) -> (RunReport, Vec<CellId>) {
    let mut expanded = Vec::new();
    let report = pathfinder
        .run(algorithm, &mut |event: &StepEvent, _: &PathingGrid| {
            if let StepEvent::Expanded(id) = event {
                expanded.push(*id);
            }
            Signal::Continue
        })
        .unwrap();
    (report, expanded)
}

#[test]
fn repeated_runs_are_deterministic() {
    const N: usize = 15;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut pathfinder = Pathfinder::new(random_grid(N, &mut rng, 0.1));
        for algorithm in Algorithm::ALL {
            let (first, first_expanded) = run_recording(&mut pathfinder, algorithm);
            let states = pathfinder.grid.states();
            let (second, second_expanded) = run_recording(&mut pathfinder, algorithm);
            assert_eq!(first.outcome, second.outcome);
            assert_eq!(first.nodes_explored, second.nodes_explored);
            assert_eq!(first.path_length, second.path_length);
            assert_eq!(first_expanded.len(), first.nodes_explored);
            assert_eq!(first_expanded, second_expanded);
            assert_eq!(pathfinder.grid.states(), states);
        }
    }
}

#[test]
fn found_paths_are_connected() {
    const N: usize = 20;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let mut pathfinder = Pathfinder::new(random_grid(N, &mut rng, 0.1));
        for algorithm in Algorithm::ALL {
            let report = pathfinder.run(algorithm, &mut Headless).unwrap();
            if !report.found() {
                continue;
            }
            let path = pathfinder.path().unwrap();
            assert_eq!(path.len(), report.path_length + 1);
            assert_eq!(pathfinder.grid.count_state(CellState::Path), report.path_length - 1);
            for pair in path.windows(2) {
                assert!(pathfinder.grid[pair[0]].neighbours().contains(&pair[1]));
            }
        }
    }
}

/// Cancelling at a random step always leaves only the painted cells behind.
#[test]
fn cancel_at_random_step() {
    const N: usize = 15;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let mut pathfinder = Pathfinder::new(random_grid(N, &mut rng, 0.1));
        let before = pathfinder.grid.states();
        let stop_after = rng.gen_range(1..30);
        for algorithm in Algorithm::ALL {
            let stop = pathfinder.flag();
            let mut steps = 0;
            let report = pathfinder
                .run(algorithm, &mut |event: &StepEvent, _: &PathingGrid| {
                    if matches!(event, StepEvent::Expanded(_)) {
                        steps += 1;
                        if steps == stop_after {
                            stop.stop();
                        }
                    }
                    Signal::Continue
                })
                .unwrap();
            if report.outcome == Outcome::Cancelled {
                assert_eq!(report.nodes_explored, stop_after);
                assert_eq!(pathfinder.grid.states(), before);
            }
            assert!(!pathfinder.is_running());
            pathfinder.grid.reset_transient_state();
        }
    }
}
