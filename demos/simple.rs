use hungarian::{CostMatrix, Playback, PlaybackState, Solver, SolverConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[rustfmt::skip]
    let costs = CostMatrix::from_row_slice(3, 3, &[
        9., 2., 7.,
        6., 4., 3.,
        5., 8., 1.,
    ])?;

    let solver = Solver::new(SolverConfig::default().with_steps(true));
    let solution = solver.solve(&costs)?;
    let steps = solution.steps().unwrap_or_default();

    let mut playback = Playback::new(steps);
    playback.start()?;
    while playback.state() == PlaybackState::Running {
        let step = playback.step()?;
        println!("{}: {} lines{}", step.phase(), step.lines(), step.matrix());
    }

    for (worker, job) in solution.pairs() {
        println!("{worker} -> {job}");
    }
    println!("cost: {}", solution.cost());
    Ok(())
}
