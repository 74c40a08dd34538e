use hungarian::{CostMatrix, Solver};

const ASSIGNMENT_SIZE: usize = 64;
const N: usize = 100;

fn main() -> hungarian::Result<()> {
    let solver = Solver::default();
    let mut total_cost = 0.;
    for _ in 0..N {
        let costs = CostMatrix::from(nalgebra::DMatrix::<f64>::new_random(
            ASSIGNMENT_SIZE,
            ASSIGNMENT_SIZE,
        ));
        total_cost += solver.solve(&costs)?.cost();
    }

    println!("total: {total_cost}");
    Ok(())
}
