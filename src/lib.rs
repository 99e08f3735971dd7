pub mod ant;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;
pub mod report;
pub mod solver;
pub mod transition;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use crate::ant::{Ant, AntState, Tour};
pub use crate::config::Config;
pub use crate::error::{AcoError, AcoResult};
pub use crate::graph::{GraphModel, Node, Ridge};
pub use crate::solver::{Colony, ColonyIteration, IterationSnapshot, Solution, greedy_walk, solve_aco};
pub use crate::transition::{Distribution, TransitionRule};

pub fn run(config: &Config) -> AcoResult<Solution> {
    let nodes = match &config.file_path {
        Some(path) => parser::load_nodes(path)?,
        None => parser::default_nodes(),
    };

    let mut colony = Colony::new(&nodes, config)?;
    info!(
        "Loaded {} nodes (C = {}, Q = {}, evaporation = {}, initial pheromone = {})",
        nodes.len(),
        config.closeness_scale,
        config.pheromone_deposit,
        config.evaporation_factor,
        config.initial_pheromone
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let solution = colony.run_with(&mut rng, |snapshot| {
        if config.show_matrices {
            println!("{}", report::iteration_report(snapshot));
        }
    });

    if let Some(best) = &solution.best_tour {
        println!(
            "Best ant tour: {} (length {:.2})",
            report::format_route(best.route()),
            best.length()
        );
    }
    println!(
        "OPTIMAL WAY: {} (length {:.2})",
        report::format_route(&solution.route),
        solution.route_length
    );

    Ok(solution)
}
