use log::{debug, info, trace};
use rand::Rng;

use crate::ant::{Ant, Tour};
use crate::config::Config;
use crate::error::AcoResult;
use crate::graph::{GraphModel, Node};

/// Colony state handed to observers after each pheromone update.
#[derive(Debug, Clone, Copy)]
pub struct IterationSnapshot<'a> {
    pub iteration: usize,
    pub graph: &'a GraphModel,
    pub tours: &'a [Tour],
}

/// One round of the colony: one ant per start node, then one batched pheromone update.
#[derive(Debug, Clone, Copy)]
pub struct ColonyIteration {
    pub evaporation_factor: f64,
    pub pheromone_deposit: f64,
}

impl ColonyIteration {
    pub fn from_config(config: &Config) -> Self {
        ColonyIteration {
            evaporation_factor: config.evaporation_factor,
            pheromone_deposit: config.pheromone_deposit,
        }
    }

    /// Every ant reads the graph as it stood when the round began.
    pub fn construct_tours<R: Rng>(&self, graph: &GraphModel, rng: &mut R) -> Vec<Tour> {
        (0..graph.node_count())
            .map(|start| {
                let tour = Ant::new(start, graph.node_count()).run(graph, rng);
                trace!("ant {start}: {:?} length {:.3}", tour.route(), tour.length());
                tour
            })
            .collect()
    }

    pub fn update_pheromone(&self, graph: &mut GraphModel, tours: &[Tour]) {
        graph.evaporate_all(self.evaporation_factor);

        for tour in tours {
            let deposit = self.pheromone_deposit / tour.length();
            for (from, to) in tour.edges() {
                graph.reinforce(from, to, deposit);
            }
        }
    }

    pub fn run<R: Rng>(&self, graph: &mut GraphModel, rng: &mut R) -> Vec<Tour> {
        let tours = self.construct_tours(graph, rng);
        self.update_pheromone(graph, &tours);
        tours
    }
}

/// Follows the strongest outgoing pheromone from `start` until every node is visited.
///
/// Ties go to the lowest node id, so the same matrix always gives the same route.
pub fn greedy_walk(graph: &GraphModel, start: usize) -> Vec<usize> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);
    let mut current = start;

    loop {
        visited[current] = true;
        route.push(current);

        let mut best: Option<(usize, f64)> = None;
        for next in 0..n {
            if visited[next] {
                continue;
            }
            let pheromone = graph.pheromone(current, next);
            if best.is_none_or(|(_, p)| pheromone > p) {
                best = Some((next, pheromone));
            }
        }

        match best {
            Some((next, _)) => current = next,
            None => break,
        }
    }
    route
}

#[derive(Debug, Clone)]
pub struct Solution {
    /// Greedy route over the final pheromone matrix; `n` ids, start first.
    pub route: Vec<usize>,
    /// Closed length of `route`.
    pub route_length: f64,
    /// Shortest ant tour seen in any iteration.
    pub best_tour: Option<Tour>,
}

pub struct Colony {
    graph: GraphModel,
    iteration: ColonyIteration,
    iteration_count: usize,
    start_node: usize,
}

impl Colony {
    pub fn new(nodes: &[Node], config: &Config) -> AcoResult<Self> {
        config.validate(nodes.len())?;
        let graph = GraphModel::new(nodes, config.closeness_scale, config.initial_pheromone)?;
        Ok(Colony {
            graph,
            iteration: ColonyIteration::from_config(config),
            iteration_count: config.iteration_count,
            start_node: config.start_node,
        })
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn greedy_route(&self) -> Vec<usize> {
        greedy_walk(&self.graph, self.start_node)
    }

    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Solution {
        self.run_with(rng, |_| {})
    }

    pub fn run_with<R, F>(&mut self, rng: &mut R, mut observer: F) -> Solution
    where
        R: Rng,
        F: FnMut(&IterationSnapshot),
    {
        info!(
            "Running {} iterations over {} nodes",
            self.iteration_count,
            self.graph.node_count()
        );

        let mut best_tour: Option<Tour> = None;

        for iteration in 0..self.iteration_count {
            let tours = self.iteration.run(&mut self.graph, rng);

            let lengths = tours.iter().map(Tour::length);
            let mean = lengths.clone().sum::<f64>() / tours.len() as f64;
            let shortest = lengths.fold(f64::INFINITY, f64::min);
            debug!("Iter {iteration}: shortest {shortest:.2}, mean {mean:.2}");

            for tour in &tours {
                if best_tour.as_ref().is_none_or(|b| tour.length() < b.length()) {
                    best_tour = Some(tour.clone());
                }
            }

            observer(&IterationSnapshot {
                iteration,
                graph: &self.graph,
                tours: &tours,
            });
        }

        let route = self.greedy_route();
        let mut closed = route.clone();
        closed.push(self.start_node);
        let route_length = self.graph.route_length(&closed);
        info!("Greedy route {route:?} length {route_length:.2}");

        Solution {
            route,
            route_length,
            best_tour,
        }
    }
}

pub fn solve_aco<R: Rng>(
    nodes: &[Node],
    config: &Config,
    rng: &mut R,
) -> AcoResult<Solution> {
    let mut colony = Colony::new(nodes, config)?;
    Ok(colony.run(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ant::is_closed_permutation;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new(2.0, 2.0),
            Node::new(9.0, 13.0),
            Node::new(2.0, 9.0),
            Node::new(9.0, 5.0),
            Node::new(6.0, 4.0),
            Node::new(4.0, 14.0),
            Node::new(11.0, 10.0),
        ]
    }

    fn graph() -> GraphModel {
        GraphModel::new(&nodes(), 200.0, 0.2).unwrap()
    }

    #[test]
    fn one_ant_per_start_node() {
        let graph = graph();
        let step = ColonyIteration::from_config(&Config::default());
        let tours = step.construct_tours(&graph, &mut StdRng::seed_from_u64(3));
        assert_eq!(tours.len(), 7);
        for (start, tour) in tours.iter().enumerate() {
            assert_eq!(tour.start(), start);
            assert!(is_closed_permutation(tour.route(), 7));
        }
    }

    #[test]
    fn construction_leaves_pheromone_untouched() {
        let graph = graph();
        let before = graph.clone();
        ColonyIteration::from_config(&Config::default())
            .construct_tours(&graph, &mut StdRng::seed_from_u64(5));
        for i in 0..7 {
            for j in 0..7 {
                assert_eq!(graph.pheromone(i, j), before.pheromone(i, j));
            }
        }
    }

    #[test]
    fn deposit_uses_each_tours_own_length() {
        let mut graph = graph();
        let short = Tour::new(vec![0, 4, 3, 6, 1, 5, 2, 0], &graph);
        let long = Tour::new(vec![0, 1, 4, 5, 3, 2, 6, 0], &graph);
        assert!(short.length() < long.length());

        let step = ColonyIteration {
            evaporation_factor: 0.5,
            pheromone_deposit: 4.0,
        };
        step.update_pheromone(&mut graph, &[short.clone(), long.clone()]);

        // 0 -> 4 is only on the short tour, 0 -> 1 only on the long one.
        let expected_short = 0.1 + 4.0 / short.length();
        let expected_long = 0.1 + 4.0 / long.length();
        assert!((graph.pheromone(0, 4) - expected_short).abs() < 1e-12);
        assert!((graph.pheromone(0, 1) - expected_long).abs() < 1e-12);
        // The reverse directions were not travelled.
        assert!((graph.pheromone(4, 0) - 0.1).abs() < 1e-12);
        assert!((graph.pheromone(3, 3) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn travelled_edges_end_above_evaporation_alone() {
        let mut graph = graph();
        let step = ColonyIteration::from_config(&Config::default());
        let tours = step.run(&mut graph, &mut StdRng::seed_from_u64(11));

        let evaporated = 0.2 * 0.67;
        let mut travelled = vec![vec![false; 7]; 7];
        for tour in &tours {
            for (from, to) in tour.edges() {
                travelled[from][to] = true;
            }
        }
        for i in 0..7 {
            for j in 0..7 {
                if travelled[i][j] {
                    assert!(graph.pheromone(i, j) > evaporated);
                } else {
                    assert!((graph.pheromone(i, j) - evaporated).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn greedy_walk_follows_strongest_pheromone() {
        let mut graph = graph();
        graph.reinforce(0, 3, 1.0);
        graph.reinforce(3, 6, 1.0);
        graph.reinforce(6, 3, 5.0); // already visited, must be ignored
        graph.reinforce(6, 5, 1.0);

        let route = greedy_walk(&graph, 0);
        assert_eq!(&route[..4], &[0, 3, 6, 5]);
        // Remaining pheromone is uniform, so ties go to the lowest id.
        assert_eq!(&route[4..], &[1, 2, 4]);
        assert_eq!(greedy_walk(&graph, 0), route);
    }

    #[test]
    fn colony_runs_every_iteration_and_reports_a_full_route() {
        let config = Config {
            iteration_count: 12,
            ..Config::default()
        };
        let mut colony = Colony::new(&nodes(), &config).unwrap();
        let mut seen = Vec::new();
        let solution = colony.run_with(&mut StdRng::seed_from_u64(2024), |snapshot| {
            assert_eq!(snapshot.tours.len(), 7);
            seen.push(snapshot.iteration);
        });

        assert_eq!(seen, (0..12).collect::<Vec<_>>());
        assert_eq!(solution.route.len(), 7);
        assert_eq!(solution.route[0], 0);
        let mut closed = solution.route.clone();
        closed.push(0);
        assert!(is_closed_permutation(&closed, 7));
        assert!(solution.route_length > 0.0);
        assert_eq!(colony.greedy_route(), solution.route);

        let best = solution.best_tour.unwrap();
        assert!(is_closed_permutation(best.route(), 7));
        assert!(best.length() > 0.0);
    }

    #[test]
    fn colony_rejects_inconsistent_configuration() {
        let config = Config {
            node_count: Some(5),
            ..Config::default()
        };
        assert!(Colony::new(&nodes(), &config).is_err());
    }

    #[test]
    fn zero_iterations_walks_the_initial_matrix() {
        let config = Config {
            iteration_count: 0,
            ..Config::default()
        };
        let solution = solve_aco(&nodes(), &config, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(solution.route, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(solution.best_tour.is_none());
    }
}
