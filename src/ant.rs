use rand::Rng;

use crate::graph::GraphModel;
use crate::transition::TransitionRule;

/// A closed route: every node once, then the start node again.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    route: Vec<usize>,
    length: f64,
}

impl Tour {
    pub fn new(route: Vec<usize>, graph: &GraphModel) -> Self {
        assert!(
            is_closed_permutation(&route, graph.node_count()),
            "tour {route:?} does not visit all {} nodes exactly once",
            graph.node_count()
        );
        let length = graph.route_length(&route);
        Tour { route, length }
    }

    pub fn route(&self) -> &[usize] {
        &self.route
    }

    pub fn start(&self) -> usize {
        self.route[0]
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Directed edges in travel order, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.route.windows(2).map(|w| (w[0], w[1]))
    }
}

pub fn is_closed_permutation(route: &[usize], n: usize) -> bool {
    if route.len() != n + 1 || route.first() != route.last() {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in &route[..n] {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntState {
    Traveling,
    Done,
}

pub struct Ant {
    route: Vec<usize>,
    visited: Vec<bool>,
    start_node: usize,
    current_node: usize,
    state: AntState,
}

impl Ant {
    pub fn new(start_node: usize, num_nodes: usize) -> Self {
        Ant {
            route: Vec::with_capacity(num_nodes + 1),
            visited: vec![false; num_nodes],
            start_node,
            current_node: start_node,
            state: AntState::Traveling,
        }
    }

    pub fn state(&self) -> AntState {
        self.state
    }

    pub fn current_node(&self) -> usize {
        self.current_node
    }

    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    /// Settles on the current node and, unless that finished the tour, picks the next one.
    pub fn step<R: Rng>(&mut self, rule: &TransitionRule, rng: &mut R) -> AntState {
        if self.state == AntState::Done {
            return self.state;
        }

        self.visited[self.current_node] = true;
        self.route.push(self.current_node);

        if self.visited.iter().all(|&v| v) {
            self.route.push(self.start_node);
            self.state = AntState::Done;
        } else {
            self.current_node = rule.choose(self.current_node, &self.visited, rng);
        }
        self.state
    }

    pub fn run<R: Rng>(mut self, graph: &GraphModel, rng: &mut R) -> Tour {
        let rule = TransitionRule::new(graph);
        while self.step(&rule, rng) == AntState::Traveling {}
        Tour::new(self.route, graph)
    }
}
