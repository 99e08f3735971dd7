use rand::Rng;

use crate::graph::GraphModel;

/// Roulette wheel over the nodes an ant may move to next.
///
/// `bounds[k]` is the right edge of the half-open interval owned by
/// `candidates[k]`; the left edge is the previous bound (or 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    candidates: Vec<usize>,
    bounds: Vec<f64>,
}

impl Distribution {
    fn from_weights(weighted: Vec<(usize, f64)>) -> Self {
        let total: f64 = weighted.iter().map(|&(_, w)| w).sum();
        let mut candidates = Vec::with_capacity(weighted.len());
        let mut bounds = Vec::with_capacity(weighted.len());
        let mut right = 0.0;
        for (node, weight) in weighted {
            right += weight / total;
            candidates.push(node);
            bounds.push(right);
        }
        // Prefix sums can fall a few ulps short of 1.
        if let Some(last) = bounds.last_mut() {
            *last = 1.0;
        }
        Distribution { candidates, bounds }
    }

    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// Probability mass assigned to `node`; 0 for anything not on the wheel.
    pub fn probability(&self, node: usize) -> f64 {
        match self.candidates.iter().position(|&c| c == node) {
            Some(0) => self.bounds[0],
            Some(k) => self.bounds[k] - self.bounds[k - 1],
            None => 0.0,
        }
    }

    /// `[left, right)` interval owned by `node`.
    pub fn interval(&self, node: usize) -> Option<(f64, f64)> {
        let k = self.candidates.iter().position(|&c| c == node)?;
        let left = if k == 0 { 0.0 } else { self.bounds[k - 1] };
        Some((left, self.bounds[k]))
    }

    /// Node whose interval contains `r`.
    pub fn select(&self, r: f64) -> Option<usize> {
        let k = self.bounds.partition_point(|&right| right <= r);
        self.candidates.get(k).copied()
    }
}

/// Probabilistic next-node choice driven by pheromone times closeness.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule<'a> {
    graph: &'a GraphModel,
}

impl<'a> TransitionRule<'a> {
    pub fn new(graph: &'a GraphModel) -> Self {
        TransitionRule { graph }
    }

    pub fn desirability(&self, current: usize, next: usize) -> f64 {
        self.graph.pheromone(current, next) * self.graph.closeness(current, next)
    }

    pub fn distribution(&self, current: usize, visited: &[bool]) -> Distribution {
        let open: Vec<usize> = (0..self.graph.node_count())
            .filter(|&k| k != current && !visited[k])
            .collect();

        let weighted: Vec<(usize, f64)> = open
            .iter()
            .map(|&k| (k, self.desirability(current, k)))
            .filter(|&(_, d)| d > 0.0)
            .collect();
        let denominator: f64 = weighted.iter().map(|&(_, d)| d).sum();

        if denominator > 0.0 && denominator.is_finite() {
            Distribution::from_weights(weighted)
        } else {
            // Pheromone has underflowed on every remaining edge.
            Distribution::from_weights(open.into_iter().map(|k| (k, 1.0)).collect())
        }
    }

    /// Picks the next node for a draw `r` in `[0, 1)`.
    ///
    /// Panics if no candidate owns `r`, which means the caller asked for a
    /// move when every node was already visited.
    pub fn choose_with(&self, current: usize, visited: &[bool], r: f64) -> usize {
        let distribution = self.distribution(current, visited);
        distribution.select(r).unwrap_or_else(|| {
            panic!(
                "no transition interval from node {current} contains {r} (candidates: {:?})",
                distribution.candidates()
            )
        })
    }

    pub fn choose<R: Rng>(&self, current: usize, visited: &[bool], rng: &mut R) -> usize {
        let r = rng.random::<f64>();
        self.choose_with(current, visited, r)
    }
}
