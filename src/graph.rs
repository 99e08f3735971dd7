use crate::error::{AcoError, AcoResult};

fn euclidean_dist(n1: &Node, n2: &Node) -> f64 {
    let dx = n1.x - n2.x;
    let dy = n1.y - n2.y;
    dx.hypot(dy)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(x: f64, y: f64) -> Self {
        Node { x, y }
    }
}

/// State of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ridge {
    pub closeness: f64,
    pub pheromone: f64,
}

/// Closeness and pheromone for every ordered node pair, self-pairs included.
///
/// Closeness is fixed at construction. Pheromone only changes through
/// [`GraphModel::evaporate_all`] and [`GraphModel::reinforce`], and each
/// direction of an edge is tracked on its own.
#[derive(Debug, Clone)]
pub struct GraphModel {
    closeness_scale: f64,
    ridges: Vec<Vec<Ridge>>,
}

impl GraphModel {
    pub fn new(nodes: &[Node], closeness_scale: f64, initial_pheromone: f64) -> AcoResult<Self> {
        if nodes.len() < 2 {
            return Err(AcoError::TooFewNodes(nodes.len()));
        }
        if let Some(idx) = nodes.iter().position(|n| !n.x.is_finite() || !n.y.is_finite()) {
            return Err(AcoError::NonFiniteCoordinate(idx));
        }

        let n = nodes.len();
        let mut ridges = vec![
            vec![
                Ridge {
                    closeness: 1.0,
                    pheromone: initial_pheromone,
                };
                n
            ];
            n
        ];

        for i in 0..n {
            for j in (i + 1)..n {
                let dist = euclidean_dist(&nodes[i], &nodes[j]);
                if dist == 0.0 {
                    return Err(AcoError::CoincidentNodes(i, j));
                }
                let closeness = closeness_scale / dist;
                if !closeness.is_finite() || closeness <= 0.0 {
                    return Err(AcoError::DegenerateCloseness {
                        from: i,
                        to: j,
                        closeness,
                    });
                }
                ridges[i][j].closeness = closeness;
                ridges[j][i].closeness = closeness;
            }
        }

        Ok(GraphModel {
            closeness_scale,
            ridges,
        })
    }

    pub fn node_count(&self) -> usize {
        self.ridges.len()
    }

    pub fn closeness_scale(&self) -> f64 {
        self.closeness_scale
    }

    #[inline]
    pub fn closeness(&self, from: usize, to: usize) -> f64 {
        self.ridges[from][to].closeness
    }

    #[inline]
    pub fn pheromone(&self, from: usize, to: usize) -> f64 {
        self.ridges[from][to].pheromone
    }

    /// Distance recovered from closeness. A self-pair has no length.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        if from == to {
            return 0.0;
        }
        self.closeness_scale / self.ridges[from][to].closeness
    }

    /// Length of a closed route given as consecutive node ids.
    pub fn route_length(&self, route: &[usize]) -> f64 {
        route.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    pub fn evaporate_all(&mut self, factor: f64) {
        for row in &mut self.ridges {
            for ridge in row.iter_mut() {
                ridge.pheromone *= factor;
            }
        }
    }

    pub fn reinforce(&mut self, from: usize, to: usize, amount: f64) {
        self.ridges[from][to].pheromone += amount;
    }
}
