use thiserror::Error;

pub type AcoResult<T> = Result<T, AcoError>;

/// Errors reported before the colony is allowed to run.
///
/// Broken probability bookkeeping inside the engine is not represented here;
/// those are defects and panic at the point of detection.
#[derive(Debug, Error)]
pub enum AcoError {
    #[error("invalid value for {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("node count mismatch: expected {expected}, got {found} coordinates")]
    NodeCountMismatch { expected: usize, found: usize },

    #[error("at least 2 nodes are required, got {0}")]
    TooFewNodes(usize),

    #[error("nodes {0} and {1} share the same coordinates")]
    CoincidentNodes(usize, usize),

    #[error("closeness between nodes {from} and {to} is {closeness}; adjust the closeness scale")]
    DegenerateCloseness { from: usize, to: usize, closeness: f64 },

    #[error("node {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),

    #[error("greedy start node {start} is out of range for {nodes} nodes")]
    StartNodeOutOfRange { start: usize, nodes: usize },

    #[error("{0}")]
    Argument(String),

    #[error("L{line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
