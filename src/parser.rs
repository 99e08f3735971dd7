use std::fs::File as StdFile;
use std::io::{BufRead, BufReader as StdBufReader};

use crate::error::{AcoError, AcoResult};
use crate::graph::Node;

/// Node set used when no coordinate file is supplied.
pub fn default_nodes() -> Vec<Node> {
    [
        (2.0, 2.0),
        (9.0, 13.0),
        (2.0, 9.0),
        (9.0, 5.0),
        (6.0, 4.0),
        (4.0, 14.0),
        (11.0, 10.0),
    ]
    .into_iter()
    .map(|(x, y)| Node::new(x, y))
    .collect()
}

#[derive(PartialEq, Debug)]
enum ParsingSection {
    Header,
    NodeCoordSection,
    Ignored,
}

pub fn load_nodes(file_path: &str) -> AcoResult<Vec<Node>> {
    let file = StdFile::open(file_path).map_err(|source| AcoError::Io {
        path: file_path.to_string(),
        source,
    })?;
    parse_nodes(StdBufReader::new(file)).map_err(|e| match e {
        AcoError::Io { source, .. } => AcoError::Io {
            path: file_path.to_string(),
            source,
        },
        other => other,
    })
}

/// Reads `x y` or `id x y` lines, with optional TSPLIB-style headers.
///
/// Nodes are numbered `0..n` in file order. Explicit ids must run
/// consecutively from 0 or from 1.
pub fn parse_nodes(reader: impl BufRead) -> AcoResult<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut dimension: Option<usize> = None;
    let mut first_id: Option<usize> = None;
    let mut current_section = ParsingSection::Header;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|source| AcoError::Io {
            path: String::from("<input>"),
            source,
        })?;
        let line = line.trim();

        if line == "EOF" {
            break;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line {
            "NODE_COORD_SECTION" => {
                current_section = ParsingSection::NodeCoordSection;
                continue;
            }
            "DISPLAY_DATA_SECTION" | "TOUR_SECTION" | "EDGE_WEIGHT_SECTION" => {
                current_section = ParsingSection::Ignored;
                continue;
            }
            _ => {}
        }

        if let Some((key, value)) = line.split_once(':') {
            if current_section == ParsingSection::NodeCoordSection {
                return Err(AcoError::Parse {
                    line: line_num,
                    message: format!("Unexpected header '{line}' inside NODE_COORD_SECTION"),
                });
            }
            if key.trim() == "DIMENSION" {
                let value = value.trim();
                dimension = Some(value.parse().map_err(|_| AcoError::Parse {
                    line: line_num,
                    message: format!("Invalid dimension '{value}'"),
                })?);
            }
            continue;
        }

        if current_section == ParsingSection::Ignored {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let coord = |s: &str, axis: &str| {
            s.parse::<f64>().map_err(|_| AcoError::Parse {
                line: line_num,
                message: format!("Invalid {axis} coord '{s}' on line '{line}'"),
            })
        };

        let node = match parts[..] {
            [x, y] => Node::new(coord(x, "x")?, coord(y, "y")?),
            [id, x, y] => {
                let id = id.parse::<usize>().map_err(|_| AcoError::Parse {
                    line: line_num,
                    message: format!("Invalid node id '{id}'"),
                })?;
                let base = *first_id.get_or_insert(id);
                if base > 1 || id != base + nodes.len() {
                    return Err(AcoError::Parse {
                        line: line_num,
                        message: format!(
                            "Node id {id} out of sequence, expected {}",
                            base.min(1) + nodes.len()
                        ),
                    });
                }
                Node::new(coord(x, "x")?, coord(y, "y")?)
            }
            _ => {
                return Err(AcoError::Parse {
                    line: line_num,
                    message: format!("Malformed node coord line (expected [id] x y): {line}"),
                });
            }
        };
        nodes.push(node);
    }

    if let Some(expected) = dimension {
        if expected != nodes.len() {
            return Err(AcoError::NodeCountMismatch {
                expected,
                found: nodes.len(),
            });
        }
    }

    Ok(nodes)
}
