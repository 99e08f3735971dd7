use std::str::FromStr;

use crate::error::{AcoError, AcoResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub file_path: Option<String>,
    pub closeness_scale: f64,    // C: closeness = C / distance
    pub pheromone_deposit: f64,  // Q: deposit = Q / tour length
    pub evaporation_factor: f64, // Multiplier applied to every pheromone once per iteration
    pub node_count: Option<usize>,
    pub iteration_count: usize,
    pub initial_pheromone: f64,
    pub seed: Option<u64>,
    pub start_node: usize, // Where the final greedy walk begins
    pub show_matrices: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: None,
            closeness_scale: 200.0,
            pheromone_deposit: 4.0,
            evaporation_factor: 0.67,
            node_count: None,
            iteration_count: 10,
            initial_pheromone: 0.2,
            seed: None,
            start_node: 0,
            show_matrices: false,
        }
    }
}

fn parse_value<T: FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> AcoResult<T> {
    let raw = args
        .next()
        .ok_or_else(|| AcoError::Argument(format!("Missing value for {flag}")))?;
    raw.parse()
        .map_err(|_| AcoError::Argument(format!("Invalid value for {flag}: '{raw}'")))
}

fn check_positive(name: &'static str, value: f64) -> AcoResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AcoError::InvalidParameter {
            name,
            value,
            reason: "must be finite and greater than zero",
        });
    }
    Ok(())
}

impl Config {
    pub fn build(mut args: impl Iterator<Item = String>) -> AcoResult<Config> {
        args.next();

        let mut config = Config::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--closeness-scale" => {
                    config.closeness_scale = parse_value(&mut args, "--closeness-scale")?
                }
                "-q" | "--deposit" => config.pheromone_deposit = parse_value(&mut args, "--deposit")?,
                "-e" | "--evaporation" => {
                    config.evaporation_factor = parse_value(&mut args, "--evaporation")?
                }
                "-n" | "--nodes" => config.node_count = Some(parse_value(&mut args, "--nodes")?),
                "-i" | "--iters" => config.iteration_count = parse_value(&mut args, "--iters")?,
                "-p" | "--init-pheromone" => {
                    config.initial_pheromone = parse_value(&mut args, "--init-pheromone")?
                }
                "-s" | "--seed" => config.seed = Some(parse_value(&mut args, "--seed")?),
                "-g" | "--greedy-start" => {
                    config.start_node = parse_value(&mut args, "--greedy-start")?
                }
                "-m" | "--show-matrices" => config.show_matrices = true,
                _ if config.file_path.is_none() && !arg.starts_with('-') => {
                    config.file_path = Some(arg)
                }
                _ => {
                    return Err(AcoError::Argument(format!(
                        "Invalid option or unexpected argument: '{arg}'"
                    )));
                }
            }
        }

        Ok(config)
    }

    /// Checks the tunables against the number of coordinates actually supplied.
    pub fn validate(&self, node_total: usize) -> AcoResult<()> {
        check_positive("closeness scale", self.closeness_scale)?;
        check_positive("pheromone deposit", self.pheromone_deposit)?;
        check_positive("initial pheromone", self.initial_pheromone)?;

        if !(self.evaporation_factor > 0.0 && self.evaporation_factor < 1.0) {
            return Err(AcoError::InvalidParameter {
                name: "evaporation factor",
                value: self.evaporation_factor,
                reason: "must lie strictly between 0 and 1",
            });
        }

        if let Some(expected) = self.node_count {
            if expected != node_total {
                return Err(AcoError::NodeCountMismatch {
                    expected,
                    found: node_total,
                });
            }
        }

        if node_total < 2 {
            return Err(AcoError::TooFewNodes(node_total));
        }

        if self.start_node >= node_total {
            return Err(AcoError::StartNodeOutOfRange {
                start: self.start_node,
                nodes: node_total,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("ant-tour".to_string()).chain(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn build_without_arguments_gives_defaults() {
        let config = Config::build(args(&[])).unwrap();
        assert_eq!(config.file_path, None);
        assert_eq!(config.closeness_scale, 200.0);
        assert_eq!(config.pheromone_deposit, 4.0);
        assert_eq!(config.evaporation_factor, 0.67);
        assert_eq!(config.iteration_count, 10);
        assert_eq!(config.initial_pheromone, 0.2);
        assert!(!config.show_matrices);
    }

    #[test]
    fn build_reads_every_option() {
        let config = Config::build(args(&[
            "-c", "100", "-q", "2.5", "-e", "0.5", "-n", "4", "-i", "25", "-p", "0.1", "-s",
            "42", "-g", "3", "-m", "nodes.txt",
        ]))
        .unwrap();
        assert_eq!(config.closeness_scale, 100.0);
        assert_eq!(config.pheromone_deposit, 2.5);
        assert_eq!(config.evaporation_factor, 0.5);
        assert_eq!(config.node_count, Some(4));
        assert_eq!(config.iteration_count, 25);
        assert_eq!(config.initial_pheromone, 0.1);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.start_node, 3);
        assert!(config.show_matrices);
        assert_eq!(config.file_path.as_deref(), Some("nodes.txt"));
    }

    #[test]
    fn build_rejects_missing_and_malformed_values() {
        assert!(matches!(
            Config::build(args(&["--iters"])),
            Err(AcoError::Argument(_))
        ));
        assert!(matches!(
            Config::build(args(&["--evaporation", "lots"])),
            Err(AcoError::Argument(_))
        ));
        assert!(matches!(
            Config::build(args(&["a.txt", "b.txt"])),
            Err(AcoError::Argument(_))
        ));
    }

    #[test]
    fn validate_rejects_evaporation_outside_open_unit_interval() {
        for factor in [0.0, -0.3, 1.0, 1.5, f64::NAN] {
            let config = Config {
                evaporation_factor: factor,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(5),
                Err(AcoError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_node_count_mismatch() {
        let config = Config {
            node_count: Some(7),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(6),
            Err(AcoError::NodeCountMismatch {
                expected: 7,
                found: 6
            })
        ));
        assert!(config.validate(7).is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_inputs() {
        let config = Config::default();
        assert!(matches!(config.validate(1), Err(AcoError::TooFewNodes(1))));

        let config = Config {
            start_node: 4,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(4),
            Err(AcoError::StartNodeOutOfRange { .. })
        ));

        let config = Config {
            pheromone_deposit: 0.0,
            ..Config::default()
        };
        assert!(config.validate(4).is_err());
    }
}
