use std::fmt::Write;

use crate::graph::GraphModel;
use crate::solver::IterationSnapshot;

/// Distance row (`D:`) followed by pheromone row (`Ph:`) for every source node.
pub fn matrix_table(graph: &GraphModel) -> String {
    let n = graph.node_count();
    let mut out = String::new();
    for from in 0..n {
        for to in 0..n {
            // Self-pairs print the raw scale, as closeness there is the sentinel 1.
            let dist = graph.closeness_scale() / graph.closeness(from, to);
            let _ = write!(out, "D: {dist:.2}    ");
        }
        out.push('\n');
        for to in 0..n {
            let _ = write!(out, "Ph:{:.2}    ", graph.pheromone(from, to));
        }
        out.push_str("\n\n");
    }
    out
}

pub fn format_route(route: &[usize]) -> String {
    route
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub fn iteration_report(snapshot: &IterationSnapshot) -> String {
    let mut out = format!("iteration: {}\n", snapshot.iteration);
    for tour in snapshot.tours {
        let _ = writeln!(
            out,
            "  ant {}: {} ({:.2})",
            tour.start(),
            format_route(tour.route()),
            tour.length()
        );
    }
    out.push('\n');
    out.push_str(&matrix_table(snapshot.graph));
    out
}
