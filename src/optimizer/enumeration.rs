use std::collections::VecDeque;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;

use crate::optimizer::OptimizerConfig;
use crate::optimizer::graph::TransportGraph;
use crate::optimizer::models::{Fingerprint, PathStep, RoutePath};
use crate::optimizer::transfer::wait_hours;

/// Runs the three enumeration strategies in order and deduplicates the
/// concatenated output by fingerprint, first occurrence wins.
pub fn enumerate_routes(
    graph: &TransportGraph,
    source: u32,
    dest: u32,
    max_transfers: u32,
    travel_date: NaiveDate,
    config: &OptimizerConfig,
) -> Vec<RoutePath> {
    let mut all_routes = find_direct_routes(graph, source, dest);
    log::info!("Found {} direct routes", all_routes.len());

    if max_transfers >= 1 {
        let single = find_single_transfer_routes(graph, source, dest, travel_date, config);
        log::info!("Found {} single-transfer routes", single.len());
        all_routes.extend(single);
    }

    if max_transfers >= 2 {
        let multi =
            find_multi_transfer_routes(graph, source, dest, max_transfers, travel_date, config);
        log::info!("Found {} multi-transfer routes", multi.len());
        all_routes.extend(multi);
    }

    let routes = deduplicate(all_routes);
    log::info!("Total routes generated: {}", routes.len());
    routes
}

fn within_window(wait: f64, config: &OptimizerConfig) -> bool {
    wait >= config.min_transfer_wait_hours && wait <= config.max_transfer_wait_hours
}

fn find_direct_routes(graph: &TransportGraph, source: u32, dest: u32) -> Vec<RoutePath> {
    graph
        .outgoing(source)
        .iter()
        .filter(|edge| edge.to() == dest)
        .map(|edge| RoutePath::new(vec![PathStep::from_edge(source, edge, 0.0)]))
        .collect()
}

fn find_single_transfer_routes(
    graph: &TransportGraph,
    source: u32,
    dest: u32,
    travel_date: NaiveDate,
    config: &OptimizerConfig,
) -> Vec<RoutePath> {
    let mut routes = Vec::new();
    let mut visited_junctions = FxHashSet::default();

    for edge_1 in graph.outgoing(source) {
        let junction = edge_1.to();

        // Junction dedup on first arrival: the first edge reaching a
        // junction claims it, bounding the fan-out.
        if junction == dest || !visited_junctions.insert(junction) {
            continue;
        }

        for edge_2 in graph.outgoing(junction) {
            if edge_2.to() != dest || edge_2.segment() == edge_1.segment() {
                continue;
            }

            let wait = wait_hours(edge_1.arrival(), edge_2.departure(), travel_date);
            if !within_window(wait, config) {
                continue;
            }

            routes.push(RoutePath::new(vec![
                PathStep::from_edge(source, edge_1, 0.0),
                PathStep::from_edge(junction, edge_2, wait),
            ]));

            if routes.len() >= config.max_paths_per_strategy {
                return routes;
            }
        }
    }

    routes
}

struct ArenaStep {
    parent: Option<usize>,
    step: PathStep,
}

struct QueueEntry {
    node: u32,
    tail: Option<usize>,
    transfers: u32,
    distance: f64,
}

/// FIFO traversal bounded by the transfer budget and the cumulative
/// distance cap. Queue entries carry an arena back-pointer instead of a
/// copy of the path; full paths are only materialized on emit.
fn find_multi_transfer_routes(
    graph: &TransportGraph,
    source: u32,
    dest: u32,
    max_transfers: u32,
    travel_date: NaiveDate,
    config: &OptimizerConfig,
) -> Vec<RoutePath> {
    let mut routes = Vec::new();
    let mut arena: Vec<ArenaStep> = Vec::new();
    let mut queue = VecDeque::new();
    // Coarse state key: a (location, transfers) pair is expanded once.
    // Alternative paths sharing the key are dropped, which keeps the
    // traversal polynomial.
    let mut visited: FxHashSet<(u32, u32)> = FxHashSet::default();

    queue.push_back(QueueEntry {
        node: source,
        tail: None,
        transfers: 0,
        distance: 0.0,
    });

    loop {
        if routes.len() >= config.max_paths_per_strategy {
            break;
        }
        let Some(entry) = queue.pop_front() else {
            break;
        };

        if entry.node == dest {
            if let Some(tail) = entry.tail {
                routes.push(reconstruct(&arena, tail));
                continue;
            }
        }

        if entry.transfers >= max_transfers || entry.distance > config.max_route_distance_km {
            continue;
        }

        if !visited.insert((entry.node, entry.transfers)) {
            continue;
        }

        for edge in graph.outgoing(entry.node) {
            let mut wait = 0.0;
            let mut is_transfer = false;

            if let Some(tail) = entry.tail {
                let last = &arena[tail].step;
                if last.segment() != edge.segment() {
                    is_transfer = true;
                    wait = wait_hours(last.arrival(), edge.departure(), travel_date);
                    if !within_window(wait, config) {
                        continue;
                    }
                }
            }

            arena.push(ArenaStep {
                parent: entry.tail,
                step: PathStep::from_edge(entry.node, edge, wait),
            });
            queue.push_back(QueueEntry {
                node: edge.to(),
                tail: Some(arena.len() - 1),
                transfers: entry.transfers + u32::from(is_transfer),
                distance: entry.distance + edge.distance(),
            });
        }
    }

    routes
}

fn reconstruct(arena: &[ArenaStep], tail: usize) -> RoutePath {
    let mut steps = Vec::new();
    let mut cursor = Some(tail);

    while let Some(index) = cursor {
        steps.push(arena[index].step.clone());
        cursor = arena[index].parent;
    }

    steps.reverse();
    RoutePath::new(steps)
}

fn deduplicate(routes: Vec<RoutePath>) -> Vec<RoutePath> {
    let mut seen: FxHashSet<Fingerprint> = FxHashSet::default();
    routes
        .into_iter()
        .filter(|route| seen.insert(route.fingerprint()))
        .collect()
}
