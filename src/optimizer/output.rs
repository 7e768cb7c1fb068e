use serde::Serialize;

use crate::optimizer::graph::TransportGraph;
use crate::optimizer::models::{Objectives, RouteCandidate, RoutePath};
use crate::optimizer::selection::SelectedRoute;
use crate::utils::{format_hms, round2};

// ------------------------------------------------------------------------------------------------
// --- Response document
// ------------------------------------------------------------------------------------------------

/// The shaped optimizer response: request metadata, the ranked selection
/// and every deduplicated enumerated route.
#[derive(Debug, Serialize)]
pub struct RouteDocument {
    pub metadata: Metadata,
    pub optimal_routes: Vec<RouteJson>,
    pub all_generated_routes: Vec<RouteJson>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub source: String,
    pub destination: String,
    pub total_routes_generated: usize,
    pub pareto_front_size: usize,
    pub optimal_routes_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RouteJson {
    pub route_id: String,
    pub category: String,
    pub objectives: ObjectivesJson,
    pub segments: Vec<SegmentJson>,
}

/// Objectives with floats rounded to 2 decimals; transfers stays integral.
#[derive(Debug, Serialize)]
pub struct ObjectivesJson {
    pub time: f64,
    pub cost: f64,
    pub transfers: u32,
    pub seat_prob: f64,
    pub safety_score: f64,
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub struct SegmentJson {
    #[serde(rename = "type")]
    pub kind: String,
    pub segment_id: String,
    pub name: String,
    pub from: String,
    pub to: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub distance: f64,
    pub duration_min: f64,
    pub wait_min: f64,
    pub cost: f64,
}

// ------------------------------------------------------------------------------------------------
// --- Shaping
// ------------------------------------------------------------------------------------------------

pub fn shape_document(
    graph: &TransportGraph,
    source: &str,
    destination: &str,
    all_routes: &[RouteCandidate],
    pareto_front_size: usize,
    selected: &[SelectedRoute],
) -> RouteDocument {
    let optimal_routes = selected
        .iter()
        .enumerate()
        .map(|(idx, route)| RouteJson {
            route_id: format!("OPT_ROUTE_{:02}", idx + 1),
            category: route.category().to_string(),
            objectives: shape_objectives(route.candidate().objectives()),
            segments: shape_segments(graph, route.candidate().path()),
        })
        .collect();

    // All generated routes are listed ascending by time, ids assigned after
    // the sort.
    let mut by_time: Vec<&RouteCandidate> = all_routes.iter().collect();
    by_time.sort_by(|a, b| a.objectives().time.total_cmp(&b.objectives().time));

    let all_generated_routes = by_time
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| RouteJson {
            route_id: format!("ALL_ROUTE_{:03}", idx + 1),
            category: candidate.kind().to_string(),
            objectives: shape_objectives(candidate.objectives()),
            segments: shape_segments(graph, candidate.path()),
        })
        .collect();

    RouteDocument {
        metadata: Metadata {
            source: source.to_string(),
            destination: destination.to_string(),
            total_routes_generated: all_routes.len(),
            pareto_front_size,
            optimal_routes_count: selected.len(),
        },
        optimal_routes,
        all_generated_routes,
    }
}

fn shape_objectives(objectives: &Objectives) -> ObjectivesJson {
    ObjectivesJson {
        time: round2(objectives.time),
        cost: round2(objectives.cost),
        transfers: objectives.transfers,
        seat_prob: round2(objectives.seat_prob),
        safety_score: round2(objectives.safety_score),
        distance: round2(objectives.distance),
    }
}

fn shape_segments(graph: &TransportGraph, path: &RoutePath) -> Vec<SegmentJson> {
    path.steps()
        .iter()
        .map(|step| {
            let meta = graph.segment_meta(step.segment());
            SegmentJson {
                kind: meta.kind().to_string(),
                segment_id: meta.code().to_string(),
                name: meta.name().to_string(),
                from: graph.location_code(step.from()).to_string(),
                to: graph.location_code(step.to()).to_string(),
                departure: step.departure().map(format_hms),
                arrival: step.arrival().map(format_hms),
                distance: round2(step.distance()),
                duration_min: round2(step.duration_hours() * 60.0),
                wait_min: round2(step.wait_before() * 60.0),
                cost: round2(step.cost()),
            }
        })
        .collect()
}
