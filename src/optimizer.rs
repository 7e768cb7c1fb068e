mod enumeration;
mod graph;
mod models;
mod output;
mod pareto;
mod selection;
mod transfer;

use chrono::NaiveDate;

use crate::dataset::SegmentRecord;
use crate::error::{RError, RResult};

use enumeration::enumerate_routes;
use graph::normalize_code;
use pareto::{pareto_front, route_objectives};
use selection::select_final_routes;

pub use graph::TransportGraph;
pub use models::{Objectives, RouteCandidate, RouteKind, RoutePath};
pub use output::{Metadata, ObjectivesJson, RouteDocument, RouteJson, SegmentJson};

// ------------------------------------------------------------------------------------------------
// --- OptimizerConfig
// ------------------------------------------------------------------------------------------------

/// Tunable bounds of the optimizer. The defaults are the values the
/// production data pipeline has always used.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Minimum feasible wait at a junction, in hours.
    pub min_transfer_wait_hours: f64,
    /// Maximum feasible wait at a junction, in hours.
    pub max_transfer_wait_hours: f64,
    /// Cumulative distance cap of the bounded-transfer search, in km.
    pub max_route_distance_km: f64,
    /// Cap on the emitted paths of the single- and multi-transfer
    /// strategies, each.
    pub max_paths_per_strategy: usize,
    /// Cap on the final ranked selection.
    pub max_final_routes: usize,
    /// Bernoulli rate of the per-segment seat availability draw.
    pub seat_availability_rate: f64,
    /// Fixes the seat draw; `None` samples fresh per optimizer instance.
    pub seat_seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_transfer_wait_hours: 0.5,
            max_transfer_wait_hours: 8.0,
            max_route_distance_km: 5000.0,
            max_paths_per_strategy: 100,
            max_final_routes: 20,
            seat_availability_rate: 0.8,
            seat_seed: None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// --- RouteQuery
// ------------------------------------------------------------------------------------------------

/// One routing request. Location codes may arrive in any case; they are
/// normalized before lookup.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub max_transfers: u32,
    pub travel_date: NaiveDate,
}

pub const DEFAULT_MAX_TRANSFERS: u32 = 3;

/// Parses an optional `YYYY-MM-DD` travel date; absent means today.
pub fn parse_travel_date(value: Option<&str>) -> RResult<NaiveDate> {
    match value {
        None => Ok(chrono::Local::now().date_naive()),
        Some(value) if value.trim().is_empty() => Ok(chrono::Local::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| RError::InvalidTravelDate),
    }
}

// ------------------------------------------------------------------------------------------------
// --- Pipeline
// ------------------------------------------------------------------------------------------------

/// Runs the full optimization pipeline for one request: build the graph
/// from the unified segment list, enumerate candidate paths, reduce them to
/// the Pareto frontier and shape the final document. An empty candidate set
/// surfaces as `RError::NoRoutesFound`.
pub fn find_routes(
    records: &[SegmentRecord],
    query: &RouteQuery,
    config: &OptimizerConfig,
) -> RResult<RouteDocument> {
    let origin = normalize_code(&query.origin);
    let destination = normalize_code(&query.destination);

    if origin.is_empty() || destination.is_empty() {
        return Err(RError::MissingEndpoints);
    }

    let graph = TransportGraph::build(records, config);

    let source = graph
        .location_id(&origin)
        .ok_or_else(|| RError::UnknownStation(origin.clone()))?;
    let dest = graph
        .location_id(&destination)
        .ok_or_else(|| RError::UnknownStation(destination.clone()))?;
    if source == dest {
        return Err(RError::SameStation);
    }

    let paths = enumerate_routes(
        &graph,
        source,
        dest,
        query.max_transfers,
        query.travel_date,
        config,
    );
    if paths.is_empty() {
        return Err(RError::NoRoutesFound);
    }

    let candidates: Vec<RouteCandidate> = paths
        .into_iter()
        .map(|path| annotate(&graph, path))
        .collect();

    let front = pareto_front(&candidates);
    let selected = select_final_routes(&front, config);

    Ok(output::shape_document(
        &graph,
        &origin,
        &destination,
        &candidates,
        front.len(),
        &selected,
    ))
}

fn annotate(graph: &TransportGraph, path: RoutePath) -> RouteCandidate {
    let objectives = route_objectives(&path);
    let kind = RouteKind::classify(
        path.steps()
            .iter()
            .map(|step| graph.segment_meta(step.segment()).kind()),
    );
    RouteCandidate::new(path, objectives, kind)
}
