mod app;
mod cli;
mod dataset;
mod error;
mod optimizer;
mod service;
mod utils;

pub use app::{run_interactive, run_query};
pub use cli::{Cli, Mode, RouteQueryArgsBuilder};
pub use dataset::{DEFAULT_DATASET, SegmentKind, SegmentRecord, load_segments};
pub use error::{RError, RResult};
pub use optimizer::{
    DEFAULT_MAX_TRANSFERS, Metadata, Objectives, ObjectivesJson, OptimizerConfig, RouteCandidate,
    RouteDocument, RouteJson, RouteKind, RoutePath, RouteQuery, SegmentJson, TransportGraph,
    find_routes, parse_travel_date,
};
pub use service::run_service;
