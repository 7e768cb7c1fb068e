use chrono::NaiveTime;
use strum_macros::Display;

use crate::dataset::SegmentKind;

/// Ordered tuple of interned segment ids; the deduplication key of a path.
pub type Fingerprint = Vec<u32>;

// ------------------------------------------------------------------------------------------------
// --- Edge
// ------------------------------------------------------------------------------------------------

/// One outgoing connection in the adjacency index. Location and segment ids
/// are dense integers; only the graph boundary resolves them to strings.
#[derive(Debug, Clone)]
pub struct Edge {
    to: u32,
    segment: u32,
    departure: Option<NaiveTime>,
    arrival: Option<NaiveTime>,
    distance: f64,
    duration_hours: f64,
    cost: f64,
    seat_available: bool,
}

impl Edge {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        to: u32,
        segment: u32,
        departure: Option<NaiveTime>,
        arrival: Option<NaiveTime>,
        distance: f64,
        duration_hours: f64,
        cost: f64,
        seat_available: bool,
    ) -> Self {
        Self {
            to,
            segment,
            departure,
            arrival,
            distance,
            duration_hours,
            cost,
            seat_available,
        }
    }

    // Getters/Setters

    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn segment(&self) -> u32 {
        self.segment
    }

    pub fn departure(&self) -> Option<NaiveTime> {
        self.departure
    }

    pub fn arrival(&self) -> Option<NaiveTime> {
        self.arrival
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn seat_available(&self) -> bool {
        self.seat_available
    }
}

// ------------------------------------------------------------------------------------------------
// --- PathStep
// ------------------------------------------------------------------------------------------------

/// One boarded segment within a candidate route, including the wait spent
/// at the junction before boarding (0 for the first step).
#[derive(Debug, Clone)]
pub struct PathStep {
    from: u32,
    to: u32,
    segment: u32,
    departure: Option<NaiveTime>,
    arrival: Option<NaiveTime>,
    distance: f64,
    duration_hours: f64,
    cost: f64,
    wait_before: f64,
    seat_available: bool,
}

impl PathStep {
    pub fn from_edge(from: u32, edge: &Edge, wait_before: f64) -> Self {
        Self {
            from,
            to: edge.to(),
            segment: edge.segment(),
            departure: edge.departure(),
            arrival: edge.arrival(),
            distance: edge.distance(),
            duration_hours: edge.duration_hours(),
            cost: edge.cost(),
            wait_before,
            seat_available: edge.seat_available(),
        }
    }

    // Getters/Setters

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn segment(&self) -> u32 {
        self.segment
    }

    pub fn departure(&self) -> Option<NaiveTime> {
        self.departure
    }

    pub fn arrival(&self) -> Option<NaiveTime> {
        self.arrival
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn wait_before(&self) -> f64 {
        self.wait_before
    }

    pub fn seat_available(&self) -> bool {
        self.seat_available
    }
}

// ------------------------------------------------------------------------------------------------
// --- RoutePath
// ------------------------------------------------------------------------------------------------

/// An ordered sequence of path steps from origin to destination.
#[derive(Debug, Clone)]
pub struct RoutePath {
    steps: Vec<PathStep>,
}

impl RoutePath {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    // Getters/Setters

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    // Functions

    pub fn fingerprint(&self) -> Fingerprint {
        self.steps.iter().map(|step| step.segment()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ------------------------------------------------------------------------------------------------
// --- RouteKind
// ------------------------------------------------------------------------------------------------

/// Modal composition of a route, derived from the segment kinds of its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RouteKind {
    #[strum(serialize = "Train Only")]
    TrainOnly,
    #[strum(serialize = "Flight Only")]
    FlightOnly,
    #[strum(serialize = "Train-Flight")]
    TrainFlight,
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl RouteKind {
    pub fn classify<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = SegmentKind>,
    {
        let mut has_train = false;
        let mut has_flight = false;

        for kind in kinds {
            match kind {
                SegmentKind::Train => has_train = true,
                SegmentKind::Flight => has_flight = true,
                SegmentKind::Unknown => {}
            }
        }

        match (has_train, has_flight) {
            (true, true) => Self::TrainFlight,
            (true, false) => Self::TrainOnly,
            (false, true) => Self::FlightOnly,
            (false, false) => Self::Unknown,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// --- Objectives
// ------------------------------------------------------------------------------------------------

/// The five optimization objectives of a route, plus its total distance.
/// Time, cost and transfers are minimized; seat probability and safety are
/// maximized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objectives {
    pub time: f64,
    pub cost: f64,
    pub transfers: u32,
    pub seat_prob: f64,
    pub safety_score: f64,
    pub distance: f64,
}

// ------------------------------------------------------------------------------------------------
// --- RouteCandidate
// ------------------------------------------------------------------------------------------------

/// An enumerated route annotated with its objectives and modal composition.
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    path: RoutePath,
    objectives: Objectives,
    kind: RouteKind,
}

impl RouteCandidate {
    pub fn new(path: RoutePath, objectives: Objectives, kind: RouteKind) -> Self {
        Self {
            path,
            objectives,
            kind,
        }
    }

    // Getters/Setters

    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    // Functions

    pub fn fingerprint(&self) -> Fingerprint {
        self.path.fingerprint()
    }
}
