use rustc_hash::FxHashSet;

use crate::optimizer::OptimizerConfig;
use crate::optimizer::models::{Fingerprint, Objectives, RouteCandidate, RouteKind};

/// Selection priority, highest first. The round-robin fill and the
/// balanced fallback never outrank a primary category seed; within a tier
/// earlier insertion wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SelectionTier {
    Primary,
    RoundRobin,
    Fallback,
}

/// A frontier route picked for the final comparison set, tagged with its
/// human-readable category.
#[derive(Debug, Clone)]
pub struct SelectedRoute {
    candidate: RouteCandidate,
    category: &'static str,
    tier: SelectionTier,
    sequence: u32,
}

impl SelectedRoute {
    // Getters/Setters

    pub fn candidate(&self) -> &RouteCandidate {
        &self.candidate
    }

    pub fn category(&self) -> &'static str {
        self.category
    }
}

struct Selection {
    routes: Vec<SelectedRoute>,
    seen: FxHashSet<Fingerprint>,
    sequence: u32,
    capacity: usize,
}

impl Selection {
    fn new(capacity: usize) -> Self {
        Self {
            routes: Vec::new(),
            seen: FxHashSet::default(),
            sequence: 0,
            capacity,
        }
    }

    fn is_full(&self) -> bool {
        self.routes.len() >= self.capacity
    }

    fn try_add(
        &mut self,
        candidate: &RouteCandidate,
        category: &'static str,
        tier: SelectionTier,
    ) -> bool {
        if self.is_full() || !self.seen.insert(candidate.fingerprint()) {
            return false;
        }

        self.routes.push(SelectedRoute {
            candidate: candidate.clone(),
            category,
            tier,
            sequence: self.sequence,
        });
        self.sequence += 1;
        true
    }
}

/// Picks up to `max_final_routes` diverse routes from the Pareto front.
///
/// Primary categories are seeded first (a route already picked never takes
/// a second tag), then the remaining slots are filled round-robin over the
/// sorted views, one pull per view per cycle, and finally by descending
/// balanced score.
pub fn select_final_routes(
    front: &[RouteCandidate],
    config: &OptimizerConfig,
) -> Vec<SelectedRoute> {
    if front.is_empty() {
        return Vec::new();
    }

    let balanced = balanced_scores(front);

    let by_time = sorted_indices(front.len(), |i| front[i].objectives().time);
    let by_cost = sorted_indices(front.len(), |i| front[i].objectives().cost);
    let by_transfers = sorted_indices(front.len(), |i| f64::from(front[i].objectives().transfers));
    let by_safety = sorted_indices(front.len(), |i| -front[i].objectives().safety_score);
    let by_balanced = sorted_indices(front.len(), |i| -balanced[i]);
    let mut by_multimodal: Vec<usize> = (0..front.len())
        .filter(|&i| front[i].kind() == RouteKind::TrainFlight)
        .collect();
    by_multimodal.sort_by(|&a, &b| {
        front[a]
            .objectives()
            .time
            .total_cmp(&front[b].objectives().time)
    });

    let mut selection = Selection::new(config.max_final_routes);

    for (view, category) in [
        (&by_time, "FASTEST"),
        (&by_cost, "CHEAPEST"),
        (&by_transfers, "MOST DIRECT"),
        (&by_safety, "SAFEST"),
        (&by_multimodal, "BEST MULTIMODAL"),
    ] {
        if let Some(&best) = view.first() {
            selection.try_add(&front[best], category, SelectionTier::Primary);
        }
    }

    let views: [&[usize]; 5] = [
        &by_time,
        &by_cost,
        &by_transfers,
        &by_balanced,
        &by_multimodal,
    ];
    let mut cursors = [0usize; 5];

    loop {
        if selection.is_full() {
            break;
        }

        let mut any_remaining = false;
        for (v, view) in views.iter().enumerate() {
            if selection.is_full() {
                break;
            }
            if cursors[v] >= view.len() {
                continue;
            }
            any_remaining = true;

            let index = view[cursors[v]];
            cursors[v] += 1;

            let category = match v {
                0 => "FAST",
                1 => "CHEAP",
                3 => "BALANCED",
                4 if front[index].kind() == RouteKind::TrainFlight => "MULTIMODAL",
                _ => "OPTIMAL ALTERNATIVE",
            };
            selection.try_add(&front[index], category, SelectionTier::RoundRobin);
        }

        if !any_remaining {
            break;
        }
    }

    // Any slots left after the iterators drain are filled by balanced score.
    for &index in &by_balanced {
        if selection.is_full() {
            break;
        }
        selection.try_add(&front[index], "OPTIMAL ALTERNATIVE", SelectionTier::Fallback);
    }

    let mut routes = selection.routes;
    routes.sort_by(|a, b| {
        (a.tier, a.sequence).cmp(&(b.tier, b.sequence)).then(
            a.candidate
                .objectives()
                .time
                .total_cmp(&b.candidate.objectives().time),
        )
    });

    log::info!("Selected {} optimal routes for comparison", routes.len());
    routes
}

fn sorted_indices<F>(len: usize, key: F) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    let mut indices: Vec<usize> = (0..len).collect();
    indices.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
    indices
}

/// Min-max normalized "betterness" in [0, 1] on each axis, weighted
/// 0.25/0.25/0.20/0.15/0.15 for time/cost/transfers/seats/safety. Ranges
/// carry a +0.001 floor so a degenerate axis contributes nothing instead of
/// dividing by zero.
fn balanced_scores(front: &[RouteCandidate]) -> Vec<f64> {
    fn min_max<F>(front: &[RouteCandidate], key: F) -> (f64, f64)
    where
        F: Fn(&Objectives) -> f64,
    {
        front.iter().fold((f64::MAX, f64::MIN), |(min, max), c| {
            let value = key(c.objectives());
            (min.min(value), max.max(value))
        })
    }

    let (min_time, max_time) = min_max(front, |o| o.time);
    let (min_cost, max_cost) = min_max(front, |o| o.cost);
    let (min_transfers, max_transfers) = min_max(front, |o| f64::from(o.transfers));
    let (min_seats, max_seats) = min_max(front, |o| o.seat_prob);
    let (min_safety, max_safety) = min_max(front, |o| o.safety_score);

    let time_range = max_time - min_time + 0.001;
    let cost_range = max_cost - min_cost + 0.001;
    let transfers_range = max_transfers - min_transfers + 0.001;
    let seats_range = max_seats - min_seats + 0.001;
    let safety_range = max_safety - min_safety + 0.001;

    front
        .iter()
        .map(|candidate| {
            let o = candidate.objectives();
            (max_time - o.time) / time_range * 0.25
                + (max_cost - o.cost) / cost_range * 0.25
                + (max_transfers - f64::from(o.transfers)) / transfers_range * 0.20
                + (o.seat_prob - min_seats) / seats_range * 0.15
                + (o.safety_score - min_safety) / safety_range * 0.15
        })
        .collect()
}
