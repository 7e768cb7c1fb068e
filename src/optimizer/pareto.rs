use crate::optimizer::models::{Objectives, RouteCandidate, RoutePath};

/// Derives the five optimization objectives and the total distance of a
/// path. Transfers are counted as steps beyond the first.
pub fn route_objectives(path: &RoutePath) -> Objectives {
    let steps = path.steps();

    let total_hours: f64 = steps
        .iter()
        .map(|step| step.duration_hours() + step.wait_before())
        .sum();
    let cost = steps.iter().map(|step| step.cost()).sum();
    let distance = steps.iter().map(|step| step.distance()).sum();

    let transfers = steps.len().saturating_sub(1) as u32;
    let seats_available = steps.iter().filter(|step| step.seat_available()).count();
    let seat_prob = if steps.is_empty() {
        0.0
    } else {
        seats_available as f64 / steps.len() as f64 * 100.0
    };
    let safety_score = (100.0 - 10.0 * f64::from(transfers)).max(40.0);

    Objectives {
        time: total_hours * 60.0,
        cost,
        transfers,
        seat_prob,
        safety_score,
        distance,
    }
}

/// True iff `a` dominates `b`: no worse on all five axes, strictly better
/// on at least one. Time, cost and transfers are minimized; seat
/// probability and safety are maximized. Float comparison is strict, so
/// routes tied on every axis do not dominate each other.
pub fn dominates(a: &Objectives, b: &Objectives) -> bool {
    let better_or_equal = a.time <= b.time
        && a.cost <= b.cost
        && a.transfers <= b.transfers
        && a.seat_prob >= b.seat_prob
        && a.safety_score >= b.safety_score;

    let strictly_better = a.time < b.time
        || a.cost < b.cost
        || a.transfers < b.transfers
        || a.seat_prob > b.seat_prob
        || a.safety_score > b.safety_score;

    better_or_equal && strictly_better
}

/// The set of candidates not dominated by any other. Quadratic, which is
/// fine at the few hundred routes the enumerator can emit.
pub fn pareto_front(candidates: &[RouteCandidate]) -> Vec<RouteCandidate> {
    let front: Vec<RouteCandidate> = candidates
        .iter()
        .filter(|candidate| {
            !candidates.iter().any(|other| {
                !std::ptr::eq(*candidate, other)
                    && dominates(other.objectives(), candidate.objectives())
            })
        })
        .cloned()
        .collect();

    log::info!("Pareto front size: {} / {} routes", front.len(), candidates.len());
    front
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::models::{Edge, PathStep, RouteKind};

    fn step(segment: u32, duration_hours: f64, cost: f64, wait: f64, seat: bool) -> PathStep {
        let edge = Edge::new(0, segment, None, None, 100.0, duration_hours, cost, seat);
        PathStep::from_edge(0, &edge, wait)
    }

    fn candidate(objectives: Objectives) -> RouteCandidate {
        RouteCandidate::new(RoutePath::new(Vec::new()), objectives, RouteKind::TrainOnly)
    }

    fn objectives(time: f64, cost: f64, transfers: u32, seat_prob: f64) -> Objectives {
        Objectives {
            time,
            cost,
            transfers,
            seat_prob,
            safety_score: (100.0 - 10.0 * f64::from(transfers)).max(40.0),
            distance: 0.0,
        }
    }

    #[test]
    fn test_objectives_of_single_step() {
        let path = RoutePath::new(vec![step(1, 1.0, 500.0, 0.0, true)]);
        let obj = route_objectives(&path);

        assert_eq!(obj.time, 60.0);
        assert_eq!(obj.cost, 500.0);
        assert_eq!(obj.transfers, 0);
        assert_eq!(obj.seat_prob, 100.0);
        assert_eq!(obj.safety_score, 100.0);
        assert_eq!(obj.distance, 100.0);
    }

    #[test]
    fn test_objectives_include_waits_and_average_seats() {
        let path = RoutePath::new(vec![
            step(1, 1.0, 200.0, 0.0, true),
            step(2, 1.0, 300.0, 0.5, false),
        ]);
        let obj = route_objectives(&path);

        assert_eq!(obj.time, 150.0);
        assert_eq!(obj.cost, 500.0);
        assert_eq!(obj.transfers, 1);
        assert_eq!(obj.seat_prob, 50.0);
        assert_eq!(obj.safety_score, 90.0);
        assert_eq!(obj.distance, 200.0);
    }

    #[test]
    fn test_safety_score_floor() {
        let steps: Vec<_> = (0..8).map(|i| step(i, 1.0, 0.0, 0.0, true)).collect();
        let obj = route_objectives(&RoutePath::new(steps));

        assert_eq!(obj.transfers, 7);
        assert_eq!(obj.safety_score, 40.0);
    }

    #[test]
    fn test_dominates_requires_strict_improvement() {
        let a = objectives(60.0, 500.0, 0, 100.0);
        let b = objectives(90.0, 500.0, 0, 100.0);

        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
        // Ties on every axis dominate in neither direction.
        assert!(!dominates(&a, &a));
    }

    #[test]
    fn test_dominates_is_false_on_trade_offs() {
        let fast_expensive = objectives(60.0, 900.0, 0, 100.0);
        let slow_cheap = objectives(120.0, 300.0, 0, 100.0);

        assert!(!dominates(&fast_expensive, &slow_cheap));
        assert!(!dominates(&slow_cheap, &fast_expensive));
    }

    #[test]
    fn test_pareto_front_drops_dominated_routes() {
        let candidates = vec![
            candidate(objectives(60.0, 900.0, 0, 100.0)),
            candidate(objectives(120.0, 300.0, 0, 100.0)),
            // Dominated by the first: slower and more expensive.
            candidate(objectives(90.0, 950.0, 0, 100.0)),
        ];

        let front = pareto_front(&candidates);
        assert_eq!(front.len(), 2);
        for survivor in &front {
            for other in &candidates {
                assert!(!dominates(other.objectives(), survivor.objectives()));
            }
        }
    }

    #[test]
    fn test_pareto_front_keeps_full_ties() {
        let candidates = vec![
            candidate(objectives(60.0, 500.0, 0, 100.0)),
            candidate(objectives(60.0, 500.0, 0, 100.0)),
        ];

        assert_eq!(pareto_front(&candidates).len(), 2);
    }
}
