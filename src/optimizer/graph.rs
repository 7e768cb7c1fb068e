use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::dataset::{SegmentKind, SegmentRecord};
use crate::optimizer::OptimizerConfig;
use crate::optimizer::models::Edge;
use crate::utils::parse_hms;

/// Location codes are normalized before interning and lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// ------------------------------------------------------------------------------------------------
// --- SegmentMeta
// ------------------------------------------------------------------------------------------------

/// Per-service metadata, written once per distinct `unique_id`.
#[derive(Debug, Clone)]
pub struct SegmentMeta {
    code: String,
    kind: SegmentKind,
    name: String,
}

impl SegmentMeta {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ------------------------------------------------------------------------------------------------
// --- TransportGraph
// ------------------------------------------------------------------------------------------------

/// The in-memory multimodal graph: location and segment interners plus a
/// compressed-sparse-row adjacency index. Built once per request from the
/// unified segment list; read-only afterwards.
#[derive(Debug)]
pub struct TransportGraph {
    location_ids: FxHashMap<String, u32>,
    locations: Vec<String>,
    segment_ids: FxHashMap<String, u32>,
    segments: Vec<SegmentMeta>,
    offsets: Vec<u32>,
    edges: Vec<Edge>,
}

impl TransportGraph {
    /// Builds the graph from the unified segment list. Records without both
    /// endpoints are skipped. Seat availability is drawn per record from
    /// Bernoulli(`seat_availability_rate`) in record order, so a fixed seed
    /// reproduces the exact same graph.
    pub fn build(records: &[SegmentRecord], config: &OptimizerConfig) -> Self {
        let mut rng = match config.seat_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        fn intern_location(
            code: &str,
            location_ids: &mut FxHashMap<String, u32>,
            locations: &mut Vec<String>,
        ) -> u32 {
            let code = normalize_code(code);
            if let Some(&id) = location_ids.get(&code) {
                return id;
            }
            let id = locations.len() as u32;
            location_ids.insert(code.clone(), id);
            locations.push(code);
            id
        }

        let mut location_ids = FxHashMap::default();
        let mut locations: Vec<String> = Vec::new();
        let mut segment_ids = FxHashMap::default();
        let mut segments: Vec<SegmentMeta> = Vec::new();

        // Resolve rows in input order; the seat draw happens here so that the
        // draw sequence only depends on the record order and the seed.
        let mut rows: Vec<(u32, Edge)> = Vec::with_capacity(records.len());

        for record in records {
            let (Some(origin), Some(destination)) = (&record.origin, &record.destination) else {
                continue;
            };

            let from = intern_location(origin, &mut location_ids, &mut locations);
            let to = intern_location(destination, &mut location_ids, &mut locations);

            let segment = match segment_ids.get(&record.unique_id) {
                Some(&id) => id,
                None => {
                    let id = segments.len() as u32;
                    segment_ids.insert(record.unique_id.clone(), id);
                    segments.push(SegmentMeta {
                        code: record.unique_id.clone(),
                        kind: record.kind,
                        name: record.display_name().to_string(),
                    });
                    id
                }
            };

            let seat_available = rng.random_bool(config.seat_availability_rate);

            rows.push((
                from,
                Edge::new(
                    to,
                    segment,
                    record.departure_time.as_deref().and_then(parse_hms),
                    record.arrival_time.as_deref().and_then(parse_hms),
                    record.distance_km.unwrap_or(0.0),
                    record.duration_minutes.unwrap_or(0.0) / 60.0,
                    record.cost_inr.unwrap_or(0.0),
                    seat_available,
                ),
            ));
        }

        // Compressed-sparse-row placement, keeping input order per node.
        let mut offsets = vec![0u32; locations.len() + 1];
        for (from, _) in &rows {
            offsets[*from as usize + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        let mut cursors = offsets[..locations.len()].to_vec();
        let mut edges = vec![Edge::new(0, 0, None, None, 0.0, 0.0, 0.0, false); rows.len()];
        for (from, edge) in rows {
            let slot = cursors[from as usize];
            cursors[from as usize] += 1;
            edges[slot as usize] = edge;
        }

        log::info!(
            "Graph built: {} locations, {} edges",
            locations.len(),
            edges.len()
        );

        Self {
            location_ids,
            locations,
            segment_ids,
            segments,
            offsets,
            edges,
        }
    }

    // Getters/Setters

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    // Functions

    pub fn location_id(&self, code: &str) -> Option<u32> {
        self.location_ids.get(&normalize_code(code)).copied()
    }

    pub fn location_code(&self, id: u32) -> &str {
        &self.locations[id as usize]
    }

    pub fn outgoing(&self, id: u32) -> &[Edge] {
        let start = self.offsets[id as usize] as usize;
        let end = self.offsets[id as usize + 1] as usize;
        &self.edges[start..end]
    }

    pub fn segment_meta(&self, segment: u32) -> &SegmentMeta {
        &self.segments[segment as usize]
    }

    #[allow(dead_code)]
    pub fn segment_id(&self, code: &str) -> Option<u32> {
        self.segment_ids.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SegmentKind;

    fn seg(
        kind: SegmentKind,
        unique_id: &str,
        origin: &str,
        destination: &str,
        departure: &str,
        arrival: &str,
    ) -> SegmentRecord {
        SegmentRecord {
            kind,
            unique_id: unique_id.to_string(),
            origin: Some(origin.to_string()),
            destination: Some(destination.to_string()),
            departure_time: Some(departure.to_string()),
            arrival_time: Some(arrival.to_string()),
            duration_minutes: Some(60.0),
            cost_inr: Some(500.0),
            distance_km: Some(300.0),
            train_name: Some("Shatabdi".to_string()),
            airline: None,
        }
    }

    fn config_with_seed(seed: u64) -> OptimizerConfig {
        OptimizerConfig {
            seat_seed: Some(seed),
            ..OptimizerConfig::default()
        }
    }

    #[test]
    fn test_locations_interned_in_first_sight_order() {
        let records = vec![
            seg(SegmentKind::Train, "T1", "DEL", "JP", "10:00:00", "14:00:00"),
            seg(SegmentKind::Train, "T2", "JP", "KOTA", "15:00:00", "18:00:00"),
        ];
        let graph = TransportGraph::build(&records, &config_with_seed(42));

        assert_eq!(graph.location_id("DEL"), Some(0));
        assert_eq!(graph.location_id("JP"), Some(1));
        assert_eq!(graph.location_id("KOTA"), Some(2));
        assert_eq!(graph.location_id("BLR"), None);
        assert_eq!(graph.location_code(1), "JP");
    }

    #[test]
    fn test_lookup_normalizes_case_and_whitespace() {
        let records = vec![seg(
            SegmentKind::Train,
            "T1",
            "del",
            " jp ",
            "10:00:00",
            "14:00:00",
        )];
        let graph = TransportGraph::build(&records, &config_with_seed(42));

        assert_eq!(graph.location_id("DEL"), Some(0));
        assert_eq!(graph.location_id(" del "), Some(0));
        assert_eq!(graph.location_code(1), "JP");
    }

    #[test]
    fn test_outgoing_preserves_input_order() {
        let records = vec![
            seg(SegmentKind::Train, "T1", "A", "B", "06:00:00", "08:00:00"),
            seg(SegmentKind::Train, "T2", "C", "B", "06:00:00", "08:00:00"),
            seg(SegmentKind::Train, "T3", "A", "C", "09:00:00", "11:00:00"),
        ];
        let graph = TransportGraph::build(&records, &config_with_seed(42));

        let a = graph.location_id("A").unwrap();
        let outgoing = graph.outgoing(a);
        assert_eq!(outgoing.len(), 2);
        assert_eq!(graph.segment_meta(outgoing[0].segment()).code(), "T1");
        assert_eq!(graph.segment_meta(outgoing[1].segment()).code(), "T3");

        let b = graph.location_id("B").unwrap();
        assert!(graph.outgoing(b).is_empty());
    }

    #[test]
    fn test_records_without_endpoints_are_skipped() {
        let mut open_ended = seg(SegmentKind::Train, "T1", "A", "B", "06:00:00", "08:00:00");
        open_ended.destination = None;
        let records = vec![
            open_ended,
            seg(SegmentKind::Train, "T2", "A", "B", "09:00:00", "11:00:00"),
        ];
        let graph = TransportGraph::build(&records, &config_with_seed(42));

        assert_eq!(graph.num_edges(), 1);
        let a = graph.location_id("A").unwrap();
        assert_eq!(graph.segment_meta(graph.outgoing(a)[0].segment()).code(), "T2");
    }

    #[test]
    fn test_segment_meta_written_once() {
        let mut renamed = seg(SegmentKind::Train, "T1", "B", "C", "10:00:00", "12:00:00");
        renamed.train_name = Some("Duplicate".to_string());
        let records = vec![
            seg(SegmentKind::Train, "T1", "A", "B", "06:00:00", "08:00:00"),
            renamed,
        ];
        let graph = TransportGraph::build(&records, &config_with_seed(42));

        let id = graph.segment_id("T1").unwrap();
        assert_eq!(graph.segment_meta(id).name(), "Shatabdi");
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn test_malformed_times_parse_to_none() {
        let mut record = seg(SegmentKind::Train, "T1", "A", "B", "26:00:00", "08:00:00");
        record.duration_minutes = None;
        record.cost_inr = None;
        record.distance_km = None;
        let graph = TransportGraph::build(&[record], &config_with_seed(42));

        let edge = &graph.outgoing(graph.location_id("A").unwrap())[0];
        assert_eq!(edge.departure(), None);
        assert!(edge.arrival().is_some());
        assert_eq!(edge.duration_hours(), 0.0);
        assert_eq!(edge.cost(), 0.0);
        assert_eq!(edge.distance(), 0.0);
    }

    #[test]
    fn test_seat_draw_is_reproducible_for_a_seed() {
        let records: Vec<_> = (0..32)
            .map(|i| {
                seg(
                    SegmentKind::Train,
                    &format!("T{i}"),
                    "A",
                    "B",
                    "06:00:00",
                    "08:00:00",
                )
            })
            .collect();

        let first = TransportGraph::build(&records, &config_with_seed(42));
        let second = TransportGraph::build(&records, &config_with_seed(42));

        let a = first.location_id("A").unwrap();
        let seats_1: Vec<_> = first.outgoing(a).iter().map(|e| e.seat_available()).collect();
        let seats_2: Vec<_> = second.outgoing(a).iter().map(|e| e.seat_available()).collect();
        assert_eq!(seats_1, seats_2);
    }

    #[test]
    fn test_seat_rate_bounds() {
        let records = vec![seg(SegmentKind::Train, "T1", "A", "B", "06:00:00", "08:00:00")];

        let mut config = config_with_seed(1);
        config.seat_availability_rate = 1.0;
        let graph = TransportGraph::build(&records, &config);
        assert!(graph.outgoing(0)[0].seat_available());

        config.seat_availability_rate = 0.0;
        let graph = TransportGraph::build(&records, &config);
        assert!(!graph.outgoing(0)[0].seat_available());
    }
}
