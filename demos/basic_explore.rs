//! Sweep an in-memory segment table around a reference corner.
//!
//! Run with: cargo run --example basic_explore

use segment_explorer::{
    explore, geo_utils, Bearing, BoundingBox, CollaboratorError, Coordinate, ExploreConfig,
    Segment, SegmentId, SegmentLookup, SegmentSearch, SegmentSummary,
};

/// Every segment is returned by every box; the band filter does the work.
struct InMemory(Vec<Segment>);

impl SegmentSearch for InMemory {
    fn search(&self, _: &BoundingBox, _: &str) -> Result<Vec<SegmentSummary>, CollaboratorError> {
        Ok(self
            .0
            .iter()
            .map(|s| SegmentSummary {
                id: s.id,
                name: s.name.clone(),
                start_latlng: s.start_latlng,
                end_latlng: s.end_latlng,
            })
            .collect())
    }
}

impl SegmentLookup for InMemory {
    fn lookup(&self, id: SegmentId) -> Result<Option<Segment>, CollaboratorError> {
        Ok(self.0.iter().find(|s| s.id == id).cloned())
    }
}

fn segment(id: SegmentId, name: &str, end: Coordinate, efforts: u64) -> Segment {
    Segment {
        id,
        name: name.to_string(),
        start_latlng: None,
        end_latlng: Some(end),
        effort_count: efforts,
    }
}

fn main() {
    let corner = Coordinate::new(37.512844, -121.881369);
    let sw_limit = geo_utils::project(&corner, 0.5, Bearing::SouthWest);
    let ne_limit = geo_utils::project(&corner, 0.5, Bearing::NorthEast);

    println!("Reference corner: {}", corner);
    println!("South-west limit: {}", sw_limit);
    println!("North-east limit: {}\n", ne_limit);

    let service = InMemory(vec![
        segment(1, "Creek Trail", Coordinate::new(37.5115, -121.8831), 4),
        segment(2, "Ridge Run", Coordinate::new(37.5141, -121.8797), 7),
        segment(3, "Far Away Loop", Coordinate::new(37.6, -121.7), 30),
    ]);

    let config = ExploreConfig {
        distance_start_km: 0,
        distance_end_km: 4,
        within_km: 0.5,
        ..Default::default()
    };

    match explore(&service, &service, &corner, &config) {
        Ok(result) => {
            println!("Segments {} efforts {}", result.segments.len(), result.total_efforts);
            for (name, efforts) in result.effort_breakdown() {
                println!("  {}: {}", name, efforts);
            }
        }
        Err(e) => println!("Exploration failed: {}", e),
    }
}
