use crate::keywords::KeywordRecord;

use super::Viewport;

pub const MIN_RADIUS: f32 = 20.0;
const RANGE_DIVISOR: f32 = 8.0;

pub fn radius_range(viewport: Viewport) -> (f32, f32) {
    (MIN_RADIUS, viewport.min_side() / RANGE_DIVISOR)
}

fn normalize_linear(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span.abs() < f32::EPSILON {
        return 0.5;
    }

    ((value - min) / span).clamp(0.0, 1.0)
}

pub fn scale_radii(records: &[KeywordRecord], viewport: Viewport) -> Vec<f32> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for record in records {
        min = min.min(record.size);
        max = max.max(record.size);
    }

    let (low, high) = radius_range(viewport);
    records
        .iter()
        .map(|record| low + (normalize_linear(record.size, min, max) * (high - low)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{radius_range, scale_radii};
    use crate::engine::Viewport;
    use crate::keywords::{Difficulty, KeywordRecord, SearchIntent};

    fn record(size: f32) -> KeywordRecord {
        KeywordRecord {
            text: format!("kw-{size}"),
            size,
            importance_score: size / 10.0,
            search_intent: SearchIntent::Navigational,
            difficulty: Difficulty::Medium,
            variations: Vec::new(),
        }
    }

    #[test]
    fn radii_stay_within_range() {
        let records = vec![record(10.0), record(340.0), record(1000.0)];
        let viewport = Viewport::new(800.0, 600.0);
        let (low, high) = radius_range(viewport);

        for radius in scale_radii(&records, viewport) {
            assert!(radius >= low && radius <= high);
        }
    }

    #[test]
    fn extremes_map_to_range_bounds() {
        let records = vec![record(10.0), record(1000.0)];
        let viewport = Viewport::new(800.0, 600.0);
        let (low, high) = radius_range(viewport);

        let radii = scale_radii(&records, viewport);
        assert_eq!(radii[0], low);
        assert_eq!(radii[1], high);
    }

    #[test]
    fn larger_size_never_gets_smaller_radius() {
        let records = vec![record(120.0), record(450.0), record(800.0)];
        let radii = scale_radii(&records, Viewport::new(1000.0, 700.0));

        assert!(radii[0] <= radii[1]);
        assert!(radii[1] <= radii[2]);
    }

    #[test]
    fn degenerate_domain_yields_midpoint() {
        let viewport = Viewport::new(800.0, 600.0);
        let (low, high) = radius_range(viewport);
        let midpoint = low + ((high - low) * 0.5);

        let equal = vec![record(500.0), record(500.0), record(500.0)];
        for radius in scale_radii(&equal, viewport) {
            assert_eq!(radius, midpoint);
        }

        let single = vec![record(42.0)];
        assert_eq!(scale_radii(&single, viewport), vec![midpoint]);
    }

    #[test]
    fn empty_records_scale_to_nothing() {
        assert!(scale_radii(&[], Viewport::new(800.0, 600.0)).is_empty());
    }

    #[test]
    fn range_tracks_shorter_viewport_side() {
        let (_, high) = radius_range(Viewport::new(1600.0, 400.0));
        assert_eq!(high, 50.0);
    }
}
