use crate::shared::geometry::{NormalizedRect, Point, ScreenRect};
use crate::tracking::domain::coordinate_translator::CoordinateTranslator;
use crate::tracking::domain::marker::{MarkerId, TrackedMarker};

/// Result of matching one cycle's detections against the live markers.
///
/// Detections are referenced by their index in the input slice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    /// Marker → detection pairs, in marker processing order.
    pub pairs: Vec<(MarkerId, usize)>,
    /// Detections that need a freshly created marker, in pool order.
    pub unmatched_detections: Vec<usize>,
    /// Markers no detection claimed this cycle.
    pub stale_markers: Vec<MarkerId>,
    /// Screen-space rect of every detection, indexed like the input.
    pub screen_rects: Vec<ScreenRect>,
}

impl Assignment {
    pub fn detection_for(&self, marker: MarkerId) -> Option<usize> {
        self.pairs
            .iter()
            .find(|(m, _)| *m == marker)
            .map(|(_, d)| *d)
    }

    pub fn marker_for(&self, detection: usize) -> Option<MarkerId> {
        self.pairs
            .iter()
            .find(|(_, d)| *d == detection)
            .map(|(m, _)| *m)
    }
}

/// Greedy nearest-neighbor matcher keeping markers spatially continuous
/// from one cycle to the next.
///
/// Each existing marker, in the given order, claims the remaining detection
/// whose screen-space center is closest to its own. The remaining pool is
/// re-sorted (stably) for every marker, so ties go to whichever detection
/// sits earlier in the pool after the previous sort. O(markers × detections
/// × log detections); not a minimum-weight matching, and the outcome depends
/// on marker order.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkerAssigner;

impl MarkerAssigner {
    pub fn new() -> Self {
        Self
    }

    pub fn assign(
        &self,
        existing: &[TrackedMarker],
        detections: &[NormalizedRect],
        translator: &CoordinateTranslator,
    ) -> Assignment {
        let screen_rects: Vec<ScreenRect> =
            detections.iter().map(|d| translator.convert(d)).collect();
        let centers: Vec<Point> = screen_rects.iter().map(ScreenRect::center).collect();

        let mut pool: Vec<usize> = (0..detections.len()).collect();
        let mut pairs = Vec::with_capacity(existing.len().min(detections.len()));
        let mut stale_markers = Vec::new();

        for marker in existing {
            if pool.is_empty() {
                stale_markers.push(marker.id);
                continue;
            }

            let anchor = marker.rect.center();
            pool.sort_by(|&a, &b| {
                anchor
                    .distance(&centers[a])
                    .total_cmp(&anchor.distance(&centers[b]))
            });
            let nearest = pool.remove(0);
            pairs.push((marker.id, nearest));
        }

        Assignment {
            pairs,
            unmatched_detections: pool,
            stale_markers,
            screen_rects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::{Orientation, Viewport};
    use approx::assert_relative_eq;
    use rstest::rstest;

    const SIZE: f64 = 1000.0;

    fn translator() -> CoordinateTranslator {
        CoordinateTranslator::new(Viewport::new(SIZE, SIZE), Orientation::LandscapeRight)
    }

    /// Detection whose converted screen rect is centered at `(cx, cy)`.
    fn detection_at(cx: f64, cy: f64, size: f64) -> NormalizedRect {
        NormalizedRect::new(
            (cx - size / 2.0) / SIZE,
            1.0 - (cy + size / 2.0) / SIZE,
            size / SIZE,
            size / SIZE,
        )
    }

    fn marker_at(id: u32, cx: f64, cy: f64) -> TrackedMarker {
        TrackedMarker::new(MarkerId(id), ScreenRect::centered_at(cx, cy, 50.0, 50.0))
    }

    fn assign(existing: &[TrackedMarker], detections: &[NormalizedRect]) -> Assignment {
        MarkerAssigner::new().assign(existing, detections, &translator())
    }

    #[test]
    fn test_helper_places_detection_center() {
        let rect = translator().convert(&detection_at(120.0, 340.0, 50.0));
        assert_relative_eq!(rect.center().x, 120.0, epsilon = 1e-9);
        assert_relative_eq!(rect.center().y, 340.0, epsilon = 1e-9);
    }

    #[test]
    fn test_marker_pairs_with_nearest_detection() {
        let markers = [marker_at(1, 100.0, 100.0)];
        let detections = [
            detection_at(50.0, 50.0, 50.0),
            detection_at(100.0, 100.0, 50.0),
        ];

        let result = assign(&markers, &detections);

        assert_eq!(result.pairs, vec![(MarkerId(1), 1)]);
        assert_eq!(result.unmatched_detections, vec![0]);
        assert!(result.stale_markers.is_empty());
    }

    #[test]
    fn test_no_markers_all_detections_unmatched() {
        let detections = [
            detection_at(50.0, 50.0, 50.0),
            detection_at(500.0, 500.0, 50.0),
        ];

        let result = assign(&[], &detections);

        assert!(result.pairs.is_empty());
        assert_eq!(result.unmatched_detections, vec![0, 1]);
        assert!(result.stale_markers.is_empty());
    }

    #[test]
    fn test_no_detections_all_markers_stale() {
        let markers = [marker_at(1, 100.0, 100.0), marker_at(2, 300.0, 300.0)];

        let result = assign(&markers, &[]);

        assert!(result.pairs.is_empty());
        assert!(result.unmatched_detections.is_empty());
        assert_eq!(result.stale_markers, vec![MarkerId(1), MarkerId(2)]);
        assert!(result.screen_rects.is_empty());
    }

    #[test]
    fn test_markers_at_detection_positions_match_exactly() {
        let detections = [
            detection_at(100.0, 100.0, 40.0),
            detection_at(500.0, 200.0, 40.0),
            detection_at(800.0, 700.0, 40.0),
        ];
        let t = translator();
        let mut markers: Vec<TrackedMarker> = detections
            .iter()
            .enumerate()
            .map(|(i, d)| TrackedMarker::new(MarkerId(i as u32), t.convert(d)))
            .collect();

        let forward = assign(&markers, &detections);
        markers.reverse();
        let backward = assign(&markers, &detections);

        for i in 0..detections.len() {
            assert_eq!(forward.detection_for(MarkerId(i as u32)), Some(i));
            assert_eq!(backward.detection_for(MarkerId(i as u32)), Some(i));
        }
        assert!(forward.unmatched_detections.is_empty());
        assert!(backward.stale_markers.is_empty());
    }

    #[test]
    fn test_marker_order_decides_contested_detection() {
        // Marker 2 is closer, but marker 1 is processed first and wins.
        let markers = [marker_at(1, 0.0, 500.0), marker_at(2, 10.0, 500.0)];
        let detections = [detection_at(6.0, 500.0, 20.0)];

        let result = assign(&markers, &detections);

        assert_eq!(result.pairs, vec![(MarkerId(1), 0)]);
        assert_eq!(result.stale_markers, vec![MarkerId(2)]);
    }

    #[test]
    fn test_equidistant_detections_first_in_pool_wins() {
        let markers = [marker_at(1, 100.0, 100.0)];
        let detections = [
            detection_at(400.0, 400.0, 20.0),
            detection_at(150.0, 100.0, 20.0),
            detection_at(150.0, 100.0, 20.0),
        ];

        let result = assign(&markers, &detections);

        assert_eq!(result.pairs, vec![(MarkerId(1), 1)]);
        assert_eq!(result.unmatched_detections, vec![2, 0]);
    }

    #[test]
    fn test_unmatched_detections_keep_last_sort_order() {
        let markers = [marker_at(1, 0.0, 0.0)];
        let detections = [
            detection_at(900.0, 900.0, 20.0),
            detection_at(10.0, 10.0, 20.0),
            detection_at(300.0, 300.0, 20.0),
        ];

        let result = assign(&markers, &detections);

        assert_eq!(result.pairs, vec![(MarkerId(1), 1)]);
        assert_eq!(result.unmatched_detections, vec![2, 0]);
    }

    #[test]
    fn test_stops_when_pool_is_exhausted() {
        let markers = [
            marker_at(1, 100.0, 100.0),
            marker_at(2, 400.0, 400.0),
            marker_at(3, 800.0, 800.0),
        ];
        let detections = [detection_at(790.0, 790.0, 20.0)];

        let result = assign(&markers, &detections);

        assert_eq!(result.pairs, vec![(MarkerId(1), 0)]);
        assert_eq!(result.stale_markers, vec![MarkerId(2), MarkerId(3)]);
    }

    #[test]
    fn test_each_marker_follows_its_face() {
        let markers = [marker_at(1, 100.0, 100.0), marker_at(2, 700.0, 600.0)];
        let detections = [
            detection_at(710.0, 590.0, 60.0),
            detection_at(95.0, 120.0, 60.0),
        ];

        let result = assign(&markers, &detections);

        assert_eq!(result.detection_for(MarkerId(1)), Some(1));
        assert_eq!(result.detection_for(MarkerId(2)), Some(0));
        assert_eq!(result.marker_for(0), Some(MarkerId(2)));
        assert_eq!(result.marker_for(5), None);
    }

    #[test]
    fn test_screen_rects_cached_per_detection() {
        let detections = [
            detection_at(100.0, 200.0, 40.0),
            detection_at(300.0, 400.0, 40.0),
        ];

        let result = assign(&[], &detections);

        assert_eq!(result.screen_rects.len(), 2);
        assert_relative_eq!(result.screen_rects[1].center().x, 300.0, epsilon = 1e-9);
        assert_relative_eq!(result.screen_rects[1].center().y, 400.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(0, 3)]
    #[case(2, 0)]
    #[case(1, 4)]
    #[case(4, 1)]
    #[case(3, 3)]
    #[case(5, 2)]
    fn test_cardinality_laws(#[case] marker_count: usize, #[case] detection_count: usize) {
        let markers: Vec<TrackedMarker> = (0..marker_count)
            .map(|i| marker_at(i as u32, 90.0 * i as f64, 40.0 * i as f64))
            .collect();
        let detections: Vec<NormalizedRect> = (0..detection_count)
            .map(|i| {
                let step = i as f64;
                detection_at(30.0 + 110.0 * step, 500.0 - 50.0 * step, 30.0)
            })
            .collect();

        let result = assign(&markers, &detections);

        assert_eq!(
            result.pairs.len() + result.stale_markers.len(),
            markers.len()
        );
        assert_eq!(
            result.pairs.len() + result.unmatched_detections.len(),
            detections.len()
        );

        let mut seen: Vec<usize> = result
            .pairs
            .iter()
            .map(|(_, d)| *d)
            .chain(result.unmatched_detections.iter().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, (0..detection_count).collect::<Vec<_>>());
    }
}
