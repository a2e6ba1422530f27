//! Point-Cloud Normalization
//!
//! Brings a gesture into a canonical form so that two gestures can be
//! compared as unordered point clouds: uniform arc-length resampling to a
//! fixed count, centroid translation, and uniform scaling into a unit box.

use crate::capture::types::{Gesture, Point};

/// Default number of points a gesture is resampled to
pub const DEFAULT_RESAMPLE_POINTS: usize = 32;

/// Larger bounding-box side after scale normalization
pub const UNIT_SIZE: f64 = 1.0;

/// Half the diagonal of the unit box; the distance that maps to a zero score
pub const HALF_DIAGONAL: f64 = UNIT_SIZE * std::f64::consts::SQRT_2 / 2.0;

/// A resampled, centered and scale-normalized gesture
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    /// Normalize a gesture into a cloud of `n` points
    pub fn from_gesture(gesture: &Gesture, n: usize) -> Self {
        Self::from_points(gesture.points(), n)
    }

    /// Normalize a raw point sequence into a cloud of `n` points
    pub fn from_points(points: &[Point], n: usize) -> Self {
        let resampled = resample(points, n);
        let centered = translate_to_origin(&resampled);
        Self {
            points: scale_to_unit(&centered),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Total length of the polyline through all points, ignoring stroke boundaries
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Resample a point sequence into `n` points spaced evenly along its path.
///
/// Spacing is measured across stroke boundaries; each new point takes the
/// stroke id of the segment end it was interpolated towards. A sequence with
/// a single point, or whose length is zero or not finite, becomes `n` copies
/// of its first point.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let length = path_length(points);
    if n == 1 || !is_usable_extent(length) {
        return vec![first; n];
    }

    let interval = length / (n - 1) as f64;
    let mut resampled = Vec::with_capacity(n);
    resampled.push(first);

    let mut accumulated = 0.0;
    let mut previous = first;
    let mut i = 1;

    while i < points.len() && resampled.len() < n {
        let current = points[i];
        let d = previous.distance_to(&current);

        if d > 0.0 && accumulated + d >= interval {
            let t = (interval - accumulated) / d;
            let q = Point::new(
                previous.x + t * (current.x - previous.x),
                previous.y + t * (current.y - previous.y),
                current.stroke_id,
            );
            resampled.push(q);
            // q becomes the start of the remaining part of this segment
            previous = q;
            accumulated = 0.0;
        } else {
            accumulated += d;
            previous = current;
            i += 1;
        }
    }

    // Rounding can leave us a point short
    while resampled.len() < n {
        resampled.push(last);
    }

    resampled
}

/// Mean position of a point set
pub fn centroid(points: &[Point]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    (sx / n, sy / n)
}

/// Shift points so their centroid sits at the origin
pub fn translate_to_origin(points: &[Point]) -> Vec<Point> {
    let (cx, cy) = centroid(points);
    points
        .iter()
        .map(|p| Point::new(p.x - cx, p.y - cy, p.stroke_id))
        .collect()
}

/// Scale uniformly so the larger bounding-box side equals [`UNIT_SIZE`].
///
/// Degenerate clouds (all points at one location) are returned unchanged.
/// Any positive extent is scaled, however small.
pub fn scale_to_unit(points: &[Point]) -> Vec<Point> {
    let (min_x, max_x, min_y, max_y) = bounding_box(points);
    let extent = (max_x - min_x).max(max_y - min_y);

    let factor = if is_usable_extent(extent) {
        UNIT_SIZE / extent
    } else {
        1.0
    };

    points
        .iter()
        .map(|p| Point::new(p.x * factor, p.y * factor, p.stroke_id))
        .collect()
}

/// Positive and finite; zero means every point coincides
fn is_usable_extent(extent: f64) -> bool {
    extent.is_finite() && extent > 0.0
}

/// (min_x, max_x, min_y, max_y); all zero for an empty slice
fn bounding_box(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_point(x: f64, y: f64) -> Point {
        Point::new(x, y, 0)
    }

    fn circle(n: usize, radius: f64, cx: f64, cy: f64) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let angle = (i as f64 / (n - 1) as f64) * 2.0 * std::f64::consts::PI;
                make_point(cx + radius * angle.cos(), cy + radius * angle.sin())
            })
            .collect()
    }

    #[test]
    fn test_path_length() {
        let points = vec![make_point(0.0, 0.0), make_point(3.0, 0.0), make_point(3.0, 4.0)];
        assert!((path_length(&points) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_length_crosses_stroke_boundaries() {
        let points = vec![
            Point::new(0.0, 0.0, 0),
            Point::new(1.0, 0.0, 0),
            Point::new(1.0, 1.0, 1),
        ];
        assert!((path_length(&points) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_resample_count() {
        let points = circle(100, 10.0, 0.0, 0.0);
        for n in [2, 8, 32, 64, 200] {
            assert_eq!(resample(&points, n).len(), n);
        }
    }

    #[test]
    fn test_resample_line_is_evenly_spaced() {
        // Uneven input spacing
        let points = vec![
            make_point(0.0, 0.0),
            make_point(1.0, 0.0),
            make_point(7.0, 0.0),
            make_point(9.0, 0.0),
            make_point(31.0, 0.0),
        ];
        let resampled = resample(&points, 32);

        for (i, p) in resampled.iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-6, "point {} at {}", i, p.x);
            assert!(p.y.abs() < 1e-9);
        }
    }

    #[test]
    fn test_resample_keeps_endpoints() {
        let points = circle(50, 5.0, 2.0, 3.0);
        let resampled = resample(&points, 16);
        let first = resampled.first().unwrap();
        let last = resampled.last().unwrap();

        assert!(first.distance_to(&points[0]) < 1e-9);
        assert!(last.distance_to(points.last().unwrap()) < 1e-6);
    }

    #[test]
    fn test_resample_assigns_stroke_ids() {
        let points = vec![
            Point::new(0.0, 0.0, 0),
            Point::new(10.0, 0.0, 0),
            Point::new(10.0, 10.0, 1),
            Point::new(20.0, 10.0, 1),
        ];
        let resampled = resample(&points, 31);

        assert_eq!(resampled[0].stroke_id, 0);
        assert_eq!(resampled[5].stroke_id, 0);
        assert_eq!(resampled[30].stroke_id, 1);
        // Order along the path is preserved
        assert!(resampled.windows(2).all(|w| w[0].stroke_id <= w[1].stroke_id));
    }

    #[test]
    fn test_resample_single_point() {
        let resampled = resample(&[make_point(4.0, 5.0)], 32);
        assert_eq!(resampled.len(), 32);
        assert!(resampled.iter().all(|p| p.x == 4.0 && p.y == 5.0));
    }

    #[test]
    fn test_resample_zero_length_path() {
        let points = vec![make_point(1.0, 1.0), make_point(1.0, 1.0), make_point(1.0, 1.0)];
        let resampled = resample(&points, 8);
        assert_eq!(resampled.len(), 8);
        assert!(resampled.iter().all(|p| p.x == 1.0 && p.y == 1.0));
    }

    #[test]
    fn test_resample_empty_input() {
        assert!(resample(&[], 32).is_empty());
    }

    #[test]
    fn test_resample_twice_stays_close_for_circle() {
        // Resampled points lie on chords, so a second pass drifts slightly
        let radius = 10.0;
        let points = circle(400, radius, 0.0, 0.0);
        let once = resample(&points, 32);
        let twice = resample(&once, 32);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!(a.distance_to(b) < 1e-4 * radius, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_tiny_path_is_still_resampled() {
        let points = vec![make_point(0.0, 0.0), make_point(3e-12, 0.0)];
        let resampled = resample(&points, 4);

        assert!((resampled[1].x - 1e-12).abs() < 1e-24);
        assert!((resampled[3].x - 3e-12).abs() < 1e-24);
    }

    #[test]
    fn test_tiny_cloud_is_scaled_to_unit() {
        let points = vec![make_point(-1e-12, 0.0), make_point(1e-12, 0.5e-12)];
        let scaled = scale_to_unit(&points);

        assert!((scaled[1].x - scaled[0].x - UNIT_SIZE).abs() < 1e-9);
        assert!((scaled[1].y - scaled[0].y - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_extent_is_not_scaled() {
        let points = vec![make_point(0.0, 0.0), make_point(f64::INFINITY, 0.0)];
        assert_eq!(resample(&points, 3), vec![make_point(0.0, 0.0); 3]);
    }

    #[test]
    fn test_centroid() {
        let points = vec![make_point(0.0, 0.0), make_point(2.0, 0.0), make_point(2.0, 4.0), make_point(0.0, 4.0)];
        let (cx, cy) = centroid(&points);
        assert!((cx - 1.0).abs() < 1e-9);
        assert!((cy - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_translate_to_origin() {
        let points = vec![make_point(10.0, 10.0), make_point(20.0, 30.0)];
        let centered = translate_to_origin(&points);
        let (cx, cy) = centroid(&centered);
        assert!(cx.abs() < 1e-9);
        assert!(cy.abs() < 1e-9);
    }

    #[test]
    fn test_scale_to_unit_uses_larger_side() {
        let points = vec![make_point(-5.0, -1.0), make_point(5.0, 1.0)];
        let scaled = scale_to_unit(&points);

        let width = scaled[1].x - scaled[0].x;
        let height = scaled[1].y - scaled[0].y;
        assert!((width - UNIT_SIZE).abs() < 1e-9);
        assert!((height - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_scale_degenerate_cloud_is_identity() {
        let points = vec![make_point(0.5, 0.5), make_point(0.5, 0.5)];
        let scaled = scale_to_unit(&points);
        assert_eq!(scaled, points);
    }

    #[test]
    fn test_point_cloud_is_normalized() {
        let gesture = Gesture::new(circle(60, 50.0, 300.0, 300.0)).unwrap();
        let cloud = PointCloud::from_gesture(&gesture, 32);

        assert_eq!(cloud.len(), 32);
        let (cx, cy) = centroid(cloud.points());
        assert!(cx.abs() < 1e-9);
        assert!(cy.abs() < 1e-9);

        let (min_x, max_x, min_y, max_y) = bounding_box(cloud.points());
        let extent = (max_x - min_x).max(max_y - min_y);
        assert!((extent - UNIT_SIZE).abs() < 1e-9);
    }

    #[test]
    fn test_half_diagonal() {
        assert!((HALF_DIAGONAL - 0.5_f64.sqrt()).abs() < 1e-12);
    }
}
