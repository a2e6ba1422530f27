//! Recognition Tests
//!
//! End-to-end checks of the point-cloud classifier and decision gate, plus
//! property tests for normalization and invariance.

use gesture_recognizer::analysis::point_cloud::{path_length, resample, PointCloud};
use gesture_recognizer::capture::stroke_capture::StrokeCapture;
use gesture_recognizer::capture::types::{CaptureRegion, Gesture, Point, PointerSample};
use gesture_recognizer::targeting::decision_gate::{decide, Decision, RejectReason};
use gesture_recognizer::templates::io::load_library;
use gesture_recognizer::{ClassificationResult, Error, PointCloudClassifier, Template};
use proptest::prelude::*;
use std::f64::consts::PI;

// ============================================================================
// Helper Functions
// ============================================================================

/// Closed circle: `n` points from angle 0 around to 2π
fn circle_coords(n: usize, radius: f64, cx: f64, cy: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|k| {
            let angle = k as f64 * 2.0 * PI / (n - 1) as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn square_coords() -> Vec<(f64, f64)> {
    vec![(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)]
}

fn triangle_coords() -> Vec<(f64, f64)> {
    vec![(0.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (0.0, 1.0)]
}

fn template(name: &str, coords: &[(f64, f64)]) -> Template {
    Template::new(name, Gesture::from_coords(coords).unwrap())
}

fn shape_templates() -> Vec<Template> {
    vec![
        template("circle", &circle_coords(8, 1.0, 0.0, 0.0)),
        template("square", &square_coords()),
        template("triangle", &triangle_coords()),
    ]
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_circle_template_recognizes_drawn_circle() {
    let templates = vec![template("circle", &circle_coords(8, 1.0, 0.0, 0.0))];
    let candidate = Gesture::from_coords(&circle_coords(64, 50.0, 300.0, 300.0)).unwrap();

    let result = PointCloudClassifier::new().classify(&candidate, &templates).unwrap();

    assert_eq!(result.label, "circle");
    assert!(result.score > 0.9, "score was {}", result.score);
}

#[test]
fn test_circle_drawn_through_capture() {
    let mut capture = StrokeCapture::new(CaptureRegion::default());
    let coords = circle_coords(64, 50.0, 300.0, 300.0);

    let mut finalized = None;
    for &(x, y) in &coords {
        assert!(capture.tick(PointerSample::down(x, y)).is_none());
    }
    if let Some(result) = capture.tick(PointerSample::up(coords[63].0, coords[63].1)) {
        finalized = Some(result.unwrap());
    }
    let candidate = finalized.expect("stroke should finalize on release");

    let result = PointCloudClassifier::new()
        .classify(&candidate, &shape_templates())
        .unwrap();
    assert_eq!(result.label, "circle");
    assert!(result.score > 0.9, "score was {}", result.score);
}

#[test]
fn test_shapes_are_told_apart() {
    let classifier = PointCloudClassifier::new();
    let templates = shape_templates();

    let cases = [
        ("circle", circle_coords(40, 3.0, -7.0, 2.0)),
        ("square", square_coords().iter().map(|&(x, y)| (x * 20.0 + 5.0, y * 20.0)).collect()),
        ("triangle", triangle_coords().iter().map(|&(x, y)| (x * 0.1, y * 0.1)).collect()),
    ];

    for (expected, coords) in cases {
        let candidate = Gesture::from_coords(&coords).unwrap();
        let result = classifier.classify(&candidate, &templates).unwrap();
        assert_eq!(result.label, expected);
    }
}

#[test]
fn test_exact_template_copy_scores_one() {
    let templates = shape_templates();
    let candidate = templates[2].gesture.clone();

    let result = PointCloudClassifier::new().classify(&candidate, &templates).unwrap();
    assert_eq!(result.label, "triangle");
    assert!((result.score - 1.0).abs() < 1e-12);
}

#[test]
fn test_stroke_order_does_not_matter() {
    // Plus sign drawn horizontal-first vs vertical-first
    let h_first = Gesture::new(vec![
        Point::new(-1.0, 0.0, 0),
        Point::new(1.0, 0.0, 0),
        Point::new(0.0, -1.0, 1),
        Point::new(0.0, 1.0, 1),
    ])
    .unwrap();
    let v_first = Gesture::new(vec![
        Point::new(0.0, 1.0, 0),
        Point::new(0.0, -1.0, 0),
        Point::new(1.0, 0.0, 1),
        Point::new(-1.0, 0.0, 1),
    ])
    .unwrap();

    let mut templates = shape_templates();
    templates.push(Template::new("plus", h_first));

    let result = PointCloudClassifier::new().classify(&v_first, &templates).unwrap();
    assert_eq!(result.label, "plus");
    assert!(result.score > 0.9, "score was {}", result.score);
}

#[test]
fn test_wrong_but_confident_gesture_is_rejected() {
    let top = ClassificationResult {
        label: "square".to_string(),
        score: 0.95,
        distance: 0.035,
    };
    assert_eq!(
        decide(&top, "circle", 0.3),
        Decision::Rejected(RejectReason::WrongGesture)
    );
}

#[test]
fn test_gate_truth_table() {
    let make = |label: &str, score: f64| ClassificationResult {
        label: label.to_string(),
        score,
        distance: 0.0,
    };

    assert_eq!(decide(&make("circle", 0.9), "circle", 0.3), Decision::Accepted);
    assert_eq!(
        decide(&make("circle", 0.3), "circle", 0.3),
        Decision::Rejected(RejectReason::LowConfidence)
    );
    assert_eq!(
        decide(&make("square", 0.9), "circle", 0.3),
        Decision::Rejected(RejectReason::WrongGesture)
    );
    assert_eq!(
        decide(&make("square", 0.1), "circle", 0.3),
        Decision::Rejected(RejectReason::LowConfidence)
    );
}

#[test]
fn test_tiny_gestures_keep_their_label() {
    let classifier = PointCloudClassifier::new();
    let templates = vec![
        template("triangle", &triangle_coords()),
        template("square", &square_coords()),
    ];
    let square = Gesture::from_coords(&square_coords()).unwrap();

    for factor in [1.0, 1e-6, 1e-9, 1e-10, 1e-12] {
        let result = classifier.classify(&square.scaled(factor), &templates).unwrap();
        assert_eq!(result.label, "square", "at scale {}", factor);
        assert!(result.score > 0.99, "score {} at scale {}", result.score, factor);
    }
}

#[test]
fn test_classify_errors() {
    let classifier = PointCloudClassifier::new();
    let candidate = Gesture::from_coords(&square_coords()).unwrap();
    assert!(matches!(classifier.classify(&candidate, &[]), Err(Error::NoTemplates)));

    let dot = Gesture::from_coords(&[(3.0, 3.0)]).unwrap();
    assert!(matches!(
        classifier.classify(&dot, &shape_templates()),
        Err(Error::InsufficientPoints { required: 2, actual: 1 })
    ));
}

#[test]
fn test_shipped_templates_recognize_themselves() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
    let library = load_library(dir).unwrap();
    assert_eq!(
        library.names(),
        vec!["check", "circle", "cross", "plus", "square", "triangle", "zigzag"]
    );

    let classifier = PointCloudClassifier::new();
    for template in library.iter() {
        let drawn = template.gesture.scaled(80.0).translated(640.0, -480.0);
        let result = classifier.classify(&drawn, library.all()).unwrap();
        assert_eq!(result.label, template.name);
        assert!(result.score > 0.99);
    }
}

/// Distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy, a.stroke_id))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn resample_is_idempotent_on_lines(
        angle in 0.0f64..(2.0 * PI),
        length in 1.0f64..1000.0,
        cuts in prop::collection::vec(0.0f64..1.0, 0..20),
        n in 2usize..80,
    ) {
        let mut ts = cuts;
        ts.push(0.0);
        ts.push(1.0);
        ts.sort_by(|a, b| a.total_cmp(b));

        let (dx, dy) = (angle.cos(), angle.sin());
        let points: Vec<Point> = ts
            .iter()
            .map(|t| Point::new(dx * t * length, dy * t * length, 0))
            .collect();

        let once = resample(&points, n);
        let twice = resample(&once, n);

        prop_assert_eq!(once.len(), n);
        prop_assert_eq!(twice.len(), n);
        for (a, b) in once.iter().zip(twice.iter()) {
            prop_assert!(a.distance_to(b) < 1e-6 * length, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn resample_twice_stays_on_first_pass_path(
        coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..30),
        n in 2usize..64,
    ) {
        let points: Vec<Point> = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(x, y, (i / 5) as i32))
            .collect();
        let tolerance = 1e-9 * (1.0 + path_length(&points));

        let once = resample(&points, n);
        let twice = resample(&once, n);

        prop_assert_eq!(twice.len(), n);
        prop_assert!(twice[0].distance_to(&once[0]) <= tolerance);
        prop_assert!(twice[n - 1].distance_to(&once[n - 1]) <= tolerance);
        for q in &twice {
            let nearest = once
                .windows(2)
                .map(|w| distance_to_segment(q, &w[0], &w[1]))
                .fold(f64::INFINITY, f64::min);
            prop_assert!(nearest <= tolerance, "{:?} is {} off the path", q, nearest);
        }
    }

    #[test]
    fn label_survives_scale_and_translation(
        shape in 0usize..3,
        factor in 0.01f64..500.0,
        dx in -5000.0f64..5000.0,
        dy in -5000.0f64..5000.0,
    ) {
        let templates = shape_templates();
        let classifier = PointCloudClassifier::new();
        let base = Gesture::from_coords(&circle_coords(30, 1.3, 0.0, 0.0)).unwrap();
        let base = match shape {
            0 => base,
            1 => templates[1].gesture.scaled(0.8),
            _ => templates[2].gesture.translated(0.3, 0.3),
        };
        let moved = base.scaled(factor).translated(dx, dy);

        let a = classifier.classify(&base, &templates).unwrap();
        let b = classifier.classify(&moved, &templates).unwrap();

        prop_assert_eq!(a.label, b.label);
        prop_assert!((a.score - b.score).abs() < 1e-6);
    }

    #[test]
    fn score_stays_in_unit_range(
        coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..40),
    ) {
        let candidate = Gesture::from_coords(&coords).unwrap();
        let result = PointCloudClassifier::new().classify(&candidate, &shape_templates()).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.score));
        prop_assert!(result.distance >= 0.0);
    }

    #[test]
    fn normalized_cloud_has_requested_size(
        coords in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..50),
        n in 2usize..64,
    ) {
        let gesture = Gesture::from_coords(&coords).unwrap();
        let cloud = PointCloud::from_gesture(&gesture, n);
        prop_assert_eq!(cloud.len(), n);
    }
}
