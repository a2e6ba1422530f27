//! Point-Cloud Classifier
//!
//! Scores a candidate gesture against every template by greedy weighted
//! matching of normalized point clouds. Stroke order and direction do not
//! matter; the cloud is compared as a set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::point_cloud::{PointCloud, DEFAULT_RESAMPLE_POINTS, HALF_DIAGONAL};
use crate::capture::types::{Gesture, Point};
use crate::templates::library::Template;
use crate::{Error, Result};

/// Fewest points a candidate gesture may have
pub const MIN_CANDIDATE_POINTS: usize = 2;

/// Fewest points a gesture may be resampled to
pub const MIN_RESAMPLE_POINTS: usize = 2;

/// Best match for a candidate gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Name of the best-matching template
    pub label: String,
    /// Confidence in [0, 1]; 1.0 is an exact match
    pub score: f64,
    /// Raw cloud distance behind the score
    pub distance: f64,
}

/// A template already resampled and normalized for one resample count
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTemplate {
    pub name: String,
    pub cloud: PointCloud,
}

/// Greedy point-cloud classifier
#[derive(Debug, Clone)]
pub struct PointCloudClassifier {
    /// Number of points every gesture is resampled to
    resample_points: usize,
}

impl PointCloudClassifier {
    /// Create a classifier with the default resample count
    pub fn new() -> Self {
        Self {
            resample_points: DEFAULT_RESAMPLE_POINTS,
        }
    }

    /// Create a classifier with a custom resample count (at least 2)
    pub fn with_resample_points(n: usize) -> Self {
        Self {
            resample_points: n.max(MIN_RESAMPLE_POINTS),
        }
    }

    pub fn resample_points(&self) -> usize {
        self.resample_points
    }

    /// Classify a candidate against a set of templates.
    ///
    /// The template with the smallest cloud distance wins; on a tie the
    /// earliest template in `templates` is kept.
    pub fn classify(&self, candidate: &Gesture, templates: &[Template]) -> Result<ClassificationResult> {
        let ranked = self.rank(candidate, templates)?;
        // rank() never returns an empty list for a non-empty template set
        ranked.into_iter().next().ok_or(Error::NoTemplates)
    }

    /// Score every template, best first.
    ///
    /// Sorting is stable, so templates at equal distance keep load order.
    /// Templates are normalized on every call; use [`Self::prepare`] and
    /// [`Self::rank_prepared`] when the same set is matched repeatedly.
    pub fn rank(&self, candidate: &Gesture, templates: &[Template]) -> Result<Vec<ClassificationResult>> {
        if templates.is_empty() {
            return Err(Error::NoTemplates);
        }
        self.rank_prepared(candidate, &self.prepare(templates))
    }

    /// Normalize templates once for this classifier's resample count
    pub fn prepare(&self, templates: &[Template]) -> Vec<PreparedTemplate> {
        templates
            .iter()
            .map(|template| PreparedTemplate {
                name: template.name.clone(),
                cloud: PointCloud::from_gesture(&template.gesture, self.resample_points),
            })
            .collect()
    }

    /// [`Self::classify`] against templates from [`Self::prepare`]
    pub fn classify_prepared(
        &self,
        candidate: &Gesture,
        templates: &[PreparedTemplate],
    ) -> Result<ClassificationResult> {
        let ranked = self.rank_prepared(candidate, templates)?;
        ranked.into_iter().next().ok_or(Error::NoTemplates)
    }

    /// [`Self::rank`] against templates from [`Self::prepare`].
    ///
    /// Clouds prepared with a different resample count are rejected.
    pub fn rank_prepared(
        &self,
        candidate: &Gesture,
        templates: &[PreparedTemplate],
    ) -> Result<Vec<ClassificationResult>> {
        if templates.is_empty() {
            return Err(Error::NoTemplates);
        }
        if candidate.len() < MIN_CANDIDATE_POINTS {
            return Err(Error::InsufficientPoints {
                required: MIN_CANDIDATE_POINTS,
                actual: candidate.len(),
            });
        }
        if let Some(stale) = templates.iter().find(|t| t.cloud.len() != self.resample_points) {
            return Err(Error::Config(format!(
                "template '{}' was prepared with {} points, classifier uses {}",
                stale.name,
                stale.cloud.len(),
                self.resample_points
            )));
        }

        let cloud = PointCloud::from_gesture(candidate, self.resample_points);

        let mut results: Vec<ClassificationResult> = templates
            .iter()
            .map(|template| {
                let distance = greedy_cloud_match(cloud.points(), template.cloud.points());
                ClassificationResult {
                    label: template.name.clone(),
                    score: distance_to_score(distance),
                    distance,
                }
            })
            .collect();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        if let Some(best) = results.first() {
            debug!(
                label = %best.label,
                score = best.score,
                distance = best.distance,
                templates = templates.len(),
                "Classified gesture"
            );
        }

        Ok(results)
    }
}

impl Default for PointCloudClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a cloud distance to a confidence score in [0, 1]
pub fn distance_to_score(distance: f64) -> f64 {
    (1.0 - distance / HALF_DIAGONAL).max(0.0)
}

/// Best (smallest) greedy distance between two clouds of equal size.
///
/// Tries both matching directions and every `⌊√n⌋`-th starting point.
pub fn greedy_cloud_match(a: &[Point], b: &[Point]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let step = ((n as f64).sqrt().floor() as usize).max(1);
    let mut best = f64::INFINITY;

    for start in (0..n).step_by(step) {
        let forward = cloud_distance(a, b, start);
        let backward = cloud_distance(b, a, start);
        best = best.min(forward).min(backward);
    }

    best
}

/// Greedy weighted distance from cloud `a` to cloud `b`, starting at `a[start]`.
///
/// Each point of `a` (in order from `start`, wrapping) claims its nearest
/// unclaimed point of `b`. Earlier matches weigh more: the k-th match has
/// weight `1 - k/n`. The result is the weighted mean matched distance.
pub fn cloud_distance(a: &[Point], b: &[Point], start: usize) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let mut matched = vec![false; n];
    let mut sum = 0.0;
    let mut total_weight = 0.0;

    for k in 0..n {
        let i = (start + k) % n;

        let mut nearest = None;
        let mut min_dist = f64::INFINITY;
        for (j, p) in b[..n].iter().enumerate() {
            if matched[j] {
                continue;
            }
            let d = a[i].distance_to(p);
            if d < min_dist {
                min_dist = d;
                nearest = Some(j);
            }
        }

        if let Some(j) = nearest {
            matched[j] = true;
            let weight = 1.0 - k as f64 / n as f64;
            sum += weight * min_dist;
            total_weight += weight;
        }
    }

    if total_weight > 0.0 {
        sum / total_weight
    } else {
        0.0
    }
}
