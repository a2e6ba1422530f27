//! Gesture normalization and matching
//!
//! This module turns captured gestures into comparable point clouds and
//! scores them against templates using:
//! - Uniform arc-length resampling
//! - Centroid translation and unit-box scaling
//! - Greedy weighted point-cloud matching

pub mod point_cloud;
pub mod classifier;

pub use point_cloud::{PointCloud, DEFAULT_RESAMPLE_POINTS, HALF_DIAGONAL, UNIT_SIZE};
pub use classifier::{
    cloud_distance, greedy_cloud_match, ClassificationResult, PointCloudClassifier, PreparedTemplate,
};
