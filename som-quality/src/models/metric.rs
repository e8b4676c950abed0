#[cfg(test)]
#[path = "../../tests/unit/models/metric_test.rs"]
mod metric_test;

use crate::utils::{Float, QualityError, QualityResult};
use std::sync::Arc;

/// Specifies a distance function between two vectors of the same dimension.
/// Implementations are expected to be symmetric, non-negative and zero for equal vectors.
pub trait DistanceMetric: Send + Sync {
    /// Returns a distance between two vectors or an error if dimensions differ.
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float>;

    /// Returns a metric name.
    fn name(&self) -> &'static str;
}

fn ensure_same_dimension(a: &[Float], b: &[Float]) -> QualityResult<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(QualityError::Metric(format!("dimension mismatch: {} vs {}", a.len(), b.len())))
    }
}

/// Euclidean (L2) distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float> {
        SquaredEuclidean.distance(a, b).map(|value| value.sqrt())
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Squared Euclidean distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredEuclidean;

impl DistanceMetric for SquaredEuclidean {
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float> {
        ensure_same_dimension(a, b)?;

        Ok(a.iter().zip(b.iter()).map(|(a, b)| (a - b) * (a - b)).sum())
    }

    fn name(&self) -> &'static str {
        "squared-euclidean"
    }
}

/// Manhattan (L1) distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float> {
        ensure_same_dimension(a, b)?;

        Ok(a.iter().zip(b.iter()).map(|(a, b)| (a - b).abs()).sum())
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Chebyshev (L∞) distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl DistanceMetric for Chebyshev {
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float> {
        ensure_same_dimension(a, b)?;

        Ok(a.iter().zip(b.iter()).fold(0., |acc: Float, (a, b)| acc.max((a - b).abs())))
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}

/// Cosine distance: `1 - cos(a, b)`. Returns zero when any of vectors has zero length.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cosine;

impl DistanceMetric for Cosine {
    fn distance(&self, a: &[Float], b: &[Float]) -> QualityResult<Float> {
        ensure_same_dimension(a, b)?;

        let (dot, norm_a, norm_b) =
            a.iter().zip(b.iter()).fold((0., 0., 0.), |(dot, norm_a, norm_b): (Float, Float, Float), (a, b)| {
                (dot + a * b, norm_a + a * a, norm_b + b * b)
            });

        if norm_a == 0. || norm_b == 0. {
            return Ok(0.);
        }

        // NOTE clamp to avoid tiny negative values caused by rounding
        Ok((1. - dot / (norm_a.sqrt() * norm_b.sqrt())).max(0.))
    }

    fn name(&self) -> &'static str {
        "cosine"
    }
}

/// Returns a metric by its name.
pub fn metric_by_name(name: &str) -> QualityResult<Arc<dyn DistanceMetric>> {
    match name {
        "euclidean" => Ok(Arc::new(Euclidean)),
        "squared-euclidean" => Ok(Arc::new(SquaredEuclidean)),
        "manhattan" => Ok(Arc::new(Manhattan)),
        "chebyshev" => Ok(Arc::new(Chebyshev)),
        "cosine" => Ok(Arc::new(Cosine)),
        _ => Err(QualityError::InvalidParameter(format!("unknown metric: '{name}'"))),
    }
}
