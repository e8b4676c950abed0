#[cfg(test)]
#[path = "../../tests/unit/quality/sammon_test.rs"]
mod sammon_test;

use super::*;

const MEASURE_NAME: &str = "sammon";

/// Computes Sammon stress between lattice distances and weight space distances of all unit pairs:
/// `E = 1 / Σ dA * Σ (dA - dV)² / dA`. Lattice distance of distinct units is always positive.
pub struct SammonMeasure {
    stress: Float,
}

impl SammonMeasure {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["sammon"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &[];

    /// Creates a new instance of `SammonMeasure`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.as_ref();

        let mut map_total = 0.;
        let mut weighted_error = 0.;

        for a in 0..layer.size() {
            for b in 0..a {
                let d_a = layer.map_distance(a, b);
                let d_v = layer.weight_distance(a, b)?;

                map_total += d_a;
                weighted_error += (d_a - d_v) * (d_a - d_v) / d_a;
            }
        }

        Ok(Self { stress: if map_total > 0. { weighted_error / map_total } else { 0. } })
    }
}

impl QualityMeasure for SammonMeasure {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "sammon" => Ok(self.stress),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        Err(QualityError::not_found(MEASURE_NAME, name))
    }

    fn map_quality_names(&self) -> &'static [&'static str] {
        Self::MAP_QUALITY_NAMES
    }

    fn unit_quality_names(&self) -> &'static [&'static str] {
        Self::UNIT_QUALITY_NAMES
    }
}
