#[cfg(test)]
#[path = "../../tests/unit/quality/entropy_test.rs"]
mod entropy_test;

use super::*;

const MEASURE_NAME: &str = "entropy";

/// Computes Shannon entropy (natural logarithm) of the hit distribution over units.
/// Units without hits contribute zero.
pub struct EntropyMeasure {
    layer: Arc<Layer>,
    contributions: Vec<Float>,
}

impl EntropyMeasure {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["entropy"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["entropy"];

    /// Creates a new instance of `EntropyMeasure`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.clone();
        let total_hits = layer.units().iter().map(|unit| unit.hits()).sum::<usize>();

        let contributions = layer
            .units()
            .iter()
            .map(|unit| {
                if unit.is_empty() {
                    0.
                } else {
                    let probability = unit.hits() as Float / total_hits as Float;
                    -probability * probability.ln()
                }
            })
            .collect();

        Ok(Self { layer, contributions })
    }
}

impl QualityMeasure for EntropyMeasure {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "entropy" => Ok(self.contributions.iter().sum()),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match name {
            "entropy" => Ok(UnitQualities::new(&self.layer, self.contributions.clone())),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn map_quality_names(&self) -> &'static [&'static str] {
        Self::MAP_QUALITY_NAMES
    }

    fn unit_quality_names(&self) -> &'static [&'static str] {
        Self::UNIT_QUALITY_NAMES
    }
}
