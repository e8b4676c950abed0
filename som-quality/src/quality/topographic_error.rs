#[cfg(test)]
#[path = "../../tests/unit/quality/topographic_error_test.rs"]
mod topographic_error_test;

use super::*;
use crate::utils::parallel_range_collect;

const MEASURE_NAME: &str = "topographic_error";

/// Counts input records whose best and second best matching units are not lattice neighbours.
/// Both 4- and 8-neighbourhood variants are computed. Border units are not corrected for having
/// fewer neighbours.
pub struct TopographicError {
    layer: Arc<Layer>,
    samples: usize,
    hits: Vec<usize>,
    errors4: Vec<usize>,
    errors8: Vec<usize>,
}

impl TopographicError {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["TE_Map", "TE8_Map"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["TE_Unit", "TE8_Unit"];

    /// Creates a new instance of `TopographicError`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.clone();
        if layer.size() < 2 {
            return Err(QualityError::InvalidData("topographic error requires at least two units".to_string()));
        }

        let winners = parallel_range_collect(context.data.size(), |input_idx| {
            layer.winners(context.data.vector(input_idx), 2).map(|winners| (winners[0], winners[1]))
        })
        .into_iter()
        .collect::<QualityResult<Vec<_>>>()?;

        let mut hits = vec![0; layer.size()];
        let mut errors4 = vec![0; layer.size()];
        let mut errors8 = vec![0; layer.size()];

        winners.iter().for_each(|&(first, second)| {
            hits[first] += 1;
            if !layer.is_adjacent4(first, second) {
                errors4[first] += 1;
            }
            if !layer.is_adjacent8(first, second) {
                errors8[first] += 1;
            }
        });

        Ok(Self { layer, samples: winners.len(), hits, errors4, errors8 })
    }

    fn map_error(&self, errors: &[usize]) -> Float {
        if self.samples == 0 { 0. } else { errors.iter().sum::<usize>() as Float / self.samples as Float }
    }

    fn unit_errors(&self, errors: &[usize]) -> UnitQualities {
        UnitQualities::from_fn(&self.layer, |unit_idx| match self.hits[unit_idx] {
            0 => 0.,
            hits => errors[unit_idx] as Float / hits as Float,
        })
    }
}

impl QualityMeasure for TopographicError {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "TE_Map" => Ok(self.map_error(&self.errors4)),
            "TE8_Map" => Ok(self.map_error(&self.errors8)),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match name {
            "TE_Unit" => Ok(self.unit_errors(&self.errors4)),
            "TE8_Unit" => Ok(self.unit_errors(&self.errors8)),
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
