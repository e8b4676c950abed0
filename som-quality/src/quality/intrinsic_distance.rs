#[cfg(test)]
#[path = "../../tests/unit/quality/intrinsic_distance_test.rs"]
mod intrinsic_distance_test;

use super::*;
use crate::algorithms::LatticeGraph;
use crate::utils::parallel_range_collect;

const MEASURE_NAME: &str = "intrinsic_distance";

/// Combines quantization error with the length of the shortest lattice path between best and
/// second best matching units, where every lattice edge is weighted by the distance between
/// weight vectors of its units.
pub struct IntrinsicDistance {
    layer: Arc<Layer>,
    map_value: Float,
    unit_values: Vec<Float>,
}

impl IntrinsicDistance {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["ID_Map"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["ID_Unit"];

    /// Creates a new instance of `IntrinsicDistance`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.clone();
        let data = context.data.as_ref();
        if layer.size() < 2 {
            return Err(QualityError::InvalidData("intrinsic distance requires at least two units".to_string()));
        }

        let graph = LatticeGraph::new(layer.as_ref())?;

        let sample_values = context.environment.measure(MEASURE_NAME, || {
            parallel_range_collect(data.size(), |input_idx| -> QualityResult<(usize, Float)> {
                let vector = data.vector(input_idx);
                let winners = layer.winners(vector, 2)?;
                let (first, second) = (winners[0], winners[1]);

                let quantization_error = layer.metric().distance(vector, &layer.unit_at(first).weights)?;

                Ok((first, quantization_error + graph.shortest_path(first, second)))
            })
        });
        let sample_values = sample_values.into_iter().collect::<QualityResult<Vec<_>>>()?;

        let mut unit_sums = vec![(0., 0_usize); layer.size()];
        sample_values.iter().for_each(|&(unit_idx, value)| {
            unit_sums[unit_idx].0 += value;
            unit_sums[unit_idx].1 += 1;
        });

        let map_value = if sample_values.is_empty() {
            0.
        } else {
            sample_values.iter().map(|(_, value)| value).sum::<Float>() / sample_values.len() as Float
        };

        let unit_values = unit_sums
            .into_iter()
            .map(|(sum, count)| if count == 0 { 0. } else { sum / count as Float })
            .collect();

        Ok(Self { layer, map_value, unit_values })
    }
}

impl QualityMeasure for IntrinsicDistance {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "ID_Map" => Ok(self.map_value),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match name {
            "ID_Unit" => Ok(UnitQualities::new(&self.layer, self.unit_values.clone())),
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
