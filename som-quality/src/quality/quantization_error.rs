#[cfg(test)]
#[path = "../../tests/unit/quality/quantization_error_test.rs"]
mod quantization_error_test;

use super::*;
use crate::utils::parallel_collect;

const MEASURE_NAME: &str = "quantization_error";

/// Computes distances between mapped inputs and weight vectors of their units.
///
/// Unit level `qe` is the sum of distances, `mqe` is their mean; units without mapped inputs
/// have zero values and are excluded from map level `mmqe`.
pub struct QuantizationError {
    layer: Arc<Layer>,
    qe: Vec<Float>,
    mqe: Vec<Float>,
    mapped_count: usize,
    non_empty_count: usize,
}

impl QuantizationError {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["qe", "mqe", "mmqe"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["qe", "mqe"];

    /// Creates a new instance of `QuantizationError`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        context.check_mapping()?;

        let layer = context.layer.clone();
        let metric = layer.metric();

        let unit_values = parallel_collect(layer.units(), |unit| -> QualityResult<(Float, Float)> {
            let qe = unit.mapped.iter().try_fold(0., |acc, &input_idx| {
                metric.distance(context.data.vector(input_idx), &unit.weights).map(|distance| acc + distance)
            })?;
            let mqe = if unit.is_empty() { 0. } else { qe / unit.hits() as Float };

            Ok((qe, mqe))
        });
        let (qe, mqe): (Vec<_>, Vec<_>) =
            unit_values.into_iter().collect::<QualityResult<Vec<_>>>()?.into_iter().unzip();

        let mapped_count = layer.units().iter().map(|unit| unit.hits()).sum();
        let non_empty_count = layer.units().iter().filter(|unit| !unit.is_empty()).count();

        Ok(Self { layer, qe, mqe, mapped_count, non_empty_count })
    }
}

impl QualityMeasure for QuantizationError {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        let total_qe: Float = self.qe.iter().sum();

        match name {
            "qe" => Ok(total_qe),
            "mqe" => Ok(if self.mapped_count > 0 { total_qe / self.mapped_count as Float } else { 0. }),
            "mmqe" => Ok(if self.non_empty_count > 0 {
                self.mqe.iter().sum::<Float>() / self.non_empty_count as Float
            } else {
                0.
            }),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match name {
            "qe" => Ok(UnitQualities::new(&self.layer, self.qe.clone())),
            "mqe" => Ok(UnitQualities::new(&self.layer, self.mqe.clone())),
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
