#[cfg(test)]
#[path = "../../tests/unit/quality/inversion_test.rs"]
mod inversion_test;

use super::*;
use crate::utils::map_reduce;

const MEASURE_NAME: &str = "inversion";

/// Computes the organization measure of Zrehen & Blayo: a pair of lattice neighbours is locally
/// organized when no other unit's weight vector lies strictly inside the hypersphere whose
/// diameter is spanned by the pair's weight vectors. Every such `(pair, unit)` triple is counted
/// as an inversion.
///
/// The measure is cubic in the amount of units when computed naively and intended for small maps.
pub struct InversionMeasure {
    count: usize,
    units: usize,
}

impl InversionMeasure {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["inversion", "inversion_count"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &[];

    /// Creates a new instance of `InversionMeasure`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.as_ref();
        let size = layer.size();

        let pairs = (0..size)
            .flat_map(|a| layer.neighbours(a).into_iter().filter(move |&b| a < b).map(move |b| (a, b)))
            .collect::<Vec<_>>();

        let count = context.environment.measure(MEASURE_NAME, || {
            map_reduce(
                pairs.as_slice(),
                |&(a, b)| {
                    let (w_a, w_b) = (&layer.unit_at(a).weights, &layer.unit_at(b).weights);

                    (0..size)
                        .filter(|&other| other != a && other != b)
                        .filter(|&other| is_inside_sphere(w_a, w_b, &layer.unit_at(other).weights))
                        .count()
                },
                || 0,
                |a, b| a + b,
            )
        });

        Ok(Self { count, units: size })
    }
}

/// Checks whether `point` lies strictly inside the hypersphere with diameter `[a, b]`: the angle
/// at `point` of the triangle `(a, point, b)` is obtuse.
fn is_inside_sphere(a: &[Float], b: &[Float], point: &[Float]) -> bool {
    let dot = a.iter().zip(b.iter()).zip(point.iter()).map(|((a, b), p)| (a - p) * (b - p)).sum::<Float>();

    dot < 0.
}

impl QualityMeasure for InversionMeasure {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "inversion" => Ok(self.count as Float / self.units as Float),
            "inversion_count" => Ok(self.count as Float),
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
