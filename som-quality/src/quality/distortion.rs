#[cfg(test)]
#[path = "../../tests/unit/quality/distortion_test.rs"]
mod distortion_test;

use super::*;
use crate::utils::parallel_range_collect;

const MEASURE_NAME: &str = "distortion";

/// Computes SOM distortion: squared distances between every input record and every unit weighted
/// by a gaussian kernel of the lattice distance between the unit and the record's best matching
/// unit. A record's contribution is attributed to the unit it is mapped to.
pub struct SomDistortion {
    layer: Arc<Layer>,
    unit_totals: Vec<Float>,
}

impl SomDistortion {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["distortion"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["unitTotal", "unitAverage"];

    /// Creates a new instance of `SomDistortion`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        context.check_mapping()?;

        let layer = context.layer.clone();
        let sigma = context.settings.distortion_sigma;
        if !(sigma > 0.) {
            return Err(QualityError::InvalidParameter(format!("distortion sigma must be positive, got {sigma}")));
        }

        let metric = layer.metric();
        let kernel = |a: usize, b: usize| {
            let distance = layer.map_distance(a, b);
            (-(distance * distance) / (2. * sigma * sigma)).exp()
        };

        let unit_totals = parallel_range_collect(layer.size(), |unit_idx| -> QualityResult<Float> {
            let mut total = 0.;
            for &input_idx in layer.unit_at(unit_idx).mapped.iter() {
                let vector = context.data.vector(input_idx);
                for (other_idx, other) in layer.units().iter().enumerate() {
                    let distance = metric.distance(vector, &other.weights)?;
                    total += kernel(unit_idx, other_idx) * distance * distance;
                }
            }

            Ok(total)
        })
        .into_iter()
        .collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { layer, unit_totals })
    }
}

impl QualityMeasure for SomDistortion {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "distortion" => Ok(self.unit_totals.iter().sum()),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match name {
            "unitTotal" => Ok(UnitQualities::new(&self.layer, self.unit_totals.clone())),
            "unitAverage" => Ok(UnitQualities::from_fn(&self.layer, |unit_idx| {
                match self.layer.unit_at(unit_idx).hits() {
                    0 => 0.,
                    hits => self.unit_totals[unit_idx] / hits as Float,
                }
            })),
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
