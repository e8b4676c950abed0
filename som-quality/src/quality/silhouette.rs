#[cfg(test)]
#[path = "../../tests/unit/quality/silhouette_test.rs"]
mod silhouette_test;

use super::*;
use crate::models::{DistanceMetric, Unit};
use crate::utils::parallel_range_collect;

const SILHOUETTE_NAME: &str = "silhouette";
const SOM_SILHOUETTE_NAME: &str = "som_silhouette";
const PSEUDO_SILHOUETTE_NAME: &str = "pseudo_silhouette";

/// Computes classic silhouette coefficient where every non-empty unit is a cluster of the input
/// records mapped to it. A unit value is the mean coefficient of its records, empty units are NaN.
pub struct Silhouette {
    inner: SilhouetteValues,
}

/// Computes silhouette on unit level using unit weights as cluster representatives: cohesion of
/// a unit is the mean distance of its records to its own weights, separation is the smallest mean
/// distance of its records to weights of another non-empty unit.
pub struct SomSilhouette {
    inner: SilhouetteValues,
}

/// Computes silhouette on record level using unit weights as cluster representatives: cohesion
/// of a record is the distance to its unit weights, separation is the distance to the closest
/// weights of another non-empty unit.
pub struct PseudoSilhouette {
    inner: SilhouetteValues,
}

impl Silhouette {
    /// Creates a new instance of `Silhouette`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let clusters = SilhouetteClusters::new(context)?;
        let layer = context.layer.as_ref();
        let data = context.data.as_ref();
        let metric = layer.metric();

        let sample_values = context.environment.measure(SILHOUETTE_NAME, || {
            parallel_range_collect(data.size(), |input_idx| -> QualityResult<Float> {
                let own_idx = clusters.locations[input_idx];
                let own = layer.unit_at(own_idx);
                if own.hits() < 2 || clusters.non_empty.len() < 2 {
                    return Ok(0.);
                }

                let vector = data.vector(input_idx);
                let cohesion = mean_input_distance(metric, data, vector, &own.mapped, Some(input_idx))?;
                let separation = clusters.non_empty.iter().filter(|&&unit_idx| unit_idx != own_idx).try_fold(
                    Float::MAX,
                    |separation, &unit_idx| -> QualityResult<Float> {
                        let inputs = &layer.unit_at(unit_idx).mapped;
                        Ok(separation.min(mean_input_distance(metric, data, vector, inputs, None)?))
                    },
                )?;

                Ok(silhouette_score(cohesion, separation))
            })
        });
        let sample_values = sample_values.into_iter().collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { inner: SilhouetteValues::from_samples(context, SILHOUETTE_NAME, &sample_values) })
    }
}

impl SomSilhouette {
    /// Creates a new instance of `SomSilhouette`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let clusters = SilhouetteClusters::new(context)?;
        let layer = context.layer.as_ref();
        let data = context.data.as_ref();
        let metric = layer.metric();

        let mean_weight_distance = |unit: &Unit, weights: &[Float]| -> QualityResult<Float> {
            let total = unit.mapped.iter().try_fold(0., |total, &input_idx| -> QualityResult<Float> {
                Ok(total + metric.distance(data.vector(input_idx), weights)?)
            })?;

            Ok(total / unit.hits() as Float)
        };

        let unit_values = context.environment.measure(SOM_SILHOUETTE_NAME, || {
            parallel_range_collect(layer.size(), |unit_idx| -> QualityResult<Float> {
                let unit = layer.unit_at(unit_idx);
                if unit.is_empty() {
                    return Ok(Float::NAN);
                }
                if clusters.non_empty.len() < 2 {
                    return Ok(0.);
                }

                let cohesion = mean_weight_distance(unit, &unit.weights)?;
                let separation = clusters.non_empty.iter().filter(|&&other_idx| other_idx != unit_idx).try_fold(
                    Float::MAX,
                    |separation, &other_idx| -> QualityResult<Float> {
                        Ok(separation.min(mean_weight_distance(unit, &layer.unit_at(other_idx).weights)?))
                    },
                )?;

                Ok(silhouette_score(cohesion, separation))
            })
        });
        let unit_values = unit_values.into_iter().collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { inner: SilhouetteValues::new(context, SOM_SILHOUETTE_NAME, unit_values) })
    }
}

impl PseudoSilhouette {
    /// Creates a new instance of `PseudoSilhouette`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let clusters = SilhouetteClusters::new(context)?;
        let layer = context.layer.as_ref();
        let data = context.data.as_ref();
        let metric = layer.metric();

        let sample_values = context.environment.measure(PSEUDO_SILHOUETTE_NAME, || {
            parallel_range_collect(data.size(), |input_idx| -> QualityResult<Float> {
                if clusters.non_empty.len() < 2 {
                    return Ok(0.);
                }

                let own_idx = clusters.locations[input_idx];
                let vector = data.vector(input_idx);

                let cohesion = metric.distance(vector, &layer.unit_at(own_idx).weights)?;
                let separation = clusters.non_empty.iter().filter(|&&unit_idx| unit_idx != own_idx).try_fold(
                    Float::MAX,
                    |separation, &unit_idx| -> QualityResult<Float> {
                        Ok(separation.min(metric.distance(vector, &layer.unit_at(unit_idx).weights)?))
                    },
                )?;

                Ok(silhouette_score(cohesion, separation))
            })
        });
        let sample_values = sample_values.into_iter().collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { inner: SilhouetteValues::from_samples(context, PSEUDO_SILHOUETTE_NAME, &sample_values) })
    }
}

macro_rules! impl_silhouette_measure {
    ($type_: ty, $name_: expr, $output_: literal) => {
        impl $type_ {
            /// Supported map level output names.
            pub const MAP_QUALITY_NAMES: &[&str] = &[$output_];

            /// Supported unit level output names.
            pub const UNIT_QUALITY_NAMES: &[&str] = &[$output_];
        }

        impl QualityMeasure for $type_ {
            fn name(&self) -> &'static str {
                $name_
            }

            fn map_quality(&self, name: &str) -> QualityResult<Float> {
                match name {
                    $output_ => Ok(self.inner.map_value),
                    _ => Err(QualityError::not_found($name_, name)),
                }
            }

            fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
                match name {
                    $output_ => Ok(self.inner.unit_values.clone()),
                    _ => Err(QualityError::not_found($name_, name)),
                }
            }

            fn map_quality_names(&self) -> &'static [&'static str] {
                Self::MAP_QUALITY_NAMES
            }

            fn unit_quality_names(&self) -> &'static [&'static str] {
                Self::UNIT_QUALITY_NAMES
            }
        }
    };
}

impl_silhouette_measure!(Silhouette, SILHOUETTE_NAME, "silhouette");
impl_silhouette_measure!(SomSilhouette, SOM_SILHOUETTE_NAME, "som_silhouette");
impl_silhouette_measure!(PseudoSilhouette, PSEUDO_SILHOUETTE_NAME, "pseudo_silhouette");

struct SilhouetteClusters {
    locations: Vec<usize>,
    non_empty: Vec<usize>,
}

impl SilhouetteClusters {
    fn new(context: &QualityContext) -> QualityResult<Self> {
        let locations = context.input_locations()?;
        let non_empty = context
            .layer
            .units()
            .iter()
            .enumerate()
            .filter(|(_, unit)| !unit.is_empty())
            .map(|(unit_idx, _)| unit_idx)
            .collect();

        Ok(Self { locations, non_empty })
    }
}

struct SilhouetteValues {
    map_value: Float,
    unit_values: UnitQualities,
}

impl SilhouetteValues {
    fn new(context: &QualityContext, name: &str, values: Vec<Float>) -> Self {
        let unit_values = UnitQualities::new(context.layer.as_ref(), values);
        let (map_value, nan_count) = unit_values.mean_without_nan();

        if nan_count > 0 {
            (context.environment.logger)(&format!("{name}: {nan_count} empty unit(s) excluded from map value"));
        }

        Self { map_value, unit_values }
    }

    /// Averages record level values per unit.
    fn from_samples(context: &QualityContext, name: &str, sample_values: &[Float]) -> Self {
        let values = context
            .layer
            .units()
            .iter()
            .map(|unit| {
                if unit.is_empty() {
                    Float::NAN
                } else {
                    unit.mapped.iter().map(|&input_idx| sample_values[input_idx]).sum::<Float>() / unit.hits() as Float
                }
            })
            .collect();

        Self::new(context, name, values)
    }
}

fn silhouette_score(cohesion: Float, separation: Float) -> Float {
    let max = cohesion.max(separation);

    if max > 0. { (separation - cohesion) / max } else { 0. }
}

fn mean_input_distance(
    metric: &dyn DistanceMetric,
    data: &InputData,
    vector: &[Float],
    inputs: &[usize],
    skip: Option<usize>,
) -> QualityResult<Float> {
    let (total, count) = inputs.iter().filter(|&&input_idx| Some(input_idx) != skip).try_fold(
        (0., 0_usize),
        |(total, count), &input_idx| -> QualityResult<(Float, usize)> {
            Ok((total + metric.distance(vector, data.vector(input_idx))?, count + 1))
        },
    )?;

    Ok(if count > 0 { total / count as Float } else { 0. })
}
