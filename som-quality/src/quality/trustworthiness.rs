#[cfg(test)]
#[path = "../../tests/unit/quality/trustworthiness_test.rs"]
mod trustworthiness_test;

use super::*;
use crate::algorithms::ranks_of;
use crate::utils::parallel_range_collect;
use rustc_hash::FxHashMap;
use std::sync::RwLock;

const TRUSTWORTHINESS_NAME: &str = "trustworthiness";
const NEIGHBOURHOOD_PRESERVATION_NAME: &str = "neighbourhood_preservation";
const DEFAULT_NEIGHBOURHOOD_SIZE: usize = 5;

/// Measures trustworthiness of the map (Venna & Kaski): input records which are neighbours on
/// the map but not in the input space are penalized by their input space rank.
pub struct Trustworthiness {
    inner: RankPreservation,
}

/// Measures neighbourhood preservation (continuity) of the map (Venna & Kaski): input records
/// which are neighbours in the input space but not on the map are penalized by their map rank.
pub struct NeighbourhoodPreservation {
    inner: RankPreservation,
}

impl Trustworthiness {
    /// Creates a new instance of `Trustworthiness`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        Ok(Self { inner: RankPreservation::new(context, PreservationKind::Trustworthiness)? })
    }
}

impl NeighbourhoodPreservation {
    /// Creates a new instance of `NeighbourhoodPreservation`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        Ok(Self { inner: RankPreservation::new(context, PreservationKind::NeighbourhoodPreservation)? })
    }
}

macro_rules! impl_rank_preservation_measure {
    ($type_: ty, $name_: expr, $map_: literal, $unit_: literal) => {
        impl $type_ {
            /// Supported map level output names.
            pub const MAP_QUALITY_NAMES: &[&str] = &[$map_];

            /// Supported unit level output names.
            pub const UNIT_QUALITY_NAMES: &[&str] = &[$unit_];
        }

        impl QualityMeasure for $type_ {
            fn name(&self) -> &'static str {
                $name_
            }

            fn map_quality(&self, name: &str) -> QualityResult<Float> {
                match split_quality_name(name).0 {
                    $map_ => self.inner.evaluate(name).map(|values| values.map_value),
                    _ => Err(QualityError::not_found($name_, name)),
                }
            }

            fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
                match split_quality_name(name).0 {
                    $unit_ => self.inner.evaluate(name).map(|values| values.unit_values.clone()),
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

impl_rank_preservation_measure!(Trustworthiness, TRUSTWORTHINESS_NAME, "TW_Map", "TW_Unit");
impl_rank_preservation_measure!(NeighbourhoodPreservation, NEIGHBOURHOOD_PRESERVATION_NAME, "NP_Map", "NP_Unit");

#[derive(Clone, Copy)]
enum PreservationKind {
    Trustworthiness,
    NeighbourhoodPreservation,
}

/// Ranks of every other input record from the point of view of a single record.
struct SampleRanks {
    input_ranks: Vec<Float>,
    input_min_ranks: Vec<usize>,
    map_ranks: Vec<Float>,
    map_min_ranks: Vec<usize>,
}

struct PreservationValues {
    map_value: Float,
    unit_values: UnitQualities,
}

/// Keeps neighbourhood ranks which do not depend on neighbourhood size and caches results per
/// neighbourhood size.
struct RankPreservation {
    kind: PreservationKind,
    layer: Arc<Layer>,
    locations: Vec<usize>,
    ranks: Vec<SampleRanks>,
    cache: RwLock<FxHashMap<usize, Arc<PreservationValues>>>,
}

impl RankPreservation {
    fn new(context: &QualityContext, kind: PreservationKind) -> QualityResult<Self> {
        let layer = context.layer.clone();
        let data = context.data.as_ref();
        let locations = context.input_locations()?;
        let metric = layer.metric();

        let name = match kind {
            PreservationKind::Trustworthiness => TRUSTWORTHINESS_NAME,
            PreservationKind::NeighbourhoodPreservation => NEIGHBOURHOOD_PRESERVATION_NAME,
        };

        let ranks = context.environment.measure(name, || {
            parallel_range_collect(data.size(), |sample_idx| -> QualityResult<SampleRanks> {
                let input_distances = (0..data.size())
                    .map(|other_idx| {
                        if other_idx == sample_idx {
                            Ok(Float::INFINITY)
                        } else {
                            metric.distance(data.vector(sample_idx), data.vector(other_idx))
                        }
                    })
                    .collect::<QualityResult<Vec<_>>>()?;

                let map_distances = (0..data.size())
                    .map(|other_idx| {
                        if other_idx == sample_idx {
                            Float::INFINITY
                        } else {
                            layer.map_distance(locations[sample_idx], locations[other_idx])
                        }
                    })
                    .collect::<Vec<_>>();

                let (input_ranks, input_min_ranks) = ranks_of(input_distances.as_slice());
                let (map_ranks, map_min_ranks) = ranks_of(map_distances.as_slice());

                Ok(SampleRanks { input_ranks, input_min_ranks, map_ranks, map_min_ranks })
            })
        });

        let ranks = ranks.into_iter().collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { kind, layer, locations, ranks, cache: RwLock::new(FxHashMap::default()) })
    }

    fn evaluate(&self, name: &str) -> QualityResult<Arc<PreservationValues>> {
        let size = self.ranks.len();
        let max_k = (2 * size).saturating_sub(2) / 3;
        let k = parse_quality_param(name, DEFAULT_NEIGHBOURHOOD_SIZE.min(max_k))?;

        if k == 0 || k > max_k {
            return Err(QualityError::InvalidParameter(format!(
                "neighbourhood size {k} is outside of [1, {max_k}] for {size} input records"
            )));
        }

        if let Some(values) = self.cache.read().unwrap().get(&k) {
            return Ok(values.clone());
        }

        let values = Arc::new(self.compute(k));
        self.cache.write().unwrap().insert(k, values.clone());

        Ok(values)
    }

    fn compute(&self, k: usize) -> PreservationValues {
        let size = self.ranks.len();
        let scale = 2. / (k as Float * (2 * size - 3 * k - 1) as Float);

        let sample_values = parallel_range_collect(size, |sample_idx| {
            let ranks = &self.ranks[sample_idx];
            let (inside, outside, penalty_ranks) = match self.kind {
                PreservationKind::Trustworthiness => (&ranks.map_min_ranks, &ranks.input_min_ranks, &ranks.input_ranks),
                PreservationKind::NeighbourhoodPreservation => {
                    (&ranks.input_min_ranks, &ranks.map_min_ranks, &ranks.map_ranks)
                }
            };

            let penalty = (0..size)
                .filter(|&other_idx| other_idx != sample_idx && inside[other_idx] <= k && outside[other_idx] > k)
                .map(|other_idx| penalty_ranks[other_idx] - k as Float)
                .sum::<Float>();

            1. - scale * penalty
        });

        let map_value = sample_values.iter().sum::<Float>() / size as Float;

        let mut unit_sums = vec![(0., 0); self.layer.size()];
        self.locations.iter().zip(sample_values.iter()).for_each(|(&unit_idx, &value)| {
            unit_sums[unit_idx].0 += value;
            unit_sums[unit_idx].1 += 1;
        });

        let unit_values = UnitQualities::from_fn(&self.layer, |unit_idx| match unit_sums[unit_idx] {
            (_, 0) => 0.,
            (sum, count) => sum / count as Float,
        });

        PreservationValues { map_value, unit_values }
    }
}
