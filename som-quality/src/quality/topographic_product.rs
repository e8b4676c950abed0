#[cfg(test)]
#[path = "../../tests/unit/quality/topographic_product_test.rs"]
mod topographic_product_test;

use super::*;
use crate::algorithms::order_with_random_ties;
use crate::utils::parallel_range_collect;

const MEASURE_NAME: &str = "topographic_product";

/// Computes the topographic product (Bauer & Pawelzik) which compares the order of nearest
/// neighbours of every unit on the lattice and in the weight space.
///
/// Units with the same distance are put in random order using the environment random source,
/// so results are reproducible only with a seeded random. A ratio which is not finite or not
/// positive (e.g. equal weight vectors) contributes zero to the logarithmic sums.
pub struct TopographicProduct {
    layer: Arc<Layer>,
    /// `ln P3(j, k)` per unit `j`, stored at `j * (N - 1) + (k - 1)`.
    log_products: Vec<Float>,
}

impl TopographicProduct {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["TP_Map"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &["TP_Unit"];

    /// Creates a new instance of `TopographicProduct`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.clone();
        let size = layer.size();

        let weight_distances = (0..size)
            .map(|unit_idx| {
                (0..size)
                    .map(|other_idx| {
                        if unit_idx == other_idx {
                            Ok(Float::INFINITY)
                        } else {
                            layer.weight_distance(unit_idx, other_idx)
                        }
                    })
                    .collect::<QualityResult<Vec<_>>>()
            })
            .collect::<QualityResult<Vec<_>>>()?;

        let map_distances = (0..size)
            .map(|unit_idx| {
                (0..size)
                    .map(|other_idx| {
                        if unit_idx == other_idx { Float::INFINITY } else { layer.map_distance(unit_idx, other_idx) }
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        // NOTE orders are built sequentially from a single generator to keep seeded runs reproducible
        let mut rng = context.environment.random.get_rng();
        let orders = (0..size)
            .map(|unit_idx| {
                let map_order = order_with_random_ties(&map_distances[unit_idx], &mut rng);
                let weight_order = order_with_random_ties(&weight_distances[unit_idx], &mut rng);
                (map_order, weight_order)
            })
            .collect::<Vec<_>>();

        let log_products = context.environment.measure(MEASURE_NAME, || {
            parallel_range_collect(size, |unit_idx| {
                let (map_order, weight_order) = &orders[unit_idx];
                let (d_v, d_a) = (&weight_distances[unit_idx], &map_distances[unit_idx]);

                map_order
                    .iter()
                    .zip(weight_order.iter())
                    .enumerate()
                    .scan(0., |log_sum, (k, (&map_nn, &weight_nn))| {
                        *log_sum += log_ratio(d_v[map_nn], d_v[weight_nn]) + log_ratio(d_a[map_nn], d_a[weight_nn]);
                        Some(*log_sum / (2. * (k + 1) as Float))
                    })
                    .collect::<Vec<_>>()
            })
        });

        Ok(Self { layer, log_products: log_products.into_iter().flatten().collect() })
    }

    fn map_value(&self) -> Float {
        let size = self.layer.size();
        if size < 2 {
            return 0.;
        }

        self.log_products.iter().sum::<Float>() / (size * (size - 1)) as Float
    }

    fn unit_values(&self, k: usize) -> QualityResult<UnitQualities> {
        let neighbours = self.layer.size().saturating_sub(1);
        if k == 0 || k > neighbours {
            return Err(QualityError::InvalidParameter(format!("neighbour order {k} is outside of [1, {neighbours}]")));
        }

        Ok(UnitQualities::from_fn(&self.layer, |unit_idx| self.log_products[unit_idx * neighbours + k - 1]))
    }
}

fn log_ratio(numerator: Float, denominator: Float) -> Float {
    let ratio = numerator / denominator;

    if ratio.is_finite() && ratio > 0. { ratio.ln() } else { 0. }
}

impl QualityMeasure for TopographicProduct {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "TP_Map" => Ok(self.map_value()),
            _ => Err(QualityError::not_found(MEASURE_NAME, name)),
        }
    }

    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities> {
        match split_quality_name(name).0 {
            "TP_Unit" => self.unit_values(parse_quality_param(name, 1)?),
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
