#[cfg(test)]
#[path = "../../tests/unit/quality/entropy_purity_test.rs"]
mod entropy_purity_test;

use super::*;
use rustc_hash::FxHashMap;

const MEASURE_NAME: &str = "entropy_purity";

/// Compares units (as clusters of mapped input records) with ground truth classes of the records.
///
/// Entropy is a cluster size weighted mean of class distribution entropies measured in bits,
/// purity is a share of records which belong to the majority class of their unit.
/// Both require every input record to carry a class label.
pub struct EntropyAndPurity {
    entropy: Float,
    purity: Float,
}

impl EntropyAndPurity {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["entropy", "purity"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &[];

    /// Creates a new instance of `EntropyAndPurity`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let data = context.data.as_ref();
        context.input_locations()?;

        let classes = data
            .iter()
            .enumerate()
            .map(|(input_idx, datum)| {
                datum.class.as_deref().ok_or_else(|| {
                    QualityError::InvalidData(format!("input record {input_idx} ('{}') has no class", datum.label))
                })
            })
            .collect::<QualityResult<Vec<_>>>()?;

        let total = classes.len();
        if total == 0 {
            return Ok(Self { entropy: 0., purity: 0. });
        }

        let (entropy, majority) = context.layer.units().iter().filter(|unit| !unit.is_empty()).fold(
            (0., 0_usize),
            |(entropy, majority), unit| {
                let mut counts = FxHashMap::<&str, usize>::default();
                unit.mapped.iter().for_each(|&input_idx| *counts.entry(classes[input_idx]).or_insert(0) += 1);

                let size = unit.hits() as Float;
                let cluster_entropy = counts
                    .values()
                    .map(|&count| {
                        let probability = count as Float / size;
                        -probability * probability.log2()
                    })
                    .sum::<Float>();

                let cluster_majority = counts.values().copied().max().unwrap_or(0);

                (entropy + size / total as Float * cluster_entropy, majority + cluster_majority)
            },
        );

        Ok(Self { entropy, purity: majority as Float / total as Float })
    }
}

impl QualityMeasure for EntropyAndPurity {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match name {
            "entropy" => Ok(self.entropy),
            "purity" => Ok(self.purity),
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
