#[cfg(test)]
#[path = "../../tests/unit/quality/topographic_function_test.rs"]
mod topographic_function_test;

use super::*;
use crate::algorithms::{InducedGraph, TriangularMatrix};

const MEASURE_NAME: &str = "topographic_function";

/// Values of the topographic function for signed offsets in `[-K, K]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TopographicFunctionValues {
    max_offset: usize,
    values: Vec<Float>,
}

impl TopographicFunctionValues {
    pub(crate) fn new(max_offset: usize, values: Vec<Float>) -> Self {
        debug_assert_eq!(values.len(), 2 * max_offset + 1);

        Self { max_offset, values }
    }

    /// Returns maximum absolute offset `K`.
    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    /// Returns a value for signed offset or `None` if offset is outside of `[-K, K]`.
    pub fn get(&self, offset: i64) -> Option<Float> {
        let index = offset + self.max_offset as i64;

        if index < 0 { None } else { self.values.get(index as usize).copied() }
    }

    /// Returns all values, an offset `k` is stored at index `k + K`.
    pub fn values(&self) -> &[Float] {
        self.values.as_slice()
    }

    /// Iterates over `(offset, value)` pairs in increasing order of offsets.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Float)> + '_ {
        let max_offset = self.max_offset as i64;

        self.values.iter().enumerate().map(move |(index, &value)| (index as i64 - max_offset, value))
    }
}

/// Computes the topographic function (Villmann et al.) using the graph induced by best and
/// second best matching units.
///
/// For negative `k`, counts lattice neighbours which are further than `|k|` apart in the induced
/// graph (the map is folded less than the data). For positive `k`, counts units connected in the
/// induced graph which are further than `k` apart on the lattice (Chebyshev distance). Counts
/// are per ordered pair and normalized by amount of units; `f(0) = f(-1) + f(1)`.
pub struct TopographicFunction {
    values: TopographicFunctionValues,
}

impl TopographicFunction {
    /// Supported map level output names.
    pub const MAP_QUALITY_NAMES: &[&str] = &["TF"];

    /// Supported unit level output names.
    pub const UNIT_QUALITY_NAMES: &[&str] = &[];

    /// Creates a new instance of `TopographicFunction`.
    pub fn new(context: &QualityContext) -> QualityResult<Self> {
        let layer = context.layer.as_ref();
        let max_offset = Self::max_offset(context);

        let graph = InducedGraph::from_winners(layer, context.data.as_ref())?;
        let distances = context.environment.measure(MEASURE_NAME, || graph.compute_shortest_paths());

        Ok(Self { values: Self::evaluate(layer, &graph, &distances, max_offset) })
    }

    /// Returns maximum absolute offset `K` used for given context: the configured one or the
    /// largest side of the grid.
    pub fn max_offset(context: &QualityContext) -> usize {
        let layer = context.layer.as_ref();

        context.settings.topographic_function_offset.unwrap_or_else(|| layer.x_size().max(layer.y_size())).max(1)
    }

    /// Returns computed values.
    pub fn values(&self) -> &TopographicFunctionValues {
        &self.values
    }

    fn evaluate(
        layer: &Layer,
        graph: &InducedGraph,
        distances: &TriangularMatrix,
        max_offset: usize,
    ) -> TopographicFunctionValues {
        let size = layer.size();
        let normalize = |count: usize| count as Float / size as Float;

        let under_folding = |k: usize| {
            (0..size)
                .flat_map(|unit_idx| layer.neighbours(unit_idx).into_iter().map(move |other| (unit_idx, other)))
                .filter(|&(a, b)| distances.get(a, b) > k as Float)
                .count()
        };

        let over_folding = |k: usize| {
            (0..size)
                .flat_map(|a| (0..size).map(move |b| (a, b)))
                .filter(|&(a, b)| graph.is_connected(a, b) && layer.chebyshev_distance(a, b) > k)
                .count()
        };

        let mut values = vec![0.; 2 * max_offset + 1];
        (1..=max_offset).for_each(|k| {
            values[max_offset - k] = normalize(under_folding(k));
            values[max_offset + k] = normalize(over_folding(k));
        });
        values[max_offset] = values[max_offset - 1] + values[max_offset + 1];

        TopographicFunctionValues::new(max_offset, values)
    }
}

impl QualityMeasure for TopographicFunction {
    fn name(&self) -> &'static str {
        MEASURE_NAME
    }

    fn map_quality(&self, name: &str) -> QualityResult<Float> {
        match split_quality_name(name).0 {
            "TF" => {
                let offset = parse_quality_param::<i64>(name, 0)?;
                self.values.get(offset).ok_or_else(|| {
                    QualityError::InvalidParameter(format!(
                        "offset {offset} is outside of [-{0}, {0}]",
                        self.values.max_offset
                    ))
                })
            }
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
