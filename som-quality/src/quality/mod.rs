//! Contains quality measures which quantify how well a trained map preserves topology and
//! structure of its input space.
//!
//! Every measure exposes named map level values (a single scalar) and named unit level values
//! (a `x_size × y_size` grid). Output names of parameterized measures accept a numeric suffix
//! separated by `|`, e.g. `TW_Map|5`.

#[cfg(test)]
#[path = "../../tests/unit/quality/quality_test.rs"]
mod quality_test;

use crate::models::{InputData, Layer};
use crate::utils::{Environment, Float, QualityError, QualityResult};
use std::str::FromStr;
use std::sync::Arc;

mod distortion;
pub use self::distortion::SomDistortion;

mod entropy;
pub use self::entropy::EntropyMeasure;

mod entropy_purity;
pub use self::entropy_purity::EntropyAndPurity;

mod format;
pub use self::format::*;

mod intrinsic_distance;
pub use self::intrinsic_distance::IntrinsicDistance;

mod inversion;
pub use self::inversion::InversionMeasure;

mod quantization_error;
pub use self::quantization_error::QuantizationError;

mod registry;
pub use self::registry::*;

mod sammon;
pub use self::sammon::SammonMeasure;

mod silhouette;
pub use self::silhouette::{PseudoSilhouette, Silhouette, SomSilhouette};

mod topographic_error;
pub use self::topographic_error::TopographicError;

mod topographic_function;
pub use self::topographic_function::{TopographicFunction, TopographicFunctionValues};

mod topographic_product;
pub use self::topographic_product::TopographicProduct;

mod trustworthiness;
pub use self::trustworthiness::{NeighbourhoodPreservation, Trustworthiness};

/// Specifies a quality measure behavior.
pub trait QualityMeasure: Send + Sync {
    /// Returns a measure key as it is known to the registry.
    fn name(&self) -> &'static str;

    /// Returns a map level value with given name.
    fn map_quality(&self, name: &str) -> QualityResult<Float>;

    /// Returns unit level values with given name.
    fn unit_qualities(&self, name: &str) -> QualityResult<UnitQualities>;

    /// Returns supported map level names (without parameter suffix).
    fn map_quality_names(&self) -> &'static [&'static str];

    /// Returns supported unit level names (without parameter suffix).
    fn unit_quality_names(&self) -> &'static [&'static str];
}

/// Specifies parameters of measures which are not part of output names.
#[derive(Clone, Debug)]
pub struct QualitySettings {
    /// A width of the gaussian neighbourhood kernel used by the distortion measure.
    pub distortion_sigma: Float,
    /// A maximum absolute offset `K` of the topographic function.
    /// If not specified, the largest side of the grid is used.
    pub topographic_function_offset: Option<usize>,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self { distortion_sigma: 1., topographic_function_offset: None }
    }
}

/// Keeps everything a measure needs to be computed: the map, its input data and environment.
#[derive(Clone)]
pub struct QualityContext {
    /// A trained map with inputs mapped to units.
    pub layer: Arc<Layer>,
    /// Input data.
    pub data: Arc<InputData>,
    /// An environment.
    pub environment: Arc<Environment>,
    /// Measure specific settings.
    pub settings: QualitySettings,
}

impl QualityContext {
    /// Creates a new instance of `QualityContext` with default settings.
    pub fn new(layer: Arc<Layer>, data: Arc<InputData>, environment: Arc<Environment>) -> Self {
        Self { layer, data, environment, settings: QualitySettings::default() }
    }

    /// Sets measure specific settings.
    pub fn with_settings(mut self, settings: QualitySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Checks that every unit references only existing input records.
    pub(crate) fn check_mapping(&self) -> QualityResult<()> {
        let data_size = self.data.size();

        self.layer.units().iter().try_for_each(|unit| match unit.mapped.iter().find(|&&idx| idx >= data_size) {
            Some(input_idx) => Err(QualityError::InvalidData(format!(
                "unit ({}, {}) references input record {input_idx}, only {data_size} record(s) exist",
                unit.x, unit.y
            ))),
            None => Ok(()),
        })
    }

    /// Returns, for every input record, the index of its unit or an error if a record is
    /// not mapped or a unit references a missing record.
    pub(crate) fn input_locations(&self) -> QualityResult<Vec<usize>> {
        self.check_mapping()?;

        self.layer
            .input_locations(self.data.size())
            .into_iter()
            .enumerate()
            .map(|(input_idx, location)| {
                location.ok_or_else(|| {
                    QualityError::InvalidData(format!("input record {input_idx} is not mapped to any unit"))
                })
            })
            .collect()
    }
}

/// Represents unit level quality values stored row-major by `y`, then `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitQualities {
    x_size: usize,
    y_size: usize,
    values: Vec<Float>,
}

impl UnitQualities {
    /// Creates unit qualities from values in unit index order.
    pub fn new(layer: &Layer, values: Vec<Float>) -> Self {
        assert_eq!(values.len(), layer.size());

        Self { x_size: layer.x_size(), y_size: layer.y_size(), values }
    }

    /// Creates unit qualities using a function which evaluates a unit with given index.
    pub fn from_fn<F>(layer: &Layer, value_fn: F) -> Self
    where
        F: Fn(usize) -> Float,
    {
        Self::new(layer, (0..layer.size()).map(value_fn).collect())
    }

    /// Returns horizontal size.
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    /// Returns vertical size.
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Returns a value at given position.
    pub fn get(&self, x: usize, y: usize) -> Float {
        assert!(x < self.x_size && y < self.y_size);

        self.values[y * self.x_size + x]
    }

    /// Returns values in unit index order.
    pub fn values(&self) -> &[Float] {
        self.values.as_slice()
    }

    /// Returns values as nested vectors indexed by `[x][y]`.
    pub fn to_columns(&self) -> Vec<Vec<Float>> {
        (0..self.x_size).map(|x| (0..self.y_size).map(|y| self.get(x, y)).collect()).collect()
    }

    /// Returns a mean of all values ignoring NaN ones and the amount of ignored values.
    /// When every value is NaN, the mean is zero.
    pub fn mean_without_nan(&self) -> (Float, usize) {
        let (sum, count, nan_count) = self.values.iter().fold((0., 0, 0), |(sum, count, nan_count), &value| {
            if value.is_nan() { (sum, count, nan_count + 1) } else { (sum + value, count + 1, nan_count) }
        });

        (if count > 0 { sum / count as Float } else { 0. }, nan_count)
    }
}

/// Splits output name into base name and optional parameter: `"TW_Map|5"` -> `("TW_Map", Some("5"))`.
pub fn split_quality_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once('|') {
        Some((base, param)) => (base, Some(param)),
        None => (name, None),
    }
}

/// Parses an optional parameter of output name using default value when it is missing.
pub(crate) fn parse_quality_param<T: FromStr>(name: &str, default: T) -> QualityResult<T> {
    match split_quality_name(name).1 {
        Some(param) => param
            .trim()
            .parse::<T>()
            .map_err(|_| QualityError::InvalidParameter(format!("cannot parse parameter of '{name}'"))),
        None => Ok(default),
    }
}
