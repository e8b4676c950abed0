#[cfg(test)]
#[path = "../../tests/unit/quality/registry_test.rs"]
mod registry_test;

use super::*;
use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// A registry key of the topographic function.
pub const TOPOGRAPHIC_FUNCTION_KEY: &str = "topographic_function";

/// A function which creates a quality measure for given context.
pub type QualityMeasureFactory = fn(&QualityContext) -> QualityResult<Arc<dyn QualityMeasure>>;

/// Describes a quality measure known to the registry.
#[derive(Clone)]
pub struct QualityMeasureEntry {
    /// A unique measure key.
    pub key: &'static str,
    /// A measure constructor.
    pub create: QualityMeasureFactory,
    /// Supported map level output names.
    pub map_names: &'static [&'static str],
    /// Supported unit level output names.
    pub unit_names: &'static [&'static str],
}

/// Keeps all quality measures which can be requested by key.
pub struct QualityRegistry {
    entries: Vec<QualityMeasureEntry>,
}

macro_rules! measure_entry {
    ($key_: expr, $type_: ty) => {
        QualityMeasureEntry {
            key: $key_,
            create: |context| {
                let measure: Arc<dyn QualityMeasure> = Arc::new(<$type_>::new(context)?);
                Ok(measure)
            },
            map_names: <$type_>::MAP_QUALITY_NAMES,
            unit_names: <$type_>::UNIT_QUALITY_NAMES,
        }
    };
}

impl QualityRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds an entry replacing an existing one with the same key.
    pub fn add(mut self, entry: QualityMeasureEntry) -> Self {
        self.entries.retain(|existing| existing.key != entry.key);
        self.entries.push(entry);
        self
    }

    /// Returns an entry with given key.
    pub fn find(&self, key: &str) -> Option<&QualityMeasureEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Returns all entries in registration order.
    pub fn entries(&self) -> &[QualityMeasureEntry] {
        self.entries.as_slice()
    }
}

impl Default for QualityRegistry {
    fn default() -> Self {
        [
            measure_entry!("quantization_error", QuantizationError),
            measure_entry!("topographic_error", TopographicError),
            measure_entry!("topographic_product", TopographicProduct),
            measure_entry!(TOPOGRAPHIC_FUNCTION_KEY, TopographicFunction),
            measure_entry!("trustworthiness", Trustworthiness),
            measure_entry!("neighbourhood_preservation", NeighbourhoodPreservation),
            measure_entry!("intrinsic_distance", IntrinsicDistance),
            measure_entry!("entropy", EntropyMeasure),
            measure_entry!("distortion", SomDistortion),
            measure_entry!("inversion", InversionMeasure),
            measure_entry!("sammon", SammonMeasure),
            measure_entry!("silhouette", Silhouette),
            measure_entry!("som_silhouette", SomSilhouette),
            measure_entry!("pseudo_silhouette", PseudoSilhouette),
            measure_entry!("entropy_purity", EntropyAndPurity),
        ]
        .into_iter()
        .fold(Self::empty(), |registry, entry| registry.add(entry))
    }
}

/// Specifies a requested output in `key:variant|param` notation, e.g. `trustworthiness:TW_Map|5`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualitySelector {
    /// A measure key.
    pub key: String,
    /// An output name without parameter.
    pub variant: String,
    /// An optional output parameter.
    pub param: Option<String>,
}

impl QualitySelector {
    /// Creates a new instance of `QualitySelector`.
    pub fn new(key: &str, variant: &str, param: Option<&str>) -> Self {
        Self { key: key.to_string(), variant: variant.to_string(), param: param.map(|param| param.to_string()) }
    }

    /// Parses selector from `key:variant|param` notation, parameter is optional.
    pub fn parse(value: &str) -> QualityResult<Self> {
        let (key, name) = value
            .split_once(':')
            .ok_or_else(|| QualityError::InvalidParameter(format!("expected 'key:variant[|param]', got '{value}'")))?;

        let (variant, param) = split_quality_name(name);
        let (key, variant) = (key.trim(), variant.trim());

        if key.is_empty() || variant.is_empty() || param.is_some_and(|param| param.trim().is_empty()) {
            return Err(QualityError::InvalidParameter(format!("malformed quality selector '{value}'")));
        }

        Ok(Self::new(key, variant, param.map(str::trim)))
    }

    /// Returns an output name as it is understood by measures: `variant` or `variant|param`.
    pub fn output_name(&self) -> String {
        quality_name(&self.variant, self.param.as_deref())
    }
}

impl std::fmt::Display for QualitySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.output_name())
    }
}

/// Evaluates quality measures for a single map constructing every measure at most once.
pub struct QualityEvaluator {
    context: QualityContext,
    registry: QualityRegistry,
    measures: RwLock<FxHashMap<&'static str, Arc<dyn QualityMeasure>>>,
}

impl QualityEvaluator {
    /// Creates a new instance of `QualityEvaluator` with all known measures.
    pub fn new(context: QualityContext) -> Self {
        Self::new_with_registry(context, QualityRegistry::default())
    }

    /// Creates a new instance of `QualityEvaluator` with given registry.
    pub fn new_with_registry(context: QualityContext, registry: QualityRegistry) -> Self {
        Self { context, registry, measures: RwLock::new(FxHashMap::default()) }
    }

    /// Returns the context used to construct measures.
    pub fn context(&self) -> &QualityContext {
        &self.context
    }

    /// Returns the registry.
    pub fn registry(&self) -> &QualityRegistry {
        &self.registry
    }

    /// Returns a measure with given key constructing it on first request.
    pub fn measure(&self, key: &str) -> QualityResult<Arc<dyn QualityMeasure>> {
        if let Some(measure) = self.measures.read().unwrap().get(key) {
            return Ok(measure.clone());
        }

        let entry = self.registry.find(key).ok_or_else(|| QualityError::UnknownMeasure(key.to_string()))?;
        let measure = (entry.create)(&self.context)?;

        Ok(self.measures.write().unwrap().entry(entry.key).or_insert(measure).clone())
    }

    /// Returns a map level value.
    pub fn map_quality(&self, key: &str, variant: &str, param: Option<&str>) -> QualityResult<Float> {
        self.measure(key)?.map_quality(quality_name(variant, param).as_str())
    }

    /// Returns unit level values.
    pub fn unit_qualities(&self, key: &str, variant: &str, param: Option<&str>) -> QualityResult<UnitQualities> {
        self.measure(key)?.unit_qualities(quality_name(variant, param).as_str())
    }

    /// Returns the whole topographic function using the cached measure.
    pub fn topographic_function(&self) -> QualityResult<TopographicFunctionValues> {
        let measure = self.measure(TOPOGRAPHIC_FUNCTION_KEY)?;
        let max_offset = TopographicFunction::max_offset(&self.context);
        let max_offset_signed = max_offset as i64;

        let values = (-max_offset_signed..=max_offset_signed)
            .map(|offset| measure.map_quality(format!("TF|{offset}").as_str()))
            .collect::<QualityResult<Vec<_>>>()?;

        Ok(TopographicFunctionValues::new(max_offset, values))
    }

    /// Checks whether selected output is a map level one.
    pub fn is_map_quality(&self, selector: &QualitySelector) -> bool {
        self.registry.find(&selector.key).is_some_and(|entry| entry.map_names.contains(&selector.variant.as_str()))
    }

    /// Checks whether selected output is a unit level one.
    pub fn is_unit_quality(&self, selector: &QualitySelector) -> bool {
        self.registry.find(&selector.key).is_some_and(|entry| entry.unit_names.contains(&selector.variant.as_str()))
    }
}

fn quality_name(variant: &str, param: Option<&str>) -> String {
    match param {
        Some(param) => format!("{variant}|{param}"),
        None => variant.to_string(),
    }
}
