//! This module reimports commonly used types.

pub use crate::models::DistanceMetric;
pub use crate::models::InputData;
pub use crate::models::InputDatum;
pub use crate::models::Layer;
pub use crate::models::Unit;
pub use crate::models::metric_by_name;

pub use crate::quality::QualityContext;
pub use crate::quality::QualityEvaluator;
pub use crate::quality::QualityMeasure;
pub use crate::quality::QualityRegistry;
pub use crate::quality::QualitySelector;
pub use crate::quality::QualitySettings;
pub use crate::quality::UnitQualities;

pub use crate::utils::DefaultRandom;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::Parallelism;
pub use crate::utils::QualityError;
pub use crate::utils::QualityResult;
pub use crate::utils::Random;
pub use crate::utils::compare_floats;
