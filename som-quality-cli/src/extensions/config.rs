//! Evaluation configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

extern crate serde_json;

use crate::extensions::evaluate::{QualityLevel, QualityRequest};
use serde::Deserialize;
use som_quality::prelude::*;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// An evaluation configuration.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies measures to evaluate.
    pub measures: Option<Vec<MeasureConfig>>,
    /// Specifies a seed for the random source used by tie breaking.
    pub random_seed: Option<u64>,
    /// Specifies amount of threads used by parallel computations.
    pub threads: Option<usize>,
    /// Specifies distortion measure configuration.
    pub distortion: Option<DistortionConfig>,
    /// Specifies topographic function configuration.
    pub topographic_function: Option<TopographicFunctionConfig>,
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A single requested measure output.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeasureConfig {
    /// A measure key, e.g. `trustworthiness`.
    pub key: String,
    /// An output name, e.g. `TW_Map`.
    pub variant: String,
    /// An optional output parameter, e.g. neighbourhood size.
    pub param: Option<String>,
    /// Specifies whether unit level values are requested. Default is false.
    pub unit: Option<bool>,
}

/// A distortion measure configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DistortionConfig {
    /// A width of the gaussian kernel. Default is 1.
    pub sigma: Option<Float>,
}

/// A topographic function configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TopographicFunctionConfig {
    /// A maximum absolute offset. Default is the largest side of the map.
    pub max_offset: Option<usize>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether progress is logged.
    pub enabled: bool,
}

impl Config {
    /// Returns quality requests defined in the configuration.
    pub fn requests(&self) -> Vec<QualityRequest> {
        self.measures
            .iter()
            .flatten()
            .map(|measure| {
                let selector = QualitySelector::new(&measure.key, &measure.variant, measure.param.as_deref());
                let level = if measure.unit.unwrap_or(false) { QualityLevel::Unit } else { QualityLevel::Map };

                QualityRequest::new(selector, level)
            })
            .collect()
    }

    /// Returns measure settings.
    pub fn settings(&self) -> QualitySettings {
        let defaults = QualitySettings::default();

        QualitySettings {
            distortion_sigma: self
                .distortion
                .as_ref()
                .and_then(|distortion| distortion.sigma)
                .unwrap_or(defaults.distortion_sigma),
            topographic_function_offset: self
                .topographic_function
                .as_ref()
                .and_then(|function| function.max_offset)
                .or(defaults.topographic_function_offset),
        }
    }

    /// Checks whether logging is enabled. Default is true.
    pub fn is_logging_enabled(&self) -> bool {
        self.logging.as_ref().is_none_or(|logging| logging.enabled)
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates an environment from config. A seed given explicitly overrides the configured one.
pub fn create_environment(config: &Config, seed: Option<u64>, logger: Option<InfoLogger>) -> Environment {
    let random: Arc<dyn Random> = match seed.or(config.random_seed) {
        Some(seed) => Arc::new(DefaultRandom::new_with_seed(seed)),
        None => Arc::new(DefaultRandom::default()),
    };

    let parallelism = config.threads.map(Parallelism::new_with_threads).unwrap_or_default();

    let logger: InfoLogger = match logger {
        Some(logger) if config.is_logging_enabled() => logger,
        _ => Arc::new(|_: &str| {}),
    };

    Environment::new(random, parallelism, logger)
}
