
use crate::extensions::map::{InputFile, MapFile, UnitFile, create_map};
use som_quality::prelude::*;
use std::sync::Arc;

pub const SIMPLE_MAP_PATH: &str = "tests/data/simple.map.json";
pub const SIMPLE_CONFIG_PATH: &str = "tests/data/simple.config.json";

/// Creates a map description with units given in row-major order.
pub fn create_map_file(x_size: usize, y_size: usize, weights: Vec<Vec<Float>>, inputs: Vec<Vec<Float>>) -> MapFile {
    MapFile {
        x_size,
        y_size,
        torus: None,
        metric: None,
        units: weights
            .into_iter()
            .enumerate()
            .map(|(idx, weights)| UnitFile { x: idx % x_size, y: idx / x_size, weights })
            .collect(),
        inputs: inputs
            .into_iter()
            .enumerate()
            .map(|(idx, vector)| InputFile { label: format!("input{idx}"), vector, class: None })
            .collect(),
    }
}

/// Creates a line map `size x 1` with unit weights equal to their positions.
pub fn create_line_map_file(size: usize, inputs: Vec<Float>) -> MapFile {
    create_map_file(
        size,
        1,
        (0..size).map(|idx| vec![idx as Float]).collect(),
        inputs.into_iter().map(|value| vec![value]).collect(),
    )
}

pub fn create_test_evaluator(map: MapFile) -> QualityEvaluator {
    let (layer, data) = create_map(map).expect("cannot create map");

    QualityEvaluator::new(QualityContext::new(
        Arc::new(layer),
        Arc::new(data),
        Arc::new(Environment::new_repeatable()),
    ))
}
