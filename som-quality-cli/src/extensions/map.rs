//! Reads a trained map and its input data from JSON description.

#[cfg(test)]
#[path = "../../tests/unit/extensions/map_test.rs"]
mod map_test;

extern crate serde_json;

use serde::Deserialize;
use som_quality::prelude::*;
use std::io::{BufReader, Read};

/// A trained map description.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MapFile {
    /// Amount of columns.
    pub x_size: usize,
    /// Amount of rows.
    pub y_size: usize,
    /// Specifies whether the lattice wraps around both axes.
    pub torus: Option<bool>,
    /// A distance metric name. Default is `euclidean`.
    pub metric: Option<String>,
    /// Map units.
    pub units: Vec<UnitFile>,
    /// Input records.
    pub inputs: Vec<InputFile>,
}

/// A single unit description.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UnitFile {
    /// A column.
    pub x: usize,
    /// A row.
    pub y: usize,
    /// A weight vector.
    pub weights: Vec<Float>,
}

/// A single input record description.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    /// An identifier of the record.
    pub label: String,
    /// A record vector.
    pub vector: Vec<Float>,
    /// An optional ground truth class.
    pub class: Option<String>,
}

/// Reads a map description and returns the layer with every input mapped to its best matching unit.
pub fn read_map<R: Read>(reader: BufReader<R>) -> GenericResult<(Layer, InputData)> {
    let map: MapFile =
        serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize map file: '{err}'"))?;

    create_map(map)
}

/// Creates a layer and input data from map description.
pub fn create_map(map: MapFile) -> GenericResult<(Layer, InputData)> {
    let MapFile { x_size, y_size, torus, metric, units, inputs } = map;

    if units.len() != x_size * y_size {
        let expected = x_size * y_size;
        return Err(format!("expected {expected} units for {x_size}x{y_size} grid, got {}", units.len()).into());
    }

    let mut weights: Vec<Option<Vec<Float>>> = vec![None; units.len()];
    for unit in units {
        if unit.x >= x_size || unit.y >= y_size {
            return Err(format!("unit position ({}, {}) is outside of {x_size}x{y_size} grid", unit.x, unit.y).into());
        }

        let slot = &mut weights[unit.y * x_size + unit.x];
        if slot.is_some() {
            return Err(format!("duplicate unit at position ({}, {})", unit.x, unit.y).into());
        }

        *slot = Some(unit.weights);
    }
    let weights = weights.into_iter().flatten().collect::<Vec<_>>();

    let metric = metric_by_name(metric.as_deref().unwrap_or("euclidean"))?;
    let data = InputData::new(
        inputs
            .into_iter()
            .map(|input| {
                let datum = InputDatum::new(&input.label, input.vector);
                match input.class {
                    Some(class) => datum.with_class(&class),
                    None => datum,
                }
            })
            .collect(),
    )?;

    if !data.is_empty() && data.dimension() != weights.first().map_or(0, |weights| weights.len()) {
        return Err(format!("input dimension {} does not match map dimension", data.dimension()).into());
    }

    let mut layer = Layer::new(x_size, y_size, weights, metric)?.with_torus(torus.unwrap_or(false));
    layer.map_inputs(&data)?;

    Ok((layer, data))
}
