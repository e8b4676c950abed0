#[cfg(test)]
#[path = "../../tests/unit/models/layer_test.rs"]
mod layer_test;

use super::*;
use crate::utils::{Float, QualityError, QualityResult, compare_floats};
use std::sync::Arc;

/// Represents a single unit (neuron) of the map.
#[derive(Clone, Debug)]
pub struct Unit {
    /// A horizontal position on the grid.
    pub x: usize,
    /// A vertical position on the grid.
    pub y: usize,
    /// A weight vector.
    pub weights: Vec<Float>,
    /// Indices of input records mapped to the unit.
    pub mapped: Vec<usize>,
}

impl Unit {
    /// Returns amount of mapped input records.
    pub fn hits(&self) -> usize {
        self.mapped.len()
    }

    /// Returns true if there are no mapped input records.
    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
    }
}

/// A trained map: rectangular (or toroidal) grid of units with a distance metric.
/// Units are stored row-major: `index = y * x_size + x`.
#[derive(Clone)]
pub struct Layer {
    x_size: usize,
    y_size: usize,
    units: Vec<Unit>,
    metric: Arc<dyn DistanceMetric>,
    is_torus: bool,
}

impl Layer {
    /// Creates a new flat layer from weights given in row-major order.
    pub fn new(
        x_size: usize,
        y_size: usize,
        weights: Vec<Vec<Float>>,
        metric: Arc<dyn DistanceMetric>,
    ) -> QualityResult<Self> {
        if x_size == 0 || y_size == 0 {
            return Err(QualityError::InvalidData(format!("empty grid: {x_size}x{y_size}")));
        }

        if weights.len() != x_size * y_size {
            return Err(QualityError::InvalidData(format!(
                "expected {} weight vectors, got {}",
                x_size * y_size,
                weights.len()
            )));
        }

        let dimension = weights[0].len();
        if weights.iter().any(|weights| weights.len() != dimension) {
            return Err(QualityError::InvalidData("weight vectors have different dimensions".to_string()));
        }

        let units = weights
            .into_iter()
            .enumerate()
            .map(|(index, weights)| Unit { x: index % x_size, y: index / x_size, weights, mapped: Vec::new() })
            .collect();

        Ok(Self { x_size, y_size, units, metric, is_torus: false })
    }

    /// Makes layer toroidal: lattice neighbourhood and distances wrap around both axes.
    pub fn with_torus(mut self, is_torus: bool) -> Self {
        self.is_torus = is_torus;
        self
    }

    /// Returns horizontal size.
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    /// Returns vertical size.
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Returns total amount of units.
    pub fn size(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the layer wraps around its borders.
    pub fn is_torus(&self) -> bool {
        self.is_torus
    }

    /// Returns the metric used to compare vectors.
    pub fn metric(&self) -> &dyn DistanceMetric {
        self.metric.as_ref()
    }

    /// Returns a dimension of unit weight vectors.
    pub fn dimension(&self) -> usize {
        self.units[0].weights.len()
    }

    /// Returns a unit at given position.
    pub fn unit(&self, x: usize, y: usize) -> Option<&Unit> {
        self.index_of(x, y).map(|index| &self.units[index])
    }

    /// Returns a unit with given index.
    pub fn unit_at(&self, index: usize) -> &Unit {
        &self.units[index]
    }

    /// Returns all units in row-major order.
    pub fn units(&self) -> &[Unit] {
        self.units.as_slice()
    }

    /// Returns an index of the unit at given position.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.x_size && y < self.y_size { Some(y * self.x_size + x) } else { None }
    }

    /// Returns a metric distance between weights of two units.
    pub fn weight_distance(&self, a: usize, b: usize) -> QualityResult<Float> {
        self.metric.distance(&self.units[a].weights, &self.units[b].weights)
    }

    /// Returns indices of `n` best matching units for the given vector ordered by increasing
    /// distance. Equally distant units are ordered by their index.
    pub fn winners(&self, vector: &[Float], n: usize) -> QualityResult<Vec<usize>> {
        let mut distances = self
            .units
            .iter()
            .enumerate()
            .map(|(index, unit)| self.metric.distance(&unit.weights, vector).map(|distance| (index, distance)))
            .collect::<QualityResult<Vec<_>>>()?;

        distances.sort_by(|(a_idx, a), (b_idx, b)| compare_floats(*a, *b).then(a_idx.cmp(b_idx)));

        Ok(distances.into_iter().take(n).map(|(index, _)| index).collect())
    }

    /// Returns absolute lattice offset `(dx, dy)` between two units.
    pub fn lattice_offset(&self, a: usize, b: usize) -> (usize, usize) {
        let (a, b) = (&self.units[a], &self.units[b]);
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);

        if self.is_torus { (dx.min(self.x_size - dx), dy.min(self.y_size - dy)) } else { (dx, dy) }
    }

    /// Returns Euclidean lattice distance between positions of two units.
    pub fn map_distance(&self, a: usize, b: usize) -> Float {
        let (dx, dy) = self.lattice_offset(a, b);

        ((dx * dx + dy * dy) as Float).sqrt()
    }

    /// Returns Chebyshev lattice distance between positions of two units.
    pub fn chebyshev_distance(&self, a: usize, b: usize) -> usize {
        let (dx, dy) = self.lattice_offset(a, b);

        dx.max(dy)
    }

    /// Checks whether two distinct units are direct neighbours in 4-neighbourhood.
    pub fn is_adjacent4(&self, a: usize, b: usize) -> bool {
        matches!(self.lattice_offset(a, b), (1, 0) | (0, 1))
    }

    /// Checks whether two distinct units are direct neighbours in 8-neighbourhood.
    pub fn is_adjacent8(&self, a: usize, b: usize) -> bool {
        a != b && self.chebyshev_distance(a, b) == 1
    }

    /// Returns indices of lattice neighbours in order: left, up, right, down. Neighbours outside
    /// of a flat grid are skipped, a torus wraps around.
    pub fn neighbours(&self, index: usize) -> Vec<usize> {
        let unit = &self.units[index];
        let (x, y) = (unit.x as i64, unit.y as i64);
        let (x_size, y_size) = (self.x_size as i64, self.y_size as i64);

        let mut neighbours = Vec::with_capacity(4);
        [(-1, 0), (0, -1), (1, 0), (0, 1)].iter().for_each(|&(dx, dy)| {
            let (nx, ny) = if self.is_torus {
                ((x + dx).rem_euclid(x_size), (y + dy).rem_euclid(y_size))
            } else {
                (x + dx, y + dy)
            };

            if (0..x_size).contains(&nx) && (0..y_size).contains(&ny) {
                let neighbour = (ny * x_size + nx) as usize;
                if neighbour != index && !neighbours.contains(&neighbour) {
                    neighbours.push(neighbour);
                }
            }
        });

        neighbours
    }

    /// Maps every input record to its best matching unit replacing any existing mapping.
    pub fn map_inputs(&mut self, data: &InputData) -> QualityResult<()> {
        let winners = data
            .iter()
            .map(|datum| self.winners(&datum.vector, 1).map(|winners| winners[0]))
            .collect::<QualityResult<Vec<_>>>()?;

        self.units.iter_mut().for_each(|unit| unit.mapped.clear());
        winners.into_iter().enumerate().for_each(|(input_idx, unit_idx)| self.units[unit_idx].mapped.push(input_idx));

        Ok(())
    }

    /// Returns, for every input record, the index of a unit it is mapped to.
    pub fn input_locations(&self, data_size: usize) -> Vec<Option<usize>> {
        let mut locations = vec![None; data_size];
        self.units.iter().enumerate().for_each(|(unit_idx, unit)| {
            unit.mapped.iter().filter(|&&input_idx| input_idx < data_size).for_each(|&input_idx| {
                locations[input_idx] = Some(unit_idx);
            })
        });

        locations
    }

    /// Maps a single input record to the unit with given index, keeping existing mappings.
    pub fn assign(&mut self, unit_idx: usize, input_idx: usize) {
        self.units[unit_idx].mapped.push(input_idx);
    }
}
