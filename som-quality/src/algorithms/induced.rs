#[cfg(test)]
#[path = "../../tests/unit/algorithms/induced_test.rs"]
mod induced_test;

use crate::models::{InputData, Layer};
use crate::utils::{Float, QualityError, QualityResult};

/// A symmetric square matrix which stores only its lower triangle including the diagonal.
/// All access goes through `get`/`set` which accept indices in any order.
#[derive(Clone, Debug)]
pub struct TriangularMatrix {
    size: usize,
    data: Vec<Float>,
}

impl TriangularMatrix {
    /// Creates a new matrix filled with the given value.
    pub fn new(size: usize, value: Float) -> Self {
        Self { size, data: vec![value; size * (size + 1) / 2] }
    }

    /// Returns matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns a value at `(i, j)` which is the same as at `(j, i)`.
    pub fn get(&self, i: usize, j: usize) -> Float {
        self.data[Self::offset(i, j)]
    }

    /// Sets a value at `(i, j)` and, implicitly, at `(j, i)`.
    pub fn set(&mut self, i: usize, j: usize, value: Float) {
        self.data[Self::offset(i, j)] = value;
    }

    fn offset(i: usize, j: usize) -> usize {
        let (row, col) = if i >= j { (i, j) } else { (j, i) };

        row * (row + 1) / 2 + col
    }
}

/// An unweighted graph over units where two units are connected if they are the best and the
/// second best matching units of at least one input record.
#[derive(Clone, Debug)]
pub struct InducedGraph {
    adjacency: Vec<Vec<bool>>,
}

impl InducedGraph {
    /// Creates a new graph without edges.
    pub fn new(size: usize) -> Self {
        Self { adjacency: vec![vec![false; size]; size] }
    }

    /// Builds a graph from best and second best matching units of every input record.
    pub fn from_winners(layer: &Layer, data: &InputData) -> QualityResult<Self> {
        if layer.size() < 2 {
            return Err(QualityError::InvalidData("at least two units are required".to_string()));
        }

        let mut graph = Self::new(layer.size());
        for datum in data.iter() {
            let winners = layer.winners(&datum.vector, 2)?;
            graph.connect(winners[0], winners[1]);
        }

        Ok(graph)
    }

    /// Returns amount of nodes.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Connects two nodes. Repeated connections and self loops have no effect.
    pub fn connect(&mut self, a: usize, b: usize) {
        if a != b {
            self.adjacency[a][b] = true;
            self.adjacency[b][a] = true;
        }
    }

    /// Checks whether two nodes are directly connected.
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.adjacency[a][b]
    }

    /// Computes all pairs shortest path distances using iterative relaxation over intermediate
    /// nodes. Unreachable pairs have infinite distance.
    pub fn compute_shortest_paths(&self) -> TriangularMatrix {
        let size = self.size();
        let mut distances = TriangularMatrix::new(size, Float::INFINITY);

        (0..size).for_each(|row| {
            distances.set(row, row, 0.);
            (0..row).filter(|&col| self.adjacency[row][col]).for_each(|col| distances.set(row, col, 1.));
        });

        for via in 0..size {
            for row in 0..size {
                let to_via = distances.get(row, via);
                if row == via || !to_via.is_finite() {
                    continue;
                }

                // NOTE symmetric storage: only pairs with col < row are visited
                for col in 0..row {
                    if col == via || self.adjacency[row][col] {
                        continue;
                    }

                    let candidate = to_via + distances.get(via, col);
                    if candidate < distances.get(row, col) {
                        distances.set(row, col, candidate);
                    }
                }
            }
        }

        distances
    }
}
