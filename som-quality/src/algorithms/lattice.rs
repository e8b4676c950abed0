#[cfg(test)]
#[path = "../../tests/unit/algorithms/lattice_test.rs"]
mod lattice_test;

use crate::models::Layer;
use crate::utils::{Float, QualityResult};

/// A weighted graph over the 4-connected unit lattice: every edge between lattice neighbours is
/// weighted by the metric distance of their weight vectors. Edge weights are computed once.
pub struct LatticeGraph {
    edges: Vec<Vec<(usize, Float)>>,
}

impl LatticeGraph {
    /// Creates a new instance of `LatticeGraph` for the given layer.
    pub fn new(layer: &Layer) -> QualityResult<Self> {
        let edges = (0..layer.size())
            .map(|index| {
                layer
                    .neighbours(index)
                    .into_iter()
                    .map(|neighbour| layer.weight_distance(index, neighbour).map(|weight| (neighbour, weight)))
                    .collect::<QualityResult<Vec<_>>>()
            })
            .collect::<QualityResult<Vec<_>>>()?;

        Ok(Self { edges })
    }

    /// Returns amount of nodes in the graph.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Returns edges of the given node as `(neighbour, weight)` pairs.
    pub fn edges(&self, index: usize) -> &[(usize, Float)] {
        self.edges[index].as_slice()
    }

    /// Returns the shortest path distance between two units.
    ///
    /// # Panics
    /// Panics if the target is not reachable which is impossible on a connected lattice.
    pub fn shortest_path(&self, source: usize, target: usize) -> Float {
        let distances = self.dijkstra(source, Some(target));
        let distance = distances[target];

        assert!(distance.is_finite(), "lattice node {target} is not reachable from {source}");

        distance
    }

    /// Returns shortest path distances from the source to every unit.
    pub fn shortest_paths_from(&self, source: usize) -> Vec<Float> {
        self.dijkstra(source, None)
    }

    fn dijkstra(&self, source: usize, target: Option<usize>) -> Vec<Float> {
        let size = self.edges.len();
        let mut distances = vec![Float::INFINITY; size];
        let mut visited = vec![false; size];

        distances[source] = 0.;

        loop {
            // NOTE linear scan is fine for lattice sizes in the range of thousands
            let current = (0..size)
                .filter(|&idx| !visited[idx] && distances[idx].is_finite())
                .min_by(|&a, &b| distances[a].total_cmp(&distances[b]));

            let Some(current) = current else { break };

            visited[current] = true;
            if target == Some(current) {
                break;
            }

            self.edges[current].iter().filter(|(neighbour, _)| !visited[*neighbour]).for_each(|&(neighbour, weight)| {
                let candidate = distances[current] + weight;
                if candidate < distances[neighbour] {
                    distances[neighbour] = candidate;
                }
            });
        }

        distances
    }
}
