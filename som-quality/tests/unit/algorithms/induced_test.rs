use super::*;
use crate::helpers::models::*;

#[test]
fn can_use_triangular_matrix_symmetrically() {
    let mut matrix = TriangularMatrix::new(4, Float::INFINITY);

    matrix.set(1, 3, 2.);
    matrix.set(2, 2, 0.);

    assert_eq!(matrix.size(), 4);
    assert_eq!(matrix.get(3, 1), 2.);
    assert_eq!(matrix.get(1, 3), 2.);
    assert_eq!(matrix.get(2, 2), 0.);
    assert_eq!(matrix.get(0, 3), Float::INFINITY);
}

#[test]
fn can_compute_shortest_paths_on_chain() {
    let mut graph = InducedGraph::new(5);
    graph.connect(0, 1);
    graph.connect(1, 2);
    graph.connect(3, 2);
    graph.connect(3, 3);

    let distances = graph.compute_shortest_paths();

    assert_eq!(distances.get(0, 3), 3.);
    assert_eq!(distances.get(3, 0), 3.);
    assert_eq!(distances.get(1, 3), 2.);
    assert_eq!(distances.get(2, 2), 0.);
    assert_eq!(distances.get(0, 4), Float::INFINITY);
    assert!(!graph.is_connected(3, 3));
}

#[test]
fn can_compute_shortest_paths_with_cycle() {
    let mut graph = InducedGraph::new(6);
    (0..6).for_each(|idx| graph.connect(idx, (idx + 1) % 6));

    let distances = graph.compute_shortest_paths();

    assert_eq!(distances.get(0, 3), 3.);
    assert_eq!(distances.get(0, 5), 1.);
    assert_eq!(distances.get(1, 5), 2.);
    assert_eq!(distances.get(4, 1), 3.);
}

#[test]
fn can_build_graph_from_winners() {
    let layer = create_grid_layer(3, 1);
    let data = create_test_data(vec![vec![0.2, 0.], vec![1.8, 0.], vec![1.9, 0.]]);

    let graph = InducedGraph::from_winners(&layer, &data).unwrap();

    assert_eq!(graph.size(), 3);
    assert!(graph.is_connected(0, 1));
    assert!(graph.is_connected(2, 1));
    assert!(!graph.is_connected(0, 2));
}

#[test]
fn can_reject_single_unit_layer() {
    let layer = create_test_layer(1, 1, vec![vec![0.]]);
    let data = create_test_data(vec![vec![0.]]);

    assert!(matches!(InducedGraph::from_winners(&layer, &data), Err(QualityError::InvalidData(_))));
}
