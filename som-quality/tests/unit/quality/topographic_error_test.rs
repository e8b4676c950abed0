use super::*;
use crate::helpers::models::*;

/// A 3x3 grid where the weights of the bottom right unit are moved next to the top left one.
fn create_folded_layer() -> Layer {
    let mut weights = (0..3).flat_map(|y| (0..3).map(move |x| vec![x as Float, y as Float])).collect::<Vec<_>>();
    weights[8] = vec![-1., 0.];

    create_test_layer(3, 3, weights)
}

fn get_adjacent_samples() -> Vec<Vec<Float>> {
    vec![
        vec![0.4, 0.],
        vec![1.4, 0.],
        vec![0., 0.4],
        vec![1., 0.4],
        vec![2., 0.4],
        vec![0.4, 1.],
        vec![1.4, 1.],
        vec![0., 1.4],
        vec![1., 1.6],
    ]
}

#[test]
fn can_calculate_zero_error_when_all_winners_are_adjacent() {
    let context = create_test_context(create_folded_layer(), create_test_data(get_adjacent_samples()));

    let measure = TopographicError::new(&context).unwrap();

    assert_eq!(measure.map_quality("TE_Map"), Ok(0.));
    assert_eq!(measure.map_quality("TE8_Map"), Ok(0.));
    assert!(measure.unit_qualities("TE_Unit").unwrap().values().iter().all(|&value| value == 0.));
}

#[test]
fn can_calculate_error_for_one_non_adjacent_sample() {
    let mut samples = get_adjacent_samples();
    samples.push(vec![-0.4, 0.]);
    let context = create_test_context(create_folded_layer(), create_test_data(samples));

    let measure = TopographicError::new(&context).unwrap();

    assert_eq!(measure.map_quality("TE_Map"), Ok(0.1));
    assert_eq!(measure.map_quality("TE8_Map"), Ok(0.1));

    let unit_errors = measure.unit_qualities("TE_Unit").unwrap();
    assert_eq!(unit_errors.get(0, 0), 1. / 3.);
    assert_eq!(unit_errors.get(1, 0), 0.);
    assert_eq!(unit_errors.get(2, 2), 0.);
}

#[test]
fn can_distinguish_diagonal_neighbours() {
    let layer = create_test_layer(2, 2, vec![vec![0., 0.], vec![5., 5.], vec![6., 6.], vec![1., 0.]]);
    let context = create_test_context(layer, create_test_data(vec![vec![0.4, 0.]]));

    let measure = TopographicError::new(&context).unwrap();

    assert_eq!(measure.map_quality("TE_Map"), Ok(1.));
    assert_eq!(measure.map_quality("TE8_Map"), Ok(0.));
    assert_eq!(measure.unit_qualities("TE8_Unit").unwrap().values(), &[0., 0., 0., 0.]);
}

#[test]
fn can_reject_single_unit_layer() {
    let context = create_test_context(create_test_layer(1, 1, vec![vec![0.]]), create_test_data(vec![vec![1.]]));

    assert!(matches!(TopographicError::new(&context), Err(QualityError::InvalidData(_))));
}
