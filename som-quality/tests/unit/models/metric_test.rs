use super::*;
use crate::utils::is_close;

parameterized_test! {can_calculate_distance, (metric_name, a, b, expected), {
    can_calculate_distance_impl(metric_name, a, b, expected);
}}

can_calculate_distance! {
    case01_euclidean: ("euclidean", vec![0., 0.], vec![3., 4.], 5.),
    case02_squared_euclidean: ("squared-euclidean", vec![0., 0.], vec![3., 4.], 25.),
    case03_manhattan: ("manhattan", vec![1., -1.], vec![4., 3.], 7.),
    case04_chebyshev: ("chebyshev", vec![1., -1.], vec![4., 3.], 4.),
    case05_cosine_orthogonal: ("cosine", vec![1., 0.], vec![0., 2.], 1.),
    case06_cosine_same_direction: ("cosine", vec![1., 1.], vec![2., 2.], 0.),
    case07_cosine_opposite: ("cosine", vec![1., 0.], vec![-1., 0.], 2.),
    case08_cosine_zero_vector: ("cosine", vec![0., 0.], vec![1., 2.], 0.),
    case09_euclidean_same: ("euclidean", vec![1., 2., 3.], vec![1., 2., 3.], 0.),
}

fn can_calculate_distance_impl(metric_name: &str, a: Vec<Float>, b: Vec<Float>, expected: Float) {
    let metric = metric_by_name(metric_name).unwrap();

    let forward = metric.distance(a.as_slice(), b.as_slice()).unwrap();
    let backward = metric.distance(b.as_slice(), a.as_slice()).unwrap();

    assert!(is_close(forward, expected, 1E-9), "{forward} != {expected}");
    assert!(is_close(forward, backward, 1E-12));
    assert_eq!(metric.name(), metric_name);
}

#[test]
fn can_detect_dimension_mismatch() {
    let result = Euclidean.distance(&[1., 2.], &[1., 2., 3.]);

    assert_eq!(result, Err(QualityError::Metric("dimension mismatch: 2 vs 3".to_string())));
}

#[test]
fn can_reject_unknown_metric() {
    let result = metric_by_name("hamming");

    assert!(matches!(result, Err(QualityError::InvalidParameter(_))));
}
