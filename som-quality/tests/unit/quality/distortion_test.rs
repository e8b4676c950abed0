use super::*;
use crate::helpers::models::*;
use crate::utils::is_close;

#[test]
fn can_calculate_distortion_with_gaussian_kernel() {
    let data = create_test_data(vec![vec![0., 0.], vec![1., 0.], vec![1., 0.2]]);
    let context = create_test_context(create_grid_layer(2, 1), data);

    let measure = SomDistortion::new(&context).unwrap();
    let kernel = (-0.5 as Float).exp();
    // unit 0: record at (0, 0), unit 1: records at (1, 0) and (1, 0.2)
    let unit0 = kernel * 1.;
    let unit1 = kernel * 1. + (0.04 + kernel * 1.04);

    let totals = measure.unit_qualities("unitTotal").unwrap();
    let averages = measure.unit_qualities("unitAverage").unwrap();

    assert!(is_close(totals.get(0, 0), unit0, 1E-9));
    assert!(is_close(totals.get(1, 0), unit1, 1E-9));
    assert!(is_close(averages.get(1, 0), unit1 / 2., 1E-9));
    assert!(is_close(measure.map_quality("distortion").unwrap(), unit0 + unit1, 1E-9));
}

#[test]
fn can_use_zero_average_for_empty_unit() {
    let context = create_test_context(create_grid_layer(3, 1), create_test_data(vec![vec![0., 0.]]));

    let measure = SomDistortion::new(&context).unwrap();

    assert_eq!(measure.unit_qualities("unitAverage").unwrap().get(2, 0), 0.);
    assert_eq!(measure.unit_qualities("unitTotal").unwrap().get(2, 0), 0.);
}

#[test]
fn can_narrow_kernel_with_smaller_sigma() {
    let data = create_test_data(vec![vec![0., 0.], vec![1., 0.]]);
    let wide = create_test_context_with_settings(create_grid_layer(2, 1), data.clone(), QualitySettings::default());
    let narrow = create_test_context_with_settings(
        create_grid_layer(2, 1),
        data,
        QualitySettings { distortion_sigma: 0.1, ..QualitySettings::default() },
    );

    let wide = SomDistortion::new(&wide).unwrap().map_quality("distortion").unwrap();
    let narrow = SomDistortion::new(&narrow).unwrap().map_quality("distortion").unwrap();

    assert!(narrow < wide);
}

parameterized_test! {can_reject_invalid_sigma, sigma, {
    let settings = QualitySettings { distortion_sigma: sigma, ..QualitySettings::default() };
    let context = create_test_context_with_settings(create_grid_layer(2, 1), create_test_data(vec![]), settings);

    assert!(matches!(SomDistortion::new(&context), Err(QualityError::InvalidParameter(_))));
}}

can_reject_invalid_sigma! {
    case01_zero: 0.,
    case02_negative: -1.,
    case03_nan: Float::NAN,
}
