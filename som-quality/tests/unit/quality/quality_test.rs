use super::*;
use crate::helpers::models::*;

parameterized_test! {can_split_quality_name, (name, expected), {
    assert_eq!(split_quality_name(name), expected);
}}

can_split_quality_name! {
    case01_no_param: ("TE_Map", ("TE_Map", None)),
    case02_param: ("TW_Map|5", ("TW_Map", Some("5"))),
    case03_negative_param: ("TF|-2", ("TF", Some("-2"))),
    case04_empty_param: ("TP_Unit|", ("TP_Unit", Some(""))),
}

#[test]
fn can_parse_quality_param() {
    assert_eq!(parse_quality_param::<usize>("TW_Map|7", 5), Ok(7));
    assert_eq!(parse_quality_param::<usize>("TW_Map", 5), Ok(5));
    assert_eq!(parse_quality_param::<i64>("TF| -3 ", 0), Ok(-3));
    assert!(matches!(parse_quality_param::<usize>("TW_Map|x", 5), Err(QualityError::InvalidParameter(_))));
    assert!(matches!(parse_quality_param::<usize>("TW_Map|-1", 5), Err(QualityError::InvalidParameter(_))));
}

#[test]
fn can_access_unit_qualities() {
    let layer = create_grid_layer(3, 2);

    let qualities = UnitQualities::from_fn(&layer, |unit_idx| unit_idx as Float);

    assert_eq!((qualities.x_size(), qualities.y_size()), (3, 2));
    assert_eq!(qualities.get(2, 1), 5.);
    assert_eq!(qualities.get(1, 0), 1.);
    assert_eq!(qualities.values(), &[0., 1., 2., 3., 4., 5.]);
    assert_eq!(qualities.to_columns(), vec![vec![0., 3.], vec![1., 4.], vec![2., 5.]]);
}

parameterized_test! {can_calculate_mean_without_nan, (values, expected), {
    let layer = create_grid_layer(values.len(), 1);

    let result = UnitQualities::new(&layer, values).mean_without_nan();

    assert_eq!(result, expected);
}}

can_calculate_mean_without_nan! {
    case01_no_nan: (vec![1., 2., 3.], (2., 0)),
    case02_with_nan: (vec![1., Float::NAN, 3.], (2., 1)),
    case03_all_nan: (vec![Float::NAN, Float::NAN], (0., 2)),
}

#[test]
fn can_detect_unmapped_inputs() {
    let data = create_test_data(vec![vec![0., 0.], vec![1., 0.]]);
    let context = create_assigned_context(create_grid_layer(2, 1), data, &[1]);

    assert!(matches!(context.input_locations(), Err(QualityError::InvalidData(_))));
}

#[test]
fn can_reject_references_to_missing_inputs() {
    let data = create_test_data(vec![vec![0., 0.]]);
    let context = create_assigned_context(create_grid_layer(2, 1), data, &[0, 1]);
    let is_invalid_data = |result: QualityResult<()>| matches!(result, Err(QualityError::InvalidData(_)));

    assert!(is_invalid_data(context.check_mapping()));
    assert!(is_invalid_data(context.input_locations().map(|_| ())));
    assert!(is_invalid_data(QuantizationError::new(&context).map(|_| ())));
    assert!(is_invalid_data(SomDistortion::new(&context).map(|_| ())));
    assert!(is_invalid_data(Silhouette::new(&context).map(|_| ())));
    assert!(is_invalid_data(SomSilhouette::new(&context).map(|_| ())));
    assert!(is_invalid_data(PseudoSilhouette::new(&context).map(|_| ())));
    assert!(is_invalid_data(EntropyAndPurity::new(&context).map(|_| ())));
    assert!(is_invalid_data(Trustworthiness::new(&context).map(|_| ())));
}

#[test]
fn can_use_default_settings() {
    let settings = QualitySettings::default();

    assert_eq!(settings.distortion_sigma, 1.);
    assert_eq!(settings.topographic_function_offset, None);
}
