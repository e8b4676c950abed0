use super::*;

#[test]
fn can_create_input_data() {
    let data = InputData::new(vec![
        InputDatum::new("a", vec![1., 2.]),
        InputDatum::new("b", vec![3., 4.]).with_class("first"),
    ])
    .unwrap();

    assert_eq!(data.size(), 2);
    assert_eq!(data.dimension(), 2);
    assert_eq!(data.vector(1), &[3., 4.]);
    assert_eq!(data.get(0).map(|datum| datum.label.as_str()), Some("a"));
    assert_eq!(data.get(1).and_then(|datum| datum.class.as_deref()), Some("first"));
    assert!(data.get(2).is_none());
}

#[test]
fn can_reject_inputs_with_different_dimensions() {
    let result = InputData::new(vec![InputDatum::new("a", vec![1., 2.]), InputDatum::new("b", vec![1.])]);

    assert!(matches!(result, Err(QualityError::InvalidData(_))));
}

#[test]
fn can_create_empty_input_data() {
    let data = InputData::new(vec![]).unwrap();

    assert!(data.is_empty());
    assert_eq!(data.dimension(), 0);
}
