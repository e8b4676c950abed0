use super::*;
use crate::helpers::models::*;
use crate::helpers::utils::create_logging_environment;

fn create_classified_context() -> QualityContext {
    let data = create_classified_data(
        (0..9)
            .map(|idx| (vec![(idx % 3) as Float + 0.1, (idx / 3) as Float], if idx < 4 { "a" } else { "b" }))
            .collect(),
    );

    create_test_context(create_grid_layer(3, 3), data)
}

#[test]
fn can_register_all_measures() {
    let registry = QualityRegistry::default();

    let keys = registry.entries().iter().map(|entry| entry.key).collect::<Vec<_>>();

    assert_eq!(keys.len(), 15);
    assert!(registry.find("topographic_product").is_some());
    assert!(registry.find("unknown").is_none());
}

#[test]
fn can_create_measures_with_declared_names() {
    let context = create_classified_context();
    let registry = QualityRegistry::default();

    registry.entries().iter().for_each(|entry| {
        let measure = (entry.create)(&context).unwrap();

        assert_eq!(measure.name(), entry.key);
        assert_eq!(measure.map_quality_names(), entry.map_names, "{}", entry.key);
        assert_eq!(measure.unit_quality_names(), entry.unit_names, "{}", entry.key);
    });
}

#[test]
fn can_replace_entry_with_same_key() {
    let registry = QualityRegistry::default().add(QualityMeasureEntry {
        key: "sammon",
        create: |context| {
            let measure: Arc<dyn QualityMeasure> = Arc::new(EntropyMeasure::new(context)?);
            Ok(measure)
        },
        map_names: &["entropy"],
        unit_names: &[],
    });

    assert_eq!(registry.entries().len(), 15);
    assert_eq!(registry.find("sammon").map(|entry| entry.map_names), Some(&["entropy"][..]));
}

#[test]
fn can_evaluate_and_cache_measures() {
    let evaluator = QualityEvaluator::new(create_classified_context());

    let first = evaluator.measure("quantization_error").unwrap();
    let second = evaluator.measure("quantization_error").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(evaluator.map_quality("topographic_error", "TE_Map", None), Ok(0.));
    assert_eq!(evaluator.unit_qualities("trustworthiness", "TW_Unit", Some("2")).unwrap().values().len(), 9);
    assert!(evaluator.map_quality("trustworthiness", "TW_Map", Some("1")).is_ok());
}

#[test]
fn can_take_entry_names_from_measure_types() {
    let registry = QualityRegistry::default();
    let names = |key: &str| registry.find(key).map(|entry| (entry.map_names, entry.unit_names));

    assert_eq!(
        names("quantization_error"),
        Some((QuantizationError::MAP_QUALITY_NAMES, QuantizationError::UNIT_QUALITY_NAMES))
    );
    assert_eq!(names("topographic_function"), Some((TopographicFunction::MAP_QUALITY_NAMES, &[][..])));
    assert_eq!(names("som_silhouette"), Some((&["som_silhouette"][..], &["som_silhouette"][..])));
    assert_eq!(names("neighbourhood_preservation"), Some((&["NP_Map"][..], &["NP_Unit"][..])));
}

#[test]
fn can_produce_same_values_on_repeated_evaluation() {
    let registry = QualityRegistry::default();
    let first_context = create_classified_context();
    let second_context = create_classified_context();
    let to_bits = |values: &UnitQualities| values.values().iter().map(|value| value.to_bits()).collect::<Vec<_>>();

    registry.entries().iter().filter(|entry| entry.key != "topographic_product").for_each(|entry| {
        let first = (entry.create)(&first_context).unwrap();
        let second = (entry.create)(&second_context).unwrap();

        entry.map_names.iter().for_each(|&name| {
            let expected = first.map_quality(name).unwrap();

            assert_eq!(first.map_quality(name).unwrap().to_bits(), expected.to_bits(), "{}:{name}", entry.key);
            assert_eq!(second.map_quality(name).unwrap().to_bits(), expected.to_bits(), "{}:{name}", entry.key);
        });

        entry.unit_names.iter().for_each(|&name| {
            let expected = to_bits(&first.unit_qualities(name).unwrap());

            assert_eq!(to_bits(&first.unit_qualities(name).unwrap()), expected, "{}:{name}", entry.key);
            assert_eq!(to_bits(&second.unit_qualities(name).unwrap()), expected, "{}:{name}", entry.key);
        });
    });
}

#[test]
fn can_evaluate_topographic_function_once() {
    let (environment, messages) = create_logging_environment();
    let base = create_classified_context();
    let context = QualityContext::new(base.layer.clone(), base.data.clone(), Arc::new(environment));
    let evaluator = QualityEvaluator::new(context);

    let function = evaluator.topographic_function().unwrap();
    let single = evaluator.map_quality(TOPOGRAPHIC_FUNCTION_KEY, "TF", Some("1")).unwrap();
    let again = evaluator.topographic_function().unwrap();

    let started = messages.lock().unwrap().iter().filter(|msg| *msg == "topographic_function: started").count();
    assert_eq!(started, 1);
    assert_eq!(function.max_offset(), 3);
    assert_eq!(function.values().len(), 7);
    assert_eq!(function.get(1), Some(single));
    assert_eq!(function, again);
}

#[test]
fn can_report_unknown_measure_and_output() {
    let evaluator = QualityEvaluator::new(create_classified_context());

    assert_eq!(
        evaluator.map_quality("unknown", "value", None),
        Err(QualityError::UnknownMeasure("unknown".to_string()))
    );
    assert!(evaluator.measure("unknown").is_err_and(|err| err.to_string() == "unknown quality measure: 'unknown'"));
    assert_eq!(
        evaluator.map_quality("entropy", "purity", None),
        Err(QualityError::not_found("entropy", "purity"))
    );
}

#[test]
fn can_classify_selected_outputs() {
    let evaluator = QualityEvaluator::new(create_classified_context());

    let map_only = QualitySelector::new("inversion", "inversion", None);
    let both = QualitySelector::new("quantization_error", "qe", None);
    let unit_only = QualitySelector::new("topographic_product", "TP_Unit", Some("2"));

    assert!(evaluator.is_map_quality(&map_only) && !evaluator.is_unit_quality(&map_only));
    assert!(evaluator.is_map_quality(&both) && evaluator.is_unit_quality(&both));
    assert!(!evaluator.is_map_quality(&unit_only) && evaluator.is_unit_quality(&unit_only));
}

parameterized_test! {can_parse_selector, (value, expected), {
    let result = QualitySelector::parse(value);

    match expected {
        Some((key, variant, param)) => assert_eq!(result, Ok(QualitySelector::new(key, variant, param))),
        None => assert!(matches!(result, Err(QualityError::InvalidParameter(_)))),
    }
}}

can_parse_selector! {
    case01_simple: ("topographic_error:TE_Map", Some(("topographic_error", "TE_Map", None))),
    case02_with_param: ("topographic_product:TP_Unit|3", Some(("topographic_product", "TP_Unit", Some("3")))),
    case03_negative_param: ("topographic_function:TF|-1", Some(("topographic_function", "TF", Some("-1")))),
    case04_spaces: (" sammon : sammon ", Some(("sammon", "sammon", None))),
    case05_no_variant: ("sammon", None),
    case06_empty_variant: ("sammon:", None),
    case07_empty_param: ("trustworthiness:TW_Map|", None),
}

#[test]
fn can_format_selector() {
    let selector = QualitySelector::parse("trustworthiness:TW_Map|5").unwrap();

    assert_eq!(selector.output_name(), "TW_Map|5");
    assert_eq!(selector.to_string(), "trustworthiness:TW_Map|5");
}
