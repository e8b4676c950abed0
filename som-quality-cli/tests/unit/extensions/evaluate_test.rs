use super::*;
use crate::extensions::map::read_map;
use crate::helpers::*;
use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, Mutex};

fn map_request(selector: &str) -> QualityRequest {
    QualityRequest::new(QualitySelector::parse(selector).unwrap(), QualityLevel::Map)
}

fn unit_request(selector: &str) -> QualityRequest {
    QualityRequest::new(QualitySelector::parse(selector).unwrap(), QualityLevel::Unit)
}

fn create_simple_evaluator() -> QualityEvaluator {
    let (layer, data) = read_map(BufReader::new(File::open(SIMPLE_MAP_PATH).unwrap())).unwrap();

    QualityEvaluator::new(QualityContext::new(
        Arc::new(layer),
        Arc::new(data),
        Arc::new(Environment::new_repeatable()),
    ))
}

fn create_line_evaluator() -> QualityEvaluator {
    create_test_evaluator(create_line_map_file(3, vec![0., 0.25, 1., 1.75, 2.]))
}

#[test]
fn can_evaluate_map_and_unit_requests() {
    let evaluator = create_simple_evaluator();
    let requests = vec![
        map_request("entropy_purity:purity"),
        map_request("entropy_purity:entropy"),
        map_request("topographic_error:TE_Map"),
        unit_request("quantization_error:qe"),
    ];

    let evaluations = evaluate_requests(&evaluator, requests.as_slice()).unwrap().evaluations;

    assert_eq!(evaluations.len(), 4);
    assert_eq!(evaluations[0].output, QualityOutput::Map(1.));
    assert_eq!(evaluations[1].output, QualityOutput::Map(0.));
    assert_eq!(evaluations[2].output, QualityOutput::Map(0.));
    match &evaluations[3].output {
        QualityOutput::Unit(qualities) => {
            assert_eq!((qualities.x_size(), qualities.y_size()), (2, 2));
            [(0, 0, 0.3), (1, 0, 0.1), (0, 1, 0.1), (1, 1, 0.3)].iter().for_each(|&(x, y, expected)| {
                assert!((qualities.get(x, y) - expected).abs() < 1E-9, "unexpected value at ({x}, {y})");
            });
        }
        output => unreachable!("unexpected output: {output:?}"),
    }
}

#[test]
fn can_evaluate_full_topographic_function_without_offset() {
    let evaluator = create_line_evaluator();

    let function = evaluate_request(&evaluator, &map_request("topographic_function:TF")).unwrap();
    let single = evaluate_request(&evaluator, &map_request("topographic_function:TF|1")).unwrap();

    match function {
        QualityOutput::Function(values) => {
            assert_eq!(values.max_offset(), 3);
            assert_eq!(values.values(), &[0.; 7]);
        }
        output => unreachable!("unexpected output: {output:?}"),
    }
    assert_eq!(single, QualityOutput::Map(0.));
}

parameterized_test! {can_reject_unsupported_requests, (request, expected), {
    can_reject_unsupported_requests_impl(request, expected);
}}

can_reject_unsupported_requests! {
    case01_unknown_measure: (map_request("unknown:TE_Map"), QualityError::UnknownMeasure("unknown".to_string())),
    case02_unknown_map_output: (
        map_request("topographic_error:TE_Unit"),
        QualityError::not_found("topographic_error", "TE_Unit")
    ),
    case03_unknown_unit_output: (
        unit_request("entropy_purity:purity"),
        QualityError::not_found("entropy_purity", "purity")
    ),
    case04_function_unit_output: (
        unit_request("topographic_function:TF"),
        QualityError::not_found("topographic_function", "TF")
    ),
}

fn can_reject_unsupported_requests_impl(request: QualityRequest, expected: QualityError) {
    let evaluator = create_line_evaluator();

    let result = evaluate_request(&evaluator, &request);

    assert_eq!(result, Err(expected));
}

#[test]
fn can_skip_recoverable_errors_and_keep_order() {
    let evaluator = create_simple_evaluator();
    let requests = vec![
        map_request("sammon:sammon"),
        map_request("nope:x"),
        map_request("entropy:entropy"),
        unit_request("sammon:sammon"),
        map_request("trustworthiness:TW_Map|x"),
    ];

    let report = evaluate_requests(&evaluator, requests.as_slice()).unwrap();

    let evaluated = report.evaluations.iter().map(|item| item.request.selector.to_string()).collect::<Vec<_>>();
    let skipped = report.skipped.iter().map(|item| item.request.selector.to_string()).collect::<Vec<_>>();
    assert_eq!(evaluated, vec!["sammon:sammon", "entropy:entropy"]);
    assert_eq!(skipped, vec!["nope:x", "sammon:sammon", "trustworthiness:TW_Map|x"]);
    assert_eq!(report.skipped[0].error, QualityError::UnknownMeasure("nope".to_string()));
}

#[test]
fn can_stop_on_unrecoverable_error() {
    let evaluator = create_line_evaluator();

    let result = evaluate_requests(&evaluator, &[map_request("sammon:sammon"), map_request("entropy_purity:purity")]);

    assert!(matches!(result, Err(QualityError::InvalidData(_))));
}

#[test]
fn can_compute_topographic_function_once_per_evaluator() {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let logger: InfoLogger = {
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    };
    let (layer, data) = read_map(BufReader::new(File::open(SIMPLE_MAP_PATH).unwrap())).unwrap();
    let environment = Environment::new(Arc::new(DefaultRandom::new_repeatable()), Parallelism::default(), logger);
    let evaluator = QualityEvaluator::new(QualityContext::new(Arc::new(layer), Arc::new(data), Arc::new(environment)));
    let requests = vec![
        map_request("topographic_function:TF"),
        map_request("topographic_function:TF|1"),
        map_request("topographic_function:TF"),
    ];

    let report = evaluate_requests(&evaluator, requests.as_slice()).unwrap();

    let started = messages.lock().unwrap().iter().filter(|msg| *msg == "topographic_function: started").count();
    assert_eq!(report.evaluations.len(), 3);
    assert_eq!(started, 1);
}

#[test]
fn can_write_evaluations() {
    let evaluator = create_line_evaluator();
    let requests = vec![
        map_request("topographic_error:TE_Map"),
        unit_request("quantization_error:qe"),
        map_request("topographic_function:TF"),
    ];
    let evaluations = evaluate_requests(&evaluator, requests.as_slice()).unwrap().evaluations;
    let mut buffer = Vec::new();

    write_evaluations(&mut buffer, evaluations.as_slice()).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        [
            "topographic_error:TE_Map: 0",
            "quantization_error:qe:",
            "0.25 0 0.25",
            "topographic_function:TF:",
            "-3: 0",
            "-2: 0",
            "-1: 0",
            "0: 0",
            "1: 0",
            "2: 0",
            "3: 0",
            "",
        ]
        .join("\n")
    );
}
