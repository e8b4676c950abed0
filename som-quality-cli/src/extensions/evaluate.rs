//! Evaluates requested quality outputs and writes them as text.

#[cfg(test)]
#[path = "../../tests/unit/extensions/evaluate_test.rs"]
mod evaluate_test;

use som_quality::prelude::*;
use som_quality::quality::{TOPOGRAPHIC_FUNCTION_KEY, TopographicFunctionValues};
use som_quality::quality::{write_topographic_function, write_unit_qualities};
use std::io::Write;

/// Specifies whether a single value for the whole map or a grid of unit values is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityLevel {
    /// A map level value.
    Map,
    /// Unit level values.
    Unit,
}

/// A requested output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualityRequest {
    /// A selector of the output.
    pub selector: QualitySelector,
    /// A requested level.
    pub level: QualityLevel,
}

impl QualityRequest {
    /// Creates a new instance of `QualityRequest`.
    pub fn new(selector: QualitySelector, level: QualityLevel) -> Self {
        Self { selector, level }
    }
}

/// A value of a single requested output.
#[derive(Clone, Debug, PartialEq)]
pub enum QualityOutput {
    /// A map level value.
    Map(Float),
    /// Unit level values.
    Unit(UnitQualities),
    /// Topographic function for all offsets.
    Function(TopographicFunctionValues),
}

/// An evaluated output with the request which produced it.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// A request.
    pub request: QualityRequest,
    /// A value.
    pub output: QualityOutput,
}

/// A request which was not evaluated because of a recoverable error.
#[derive(Clone, Debug)]
pub struct SkippedRequest {
    /// A request.
    pub request: QualityRequest,
    /// A reason.
    pub error: QualityError,
}

/// Results of evaluating a list of requests.
#[derive(Clone, Debug, Default)]
pub struct EvaluationReport {
    /// Evaluated outputs in request order.
    pub evaluations: Vec<Evaluation>,
    /// Requests skipped because of unknown measures, outputs or invalid parameters.
    pub skipped: Vec<SkippedRequest>,
}

/// Evaluates all requests in given order. Requests failing with a recoverable error are skipped,
/// any other error stops evaluation.
pub fn evaluate_requests(evaluator: &QualityEvaluator, requests: &[QualityRequest]) -> QualityResult<EvaluationReport> {
    requests.iter().try_fold(EvaluationReport::default(), |mut report, request| {
        match evaluate_request(evaluator, request) {
            Ok(output) => report.evaluations.push(Evaluation { request: request.clone(), output }),
            Err(error) if error.is_recoverable() => {
                report.skipped.push(SkippedRequest { request: request.clone(), error })
            }
            Err(error) => return Err(error),
        }

        Ok(report)
    })
}

/// Evaluates a single request. Map level topographic function without offset returns the
/// function for all offsets.
pub fn evaluate_request(evaluator: &QualityEvaluator, request: &QualityRequest) -> QualityResult<QualityOutput> {
    let selector = &request.selector;
    let (key, variant, param) = (selector.key.as_str(), selector.variant.as_str(), selector.param.as_deref());

    if evaluator.registry().find(key).is_none() {
        return Err(QualityError::UnknownMeasure(key.to_string()));
    }

    match request.level {
        QualityLevel::Map if !evaluator.is_map_quality(selector) => Err(QualityError::not_found(key, variant)),
        QualityLevel::Unit if !evaluator.is_unit_quality(selector) => Err(QualityError::not_found(key, variant)),
        QualityLevel::Map if key == TOPOGRAPHIC_FUNCTION_KEY && param.is_none() => {
            evaluator.topographic_function().map(QualityOutput::Function)
        }
        QualityLevel::Map => Ok(QualityOutput::Map(evaluator.map_quality(key, variant, param)?)),
        QualityLevel::Unit => Ok(QualityOutput::Unit(evaluator.unit_qualities(key, variant, param)?)),
    }
}

/// Writes evaluations: a map value as `<selector>: <value>` line, unit values and topographic
/// function as `<selector>:` header followed by their blocks.
pub fn write_evaluations<W: Write>(writer: &mut W, evaluations: &[Evaluation]) -> GenericResult<()> {
    evaluations.iter().try_for_each(|evaluation| {
        let selector = &evaluation.request.selector;

        match &evaluation.output {
            QualityOutput::Map(value) => writeln!(writer, "{selector}: {value}").map_err(GenericError::from),
            QualityOutput::Unit(qualities) => {
                writeln!(writer, "{selector}:")?;
                write_unit_qualities(writer, qualities)
            }
            QualityOutput::Function(values) => {
                writeln!(writer, "{selector}:")?;
                write_topographic_function(writer, values)
            }
        }
    })?;

    writer.flush()?;

    Ok(())
}
