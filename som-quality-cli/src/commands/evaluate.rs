#[cfg(test)]
#[path = "../../tests/unit/commands/evaluate_test.rs"]
mod evaluate_test;

use super::*;

use clap::{Arg, ArgAction, Command};
use som_quality::prelude::*;
use som_quality_cli::extensions::config::{Config, create_environment, read_config};
use som_quality_cli::extensions::evaluate::{QualityLevel, QualityRequest, evaluate_requests, write_evaluations};
use som_quality_cli::extensions::map::read_map;
use std::io::BufReader;
use std::sync::Arc;

const MAP_ARG_NAME: &str = "MAP";
const MEASURE_ARG_NAME: &str = "measure";
const UNIT_MEASURE_ARG_NAME: &str = "unit-measure";
const CONFIG_ARG_NAME: &str = "config";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const QUIET_ARG_NAME: &str = "quiet";

pub fn get_evaluate_app() -> Command {
    Command::new("evaluate")
        .about("Evaluates quality measures of a trained map")
        .arg(
            Arg::new(MAP_ARG_NAME)
                .help("Sets a map file which contains units and input records")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new(MEASURE_ARG_NAME)
                .help("Adds a requested output in 'key:variant|param' notation, e.g. 'trustworthiness:TW_Map|5'")
                .short('m')
                .long(MEASURE_ARG_NAME)
                .required(false)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(UNIT_MEASURE_ARG_NAME)
                .help("Adds a requested unit level output in 'key:variant|param' notation, e.g. 'entropy:entropy'")
                .short('u')
                .long(UNIT_MEASURE_ARG_NAME)
                .required(false)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to an evaluation config file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies a random seed used to break ties")
                .short('s')
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(QUIET_ARG_NAME)
                .help("Disables progress logging")
                .short('q')
                .long(QUIET_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

pub fn run_evaluate(matches: &ArgMatches) -> Result<(), String> {
    let map_path = matches.get_one::<String>(MAP_ARG_NAME).ok_or_else(|| "map file is not specified".to_string())?;

    let config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(BufReader::new(open_file(path, "config")?)).map_err(|err| err.to_string())?,
        None => Config::default(),
    };

    let mut requests = get_requests(matches, MEASURE_ARG_NAME, QualityLevel::Map)?;
    requests.extend(get_requests(matches, UNIT_MEASURE_ARG_NAME, QualityLevel::Unit)?);
    requests.extend(config.requests());

    if requests.is_empty() {
        return Err("no measures requested: use --measure or specify measures in config".to_string());
    }

    let seed = parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")?;
    let logger: Option<InfoLogger> = if matches.get_flag(QUIET_ARG_NAME) {
        None
    } else {
        let logger: InfoLogger = Arc::new(|msg: &str| eprintln!("{msg}"));
        Some(logger)
    };
    let environment = create_environment(&config, seed, logger);

    let (layer, data) = read_map(BufReader::new(open_file(map_path, "map")?)).map_err(|err| err.to_string())?;
    let context = QualityContext::new(Arc::new(layer), Arc::new(data), Arc::new(environment))
        .with_settings(config.settings());
    let evaluator = QualityEvaluator::new(context);

    let report = evaluate_requests(&evaluator, requests.as_slice()).map_err(|err| err.to_string())?;

    report.skipped.iter().for_each(|skipped| eprintln!("skipped '{}': {}", skipped.request.selector, skipped.error));

    if report.evaluations.is_empty() {
        return Err("none of requested measures can be evaluated".to_string());
    }

    let out_file =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;
    let mut writer = create_write_buffer(out_file);

    write_evaluations(&mut writer, report.evaluations.as_slice()).map_err(|err| err.to_string())
}

fn get_requests(matches: &ArgMatches, arg_name: &str, level: QualityLevel) -> Result<Vec<QualityRequest>, String> {
    matches
        .get_many::<String>(arg_name)
        .into_iter()
        .flatten()
        .map(|selector| {
            QualitySelector::parse(selector)
                .map(|selector| QualityRequest::new(selector, level))
                .map_err(|err| format!("cannot parse '{arg_name}' argument: {err}"))
        })
        .collect()
}
