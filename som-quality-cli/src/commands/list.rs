#[cfg(test)]
#[path = "../../tests/unit/commands/list_test.rs"]
mod list_test;

use super::*;

use clap::{Arg, Command};
use som_quality::prelude::QualityRegistry;
use som_quality::quality::QualityMeasureEntry;

const OUT_RESULT_ARG_NAME: &str = "out-result";

pub fn get_list_app() -> Command {
    Command::new("list").about("Lists known quality measures with their outputs").arg(
        Arg::new(OUT_RESULT_ARG_NAME)
            .help("Specifies path to file for result output")
            .short('o')
            .long(OUT_RESULT_ARG_NAME)
            .required(false),
    )
}

pub fn run_list(matches: &ArgMatches) -> Result<(), String> {
    let out_file =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;
    let mut writer = create_write_buffer(out_file);

    QualityRegistry::default()
        .entries()
        .iter()
        .try_for_each(|entry| writeln!(writer, "{}", describe_entry(entry)))
        .and_then(|_| writer.flush())
        .map_err(|err| format!("cannot write measure list: '{err}'"))
}

fn describe_entry(entry: &QualityMeasureEntry) -> String {
    let join = |names: &[&str]| if names.is_empty() { "-".to_string() } else { names.join(", ") };

    format!("{}: map [{}], unit [{}]", entry.key, join(entry.map_names), join(entry.unit_names))
}
