//! A command line interface to *Self-Organizing Map* quality measures.
//!

mod commands;

use std::process;

fn main() {
    let matches = cli::get_app().get_matches();

    if let Err(err) = cli::run_subcommand(matches) {
        eprintln!("{err}");
        process::exit(1);
    }
}

mod cli {
    use super::commands::evaluate::{get_evaluate_app, run_evaluate};
    use super::commands::list::{get_list_app, run_list};
    use clap::{ArgMatches, Command};

    pub fn get_app() -> Command {
        Command::new("Self-Organizing Map Quality")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to Self-Organizing Map quality measures")
            .subcommand(get_evaluate_app())
            .subcommand(get_list_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches) -> Result<(), String> {
        match arg_matches.subcommand() {
            Some(("evaluate", evaluate_matches)) => run_evaluate(evaluate_matches),
            Some(("list", list_matches)) => run_list(list_matches),
            _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
        }
    }
}
