//! Seller Import CLI.

use clap::Parser;
use seller_cli::logging::init_logging;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_check, run_import, run_report, run_template};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Import(args) => run_import(args).map(|()| true),
        Command::Template(args) => run_template(args).map(|()| true),
        Command::Check(args) => run_check(args),
        Command::Report(args) => run_report(args).map(|_| true),
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
