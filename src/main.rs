use std::io;
use std::process::ExitCode;

use clap::Parser;

use kaleidparse::{cli::Cli, driver, repl};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.file.as_deref() {
        Some(path) => driver::run_file(path, &cli, &mut io::stdout().lock()),
        None => repl::ast_parser_driver(&cli, io::stdin().lock(), &mut io::stdout().lock())
            .map_err(driver::DriverError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
