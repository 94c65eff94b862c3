//! `detect_spof` entry point.

#![forbid(unsafe_code)]

use std::io;
use std::process::ExitCode;

use clap::Parser;
use spof_cli::Cli;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the summary.
    spof_core::tracing::init_tracing();

    let cli = Cli::parse();
    let code = spof_cli::run(&cli, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}
