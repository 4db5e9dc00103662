//! safekubectl entry point.

use safekubectl::config::Config;
use safekubectl::kubectl::{Kubectl, SystemKubectl};
use safekubectl::logging;
use safekubectl::runner::Runner;

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let kubectl = SystemKubectl::from_env();

    // Nothing to check; let kubectl print its help.
    if args.is_empty() {
        return match kubectl.execute(&args) {
            Ok(code) => exit_code(code),
            Err(e) => fail(&e),
        };
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("safekubectl: failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut err = io::stderr();

    match Runner::new(&config, &kubectl, &mut input, &mut out, &mut err).run(&args) {
        Ok(code) => exit_code(code),
        Err(e) => fail(&e),
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn fail(e: &dyn std::error::Error) -> ExitCode {
    eprintln!("safekubectl: {e}");
    ExitCode::FAILURE
}
