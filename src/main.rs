//! # runner
//!
//! Runs the tests of one lesson and prints the result as an SRP payload:
//!
//! ```sh
//! runner test hello
//! ```
//!
//! The process exits 0 once the payload is printed, whether the tests passed or not; the
//! outcome is carried by the payload's `success` field. Exit code 1 means the arguments or the
//! config were rejected and nothing was run.

use srp_runner::{parse_invocation, srp_logging, translate_exercise, write_framed};
use std::process::exit;

fn main() {
    srp_logging::init();

    let invocation = match parse_invocation(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            println!("{}", e.to_string().trim_end());
            exit(e.exit_code());
        }
    };

    let report = translate_exercise(&invocation.config, &invocation.exercise_id);

    let stdout = std::io::stdout();
    if let Err(e) = write_framed(&mut stdout.lock(), &report) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}
