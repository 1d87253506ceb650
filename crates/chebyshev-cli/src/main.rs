//! `chebyshev` - score JSON-lines value streams for anomalies

use std::process::ExitCode;

fn main() -> ExitCode {
    match chebyshev_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
