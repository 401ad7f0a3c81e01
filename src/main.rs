//! Binary entrypoint for the `tally` service.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match tally::run(std::env::args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
