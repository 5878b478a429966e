use std::process::ExitCode;

fn main() -> ExitCode {
    match ecosystem_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ecosystem_cli::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
