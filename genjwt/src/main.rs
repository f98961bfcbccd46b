use std::process::ExitCode;

fn main() -> ExitCode {
    match genjwt::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
