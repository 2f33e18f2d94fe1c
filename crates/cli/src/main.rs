use std::process::ExitCode;

fn main() -> ExitCode {
    weddy_cli::run()
}
