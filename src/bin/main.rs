use std::io;
use std::process::ExitCode;

use clap::Parser;
use getjwt::GetJwtError;
use getjwt::commands::get_token::run;
use getjwt::config::ConfigError;
use getjwt::parameters::{Cli, USAGE};
use tracing::{Level, error};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.debug);

    let mut stdout = io::stdout().lock();
    match run(&cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(GetJwtError::Config(ConfigError::WrongArgumentCount(_))) => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

// Logs go to stderr: stdout carries nothing but the token.
fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
