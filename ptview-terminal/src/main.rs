/// ptview-terminal - point-cloud viewer drawn with terminal characters
///
/// Usage: ptview-terminal [-W width] [-H height] [-f] [--strict] FILE
/// Controls:
///   - Q/ESC: Quit
use clap::Parser;
use std::process::ExitCode;

use ptview_core::{cli::Args, run_session, ViewerConfig};
use ptview_terminal::TerminalSurface;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ViewerConfig::from(Args::parse());
    match run_session(&config, TerminalSurface::new) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
