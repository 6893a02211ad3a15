/// ptview - point-cloud viewer in a native window
///
/// Usage: ptview [-W width] [-H height] [-f] [--strict] FILE
/// Controls:
///   - Q/ESC or closing the window: Quit
use clap::Parser;
use std::process::ExitCode;

use ptview_core::{cli::Args, run_session, ViewerConfig};
use ptview_window::WindowSurface;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ViewerConfig::from(Args::parse());
    match run_session(&config, WindowSurface::new) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
