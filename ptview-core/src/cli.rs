/// Command line shared by the viewer binaries
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ViewerConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::meshfile::ParseMode;

#[derive(Parser, Debug, Clone)]
#[command(name = "ptview", version)]
#[command(about = "Spin through the point clouds of a mesh file")]
pub struct Args {
    /// Window width in pixels
    #[arg(
        short = 'W',
        value_name = "WIDTH",
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Window height in pixels
    #[arg(
        short = 'H',
        value_name = "HEIGHT",
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub height: u32,

    /// Fill the whole screen
    #[arg(short = 'f')]
    pub fullscreen: bool,

    /// Reject malformed mesh files instead of reading them best-effort
    #[arg(long)]
    pub strict: bool,

    /// Mesh file to display
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        let mut config = ViewerConfig::new(args.file);
        config.width = args.width;
        config.height = args.height;
        config.fullscreen = args.fullscreen;
        config.parse_mode = if args.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        config
    }
}
