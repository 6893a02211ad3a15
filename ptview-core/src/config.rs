/// Session configuration
use std::path::PathBuf;

use crate::error::{ViewerError, ViewerResult};
use crate::meshfile::ParseMode;
use crate::pacer::PacerConfig;
use crate::projection::ProjectionParams;

pub const DEFAULT_WIDTH: u32 = 450;
pub const DEFAULT_HEIGHT: u32 = 450;

/// Everything a viewer session needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Pixel buffer and window width
    pub width: u32,
    /// Pixel buffer and window height
    pub height: u32,
    pub fullscreen: bool,
    pub mesh_file: PathBuf,
    pub parse_mode: ParseMode,
    pub pacer: PacerConfig,
    pub projection: ProjectionParams,
}

impl ViewerConfig {
    pub fn new(mesh_file: impl Into<PathBuf>) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fullscreen: false,
            mesh_file: mesh_file.into(),
            parse_mode: ParseMode::default(),
            pacer: PacerConfig::default(),
            projection: ProjectionParams::default(),
        }
    }

    pub fn validate(&self) -> ViewerResult<()> {
        if self.width == 0 {
            return Err(ViewerError::Usage(
                "window width must be positive and greater than zero".into(),
            ));
        }
        if self.height == 0 {
            return Err(ViewerError::Usage(
                "window height must be positive and greater than zero".into(),
            ));
        }
        if self.pacer.ticks_per_second == 0 {
            return Err(ViewerError::Usage("tick rate must be greater than zero".into()));
        }
        Ok(())
    }
}
