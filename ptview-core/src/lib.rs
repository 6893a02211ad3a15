/// ptview core library - point-cloud loading, pacing, projection and rasterization
///
/// This library owns the whole per-frame pipeline. Display surfaces plug in
/// through the [`Surface`] trait and only ever see a finished pixel buffer.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod meshfile;
pub mod pacer;
pub mod projection;
pub mod raster;
pub mod transform;
pub mod viewer;

pub use nalgebra;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{LoadError, SurfaceError, ViewerError, ViewerResult};
pub use geometry::{Mesh, MeshStore, Vertex};
pub use meshfile::ParseMode;
pub use pacer::{AnimationState, Clock, FramePacer, PacerConfig, SystemClock, Tick};
pub use projection::{ProjectionParams, Projector};
pub use raster::{PixelBuffer, BACKGROUND, FOREGROUND};
pub use transform::Transform;
pub use viewer::{run_session, Surface, SurfaceEvent, Viewer};
