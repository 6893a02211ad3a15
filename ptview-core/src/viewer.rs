/// The viewer session: owns all per-run state and drives the frame loop
use nalgebra::Point2;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::config::ViewerConfig;
use crate::error::{LoadError, SurfaceError, ViewerError, ViewerResult};
use crate::geometry::{Mesh, MeshStore};
use crate::meshfile;
use crate::pacer::{AnimationState, Clock, FramePacer, SystemClock, Tick};
use crate::projection::Projector;
use crate::raster::PixelBuffer;

/// Input reported by a display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The window was closed or the user asked to leave
    Quit,
    Key(char),
}

/// Somewhere finished frames can be shown
pub trait Surface {
    /// Show a completed frame
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), SurfaceError>;

    /// Next pending event, without blocking
    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError>;
}

/// Mesh store, animation state and pixel buffer for one session
pub struct Viewer {
    store: MeshStore,
    mesh_count: NonZeroUsize,
    state: AnimationState,
    pacer: FramePacer,
    projector: Projector,
    buffer: PixelBuffer,
    points: Vec<Point2<f32>>,
}

impl Viewer {
    /// Build a session around a loaded store, pacing from `start`.
    ///
    /// Fails with [`LoadError::NoMeshes`] for an empty store.
    pub fn new(config: &ViewerConfig, store: MeshStore, start: Duration) -> ViewerResult<Self> {
        config.validate()?;
        let mesh_count = store.mesh_count().ok_or(LoadError::NoMeshes)?;
        let buffer = PixelBuffer::try_new(config.width as usize, config.height as usize)
            .map_err(ViewerError::Init)?;

        Ok(Self {
            store,
            mesh_count,
            state: AnimationState::new(),
            pacer: FramePacer::new(config.pacer, start),
            projector: Projector::with_params(config.width, config.height, config.projection),
            buffer,
            points: Vec::new(),
        })
    }

    pub fn store(&self) -> &MeshStore {
        &self.store
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn active_mesh(&self) -> &Mesh {
        // `active` is always reduced modulo the store length
        &self.store.meshes()[self.state.active]
    }

    /// Pace to the next tick and advance the animation
    pub fn update<C: Clock>(&mut self, clock: &mut C) -> Tick {
        self.pacer.tick(clock, &mut self.state, self.mesh_count)
    }

    /// Project the active mesh and redraw the pixel buffer
    pub fn render(&mut self) {
        let mesh = &self.store.meshes()[self.state.active];
        self.projector
            .project_into(mesh, self.state.angle, &mut self.points);
        self.buffer.clear();
        self.buffer.plot(&self.points);
    }

    /// Hand the finished buffer to the surface
    pub fn publish<S: Surface + ?Sized>(&self, surface: &mut S) -> ViewerResult<()> {
        surface.present(&self.buffer).map_err(ViewerError::Display)
    }

    /// Drain pending events; `true` once the user asked to quit
    pub fn handle_events<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ViewerResult<bool> {
        let mut quit = false;
        while let Some(event) = surface.poll_event().map_err(ViewerError::Display)? {
            match event {
                SurfaceEvent::Quit | SurfaceEvent::Key('q') => quit = true,
                SurfaceEvent::Key(_) => {}
            }
        }
        Ok(quit)
    }

    /// Pace, poll, draw and present until the surface reports a quit
    pub fn run<S: Surface + ?Sized, C: Clock>(
        &mut self,
        surface: &mut S,
        clock: &mut C,
    ) -> ViewerResult<()> {
        loop {
            self.update(clock);
            if self.handle_events(surface)? {
                log::info!("quit requested");
                return Ok(());
            }
            self.render();
            self.publish(surface)?;
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.store.release();
        log::debug!("viewer session released");
    }
}

/// Load the configured mesh file, open a surface and run until quit.
///
/// Every resource acquired here is dropped before this returns, whether the
/// session ended normally or failed part-way through start-up.
pub fn run_session<S, F>(config: &ViewerConfig, open_surface: F) -> ViewerResult<()>
where
    S: Surface,
    F: FnOnce(&ViewerConfig) -> Result<S, SurfaceError>,
{
    config.validate()?;
    let store = meshfile::load(&config.mesh_file, config.parse_mode)?;
    if store.is_empty() {
        return Err(LoadError::NoMeshes.into());
    }

    let mut surface = open_surface(config).map_err(ViewerError::Init)?;
    let mut clock = SystemClock::new();
    let mut viewer = Viewer::new(config, store, clock.now())?;
    viewer.run(&mut surface, &mut clock)
}
