/// Native window display surface for the point-cloud viewer
use ptview_core::{PixelBuffer, Surface, SurfaceError, SurfaceEvent, ViewerConfig};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Fullscreen, Window, WindowBuilder},
};

pub mod gpu;

pub use gpu::FrameBlitter;

/// Presents frames in an OS window through wgpu.
///
/// The event loop is pumped without blocking from [`Surface::poll_event`],
/// so the viewer's frame pacer stays in charge of timing.
pub struct WindowSurface {
    // Dropped before the window it draws into
    blitter: FrameBlitter,
    window: Arc<Window>,
    event_loop: EventLoop<()>,
    pending: VecDeque<SurfaceEvent>,
    pumped: bool,
}

impl WindowSurface {
    pub fn new(config: &ViewerConfig) -> Result<Self, SurfaceError> {
        let event_loop = EventLoop::new()
            .map_err(|e| SurfaceError::Init(format!("failed to create event loop: {}", e)))?;

        let mut builder = WindowBuilder::new()
            .with_title(window_title(config))
            .with_inner_size(PhysicalSize::new(config.width, config.height));
        if config.fullscreen {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            builder
                .build(&event_loop)
                .map_err(|e| SurfaceError::Init(format!("failed to create window: {}", e)))?,
        );

        let blitter = FrameBlitter::new(window.clone(), config.width, config.height)?;
        log::info!(
            "window surface for a {}x{} pixel buffer{}",
            config.width,
            config.height,
            if config.fullscreen { " (fullscreen)" } else { "" }
        );

        Ok(Self {
            blitter,
            window,
            event_loop,
            pending: VecDeque::new(),
            pumped: false,
        })
    }

    /// Drain whatever the OS has queued without waiting for more
    fn pump(&mut self) {
        let window_id = self.window.id();
        let pending = &mut self.pending;
        let blitter = &mut self.blitter;

        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| {
                if let Event::WindowEvent { window_id: id, event } = event {
                    if id != window_id {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => pending.push_back(SurfaceEvent::Quit),
                        WindowEvent::Resized(size) => blitter.resize(size.width, size.height),
                        WindowEvent::KeyboardInput { event, .. } => {
                            if let Some(event) = translate_key(&event) {
                                pending.push_back(event);
                            }
                        }
                        _ => {}
                    }
                }
            });

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {}", code);
            self.pending.push_back(SurfaceEvent::Quit);
        }
    }
}

impl Surface for WindowSurface {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), SurfaceError> {
        self.window.pre_present_notify();
        self.blitter.render(frame)
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        // Pump once per drain so a burst of OS events cannot stall the frame
        if !self.pumped {
            self.pump();
            self.pumped = true;
        }
        match self.pending.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                self.pumped = false;
                Ok(None)
            }
        }
    }
}

fn window_title(config: &ViewerConfig) -> String {
    match config.mesh_file.file_name() {
        Some(name) => format!("ptview - {}", name.to_string_lossy()),
        None => "ptview".to_string(),
    }
}

/// Map a key press to a viewer event; releases and auto-repeats are dropped
fn translate_key(event: &KeyEvent) -> Option<SurfaceEvent> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    translate_logical_key(&event.logical_key)
}

fn translate_logical_key(key: &Key) -> Option<SurfaceEvent> {
    match key {
        Key::Named(NamedKey::Escape) => Some(SurfaceEvent::Quit),
        Key::Character(text) => text.chars().next().map(SurfaceEvent::Key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_characters_become_key_events() {
        assert_eq!(
            translate_logical_key(&Key::Character("q".into())),
            Some(SurfaceEvent::Key('q'))
        );
        assert_eq!(
            translate_logical_key(&Key::Character("Q".into())),
            Some(SurfaceEvent::Key('Q'))
        );
    }

    #[test]
    fn test_escape_quits_and_other_keys_ignored() {
        assert_eq!(
            translate_logical_key(&Key::Named(NamedKey::Escape)),
            Some(SurfaceEvent::Quit)
        );
        assert_eq!(translate_logical_key(&Key::Named(NamedKey::ArrowUp)), None);
    }

    #[test]
    fn test_window_title_uses_file_name() {
        let config = ViewerConfig::new(PathBuf::from("/data/scans/bunny.txt"));
        assert_eq!(window_title(&config), "ptview - bunny.txt");

        let config = ViewerConfig::new(PathBuf::from("/"));
        assert_eq!(window_title(&config), "ptview");
    }
}
