/// Terminal display surface for the point-cloud viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use ptview_core::{PixelBuffer, Surface, SurfaceError, SurfaceEvent, ViewerConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Rows reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Presents frames as shaded characters on the controlling terminal.
///
/// Raw mode and the alternate screen are entered on creation and restored
/// when the surface is dropped.
pub struct TerminalSurface {
    renderer: AsciiRenderer,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalSurface {
    pub fn new(config: &ViewerConfig) -> Result<Self, SurfaceError> {
        let (cols, rows) = terminal::size().map_err(init_error)?;

        terminal::enable_raw_mode().map_err(init_error)?;
        if let Err(err) = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(init_error(err));
        }

        log::info!(
            "terminal surface {}x{} cells for a {}x{} pixel buffer",
            cols,
            rows,
            config.width,
            config.height
        );

        Ok(Self {
            renderer: AsciiRenderer::new(
                cols as usize,
                rows.saturating_sub(STATUS_ROWS) as usize,
                config.fullscreen,
            ),
            last_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        let elapsed = now - self.last_sample;
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_sample = now;
        }
    }
}

fn init_error(err: io::Error) -> SurfaceError {
    SurfaceError::Init(format!("cannot set up terminal: {}", err))
}

impl Surface for TerminalSurface {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), SurfaceError> {
        let (cols, rows) = terminal::size()?;
        let rows = rows.saturating_sub(STATUS_ROWS);
        if (cols as usize, rows as usize) != self.renderer.size() {
            log::debug!("terminal resized to {}x{}", cols, rows);
            self.renderer.resize(cols as usize, rows as usize);
            execute!(stdout(), terminal::Clear(ClearType::All))?;
        }

        self.renderer.rasterize(frame);
        self.update_fps();

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;
        self.renderer.draw(&mut stdout)?;

        // Status line
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "ptview | {}x{} px | FPS: {:.1} | Q=Quit",
                frame.width(),
                frame.height(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = translate_key(key) {
                    return Ok(Some(event));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if let Err(err) = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show) {
            log::warn!("failed to leave alternate screen: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {}", err);
        }
    }
}

/// Map a key press to a viewer event; releases and repeats are dropped
fn translate_key(key: KeyEvent) -> Option<SurfaceEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SurfaceEvent::Quit)
        }
        KeyCode::Esc => Some(SurfaceEvent::Quit),
        KeyCode::Char(c) => Some(SurfaceEvent::Key(c)),
        _ => None,
    }
}
