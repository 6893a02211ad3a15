/// Load a mesh file from disk and push it through the whole frame pipeline

use std::io::Write;
use std::time::Duration;

use ptview_core::{
    meshfile, Clock, LoadError, ParseMode, PixelBuffer, Surface, SurfaceError, SurfaceEvent,
    Viewer, ViewerConfig, ViewerError, FOREGROUND,
};
use tempfile::NamedTempFile;

const TRIANGLE: &str = "1\n3\n0 0 0\n1 0 0\n0 1 0\n";

#[derive(Default)]
struct FakeClock {
    now: Duration,
    slept: Duration,
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
        self.now += duration;
    }
}

/// Presents `frames` frames, then asks to quit
struct CountingSurface {
    frames: Vec<PixelBuffer>,
    limit: usize,
    quit_sent: bool,
}

impl CountingSurface {
    fn new(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit,
            quit_sent: false,
        }
    }
}

impl Surface for CountingSurface {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), SurfaceError> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<SurfaceEvent>, SurfaceError> {
        if self.frames.len() >= self.limit && !self.quit_sent {
            self.quit_sent = true;
            return Ok(Some(SurfaceEvent::Quit));
        }
        Ok(None)
    }
}

fn mesh_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_declared_counts_and_coordinates() {
    let file = mesh_file(TRIANGLE);
    let store = meshfile::load(file.path(), ParseMode::Lenient).unwrap();

    assert_eq!(store.len(), 1);
    let mesh = &store.meshes()[0];
    assert_eq!(mesh.len(), 3);
    let coords: Vec<[f32; 3]> = mesh
        .vertices()
        .iter()
        .map(|v| [v.position.x, v.position.y, v.position.z])
        .collect();
    assert_eq!(coords, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
}

#[test]
fn loads_several_meshes_in_order() {
    let file = mesh_file("3\n1\n1 1 1\n2\n2 2 2\n3 3 3\n0\n");
    let store = meshfile::load(file.path(), ParseMode::Strict).unwrap();

    let sizes: Vec<usize> = store.iter().map(|m| m.len()).collect();
    assert_eq!(sizes, vec![1, 2, 0]);
    assert_eq!(store.vertex_count(), 3);
    assert_eq!(store.meshes()[1].vertices()[1].position.z, 3.0);
}

#[test]
fn missing_file_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let err = meshfile::load(&path, ParseMode::Lenient).unwrap_err();
    match err {
        LoadError::Open { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn strict_mode_reports_bad_file() {
    let file = mesh_file("1\n2\n0 0 0\n");
    let err = meshfile::load(file.path(), ParseMode::Strict).unwrap_err();
    assert!(matches!(err, LoadError::Parse { line: 4, .. }));

    // The same file is accepted leniently with a zero-filled vertex
    let store = meshfile::load(file.path(), ParseMode::Lenient).unwrap();
    assert_eq!(store.meshes()[0].len(), 2);
}

#[test]
fn runs_frames_until_quit() {
    let file = mesh_file("2\n1\n0 40 0\n2\n0 40 0\n10 40 0\n");
    let mut config = ViewerConfig::new(file.path());
    config.width = 120;
    config.height = 90;

    let store = meshfile::load(&config.mesh_file, config.parse_mode).unwrap();
    let mut clock = FakeClock::default();
    let mut viewer = Viewer::new(&config, store, clock.now()).unwrap();
    let mut surface = CountingSurface::new(5);

    viewer.run(&mut surface, &mut clock).unwrap();

    assert_eq!(surface.frames.len(), 5);
    // Meshes alternate 1, 0, 1, 0, 1 starting from index 0
    let lit: Vec<usize> = surface.frames.iter().map(|f| f.lit_count()).collect();
    assert_eq!(lit, vec![2, 1, 2, 1, 2]);
    // Every frame was paced by a full period
    assert_eq!(clock.slept, Duration::from_secs(1) / 30 * 6);

    // Center is (60, 45 + 50); y = 95 - 1.5 * 10 = 80
    assert_eq!(surface.frames[1].pixel(60, 80), Some(FOREGROUND));
}

#[test]
fn empty_mesh_file_is_refused() {
    let file = mesh_file("0\n");
    let config = ViewerConfig::new(file.path());
    let store = meshfile::load(&config.mesh_file, config.parse_mode).unwrap();
    let err = Viewer::new(&config, store, Duration::ZERO).err().unwrap();
    assert!(matches!(err, ViewerError::Load(LoadError::NoMeshes)));
}
