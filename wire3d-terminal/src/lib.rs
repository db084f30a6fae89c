/// Terminal host for wireframe meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::info;
use wire3d_core::{precalculate, render, Mesh};

pub mod renderer;

pub use renderer::{LineCanvas, CELL_ASPECT};

/// Frames per second the main loop aims for
const TARGET_FPS: u64 = 30;

/// Automatic spin per frame, in degrees, applied to every axis
const SPIN_STEP: f32 = 1.0;

/// Manual rotation per key press, in degrees
const KEY_STEP: f32 = 5.0;

/// Distance pushed into the screen so the mesh sits beyond the depth clamp
const DEFAULT_DEPTH: f32 = -8.0;

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    mesh: Mesh,
    canvas: LineCanvas,
    running: bool,
    spinning: bool,
    clock: FrameClock,
}

/// Paces the main loop and keeps a once-per-second FPS estimate
struct FrameClock {
    frame_budget: Duration,
    window_start: Instant,
    frames: u32,
    fps: f32,
}

impl FrameClock {
    fn new(target_fps: u64) -> Self {
        Self {
            frame_budget: Duration::from_millis(1000 / target_fps),
            window_start: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    /// Sleep off what is left of the frame budget, then count the frame
    fn finish_frame(&mut self, frame_start: Instant) {
        if let Some(rest) = self.frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
        self.count_frame(Instant::now());
    }

    fn count_frame(&mut self, now: Instant) {
        self.frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= Duration::from_secs(1) {
            self.fps = self.frames as f32 / window.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
    }
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, width as usize, height as usize))
    }

    /// Create an app for a canvas of the given size, centring the mesh
    pub fn with_size(mut mesh: Mesh, width: usize, height: usize) -> Self {
        let state = mesh.transform_mut();
        state.rotation.rotate(20.0, 0.0, 0.0);
        state.offset.x = width as f32 / (2.0 * CELL_ASPECT);
        state.offset.y = height as f32 / 2.0;
        state.offset.z = DEFAULT_DEPTH;
        state.scale = height as f32 * 1.5;

        info!(
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            width,
            height,
            "terminal renderer ready"
        );

        Self {
            mesh,
            canvas: LineCanvas::new(width, height),
            running: true,
            spinning: true,
            clock: FrameClock::new(TARGET_FPS),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn canvas(&self) -> &LineCanvas {
        &self.canvas
    }

    /// Take over the terminal until the user quits, restoring it even
    /// when a frame fails
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::ZERO)? {
                self.handle_input()?;
            }
            self.update();
            self.draw_frame();
            self.present()?;

            self.clock.finish_frame(frame_start);
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            self.handle_key(code);
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        let rotation = &mut self.mesh.transform_mut().rotation;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') => self.spinning = !self.spinning,
            KeyCode::Char('w') | KeyCode::Up => rotation.rotate(KEY_STEP, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => rotation.rotate(-KEY_STEP, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => rotation.rotate(0.0, -KEY_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => rotation.rotate(0.0, KEY_STEP, 0.0),
            KeyCode::Char('e') => rotation.rotate(0.0, 0.0, KEY_STEP),
            KeyCode::Char('r') => rotation.rotate(0.0, 0.0, -KEY_STEP),
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.spinning {
            self.mesh
                .transform_mut()
                .rotation
                .rotate(SPIN_STEP, SPIN_STEP, SPIN_STEP);
        }
    }

    /// Run the transform pass and rasterize every edge into the canvas
    pub fn draw_frame(&mut self) {
        self.canvas.clear();
        precalculate(&mut self.mesh);
        render(&self.mesh, &mut self.canvas);
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Wire3D | FPS: {:.1} | {} vertices, {} edges | WASD/Arrows=Rotate E/R=Roll Space=Spin Q=Quit",
                self.clock.fps,
                self.mesh.vertex_count(),
                self.mesh.edge_count()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
