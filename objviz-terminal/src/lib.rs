//! Terminal front end: keyboard pose controls driving the core pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use objviz_core::{draw_frame, Canvas, Mesh, Pose, RenderStyle};

pub mod renderer;

pub use renderer::TermSurface;

/// Angle increment per rotation keypress, radians.
const ROTATION_STEP: f32 = 0.1;
/// Anchor increment per move keypress, cells.
const MOVING_STEP: i32 = 10;
/// Zoom increment per zoom keypress.
const ZOOM_STEP: f32 = 1.0;

/// Interactive viewer: owns the mesh, pose, and style, and runs the render
/// loop. Everything is single-threaded; input is applied between frames and
/// each frame runs the whole pipeline to completion.
pub struct TerminalApp {
    mesh: Mesh,
    pose: Pose,
    style: RenderStyle,
    canvas: Canvas,
    surface: TermSurface,
    /// Upper bound on rotated vertex depth; zoom stays strictly above it.
    depth_bound: f32,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let depth_bound = mesh.bounding_radius();
        let mut pose = Pose::centered(width as u32, height as u32);
        pose.clamp_zoom(depth_bound);

        Ok(Self {
            mesh,
            pose,
            style: RenderStyle::default(),
            canvas: Canvas::new(width as u32, height as u32),
            surface: TermSurface::new(width as usize, height as usize),
            depth_bound,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => self.rotate(ROTATION_STEP, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotate(-ROTATION_STEP, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotate(0.0, -ROTATION_STEP, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotate(0.0, ROTATION_STEP, 0.0),
                KeyCode::Char('e') => self.rotate(0.0, 0.0, ROTATION_STEP),
                KeyCode::Char('r') => self.rotate(0.0, 0.0, -ROTATION_STEP),
                KeyCode::Char('0') => self.pose.reset_rotation(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.zoom(ZOOM_STEP),
                KeyCode::Char('-') => self.zoom(-ZOOM_STEP),
                KeyCode::Char('i') => self.pose.translate(0, -MOVING_STEP),
                KeyCode::Char('k') => self.pose.translate(0, MOVING_STEP),
                KeyCode::Char('j') => self.pose.translate(-MOVING_STEP, 0),
                KeyCode::Char('l') => self.pose.translate(MOVING_STEP, 0),
                KeyCode::Char('f') => {
                    self.style.fill = match self.style.fill {
                        Some(_) => None,
                        None => Some(objviz_core::Rgb::BLACK),
                    };
                }
                KeyCode::Char('m') => self.style.markers = !self.style.markers,
                _ => {}
            }
        }
        Ok(())
    }

    fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        if let Err(err) = self.pose.step_rotation(dx, dy, dz) {
            tracing::warn!(%err, "rotation step rejected");
        }
    }

    fn zoom(&mut self, delta: f32) {
        if let Err(err) = self.pose.set_zoom(self.pose.zoom + delta) {
            tracing::warn!(%err, "zoom change rejected");
        }
        self.pose.clamp_zoom(self.depth_bound);
    }

    fn render(&mut self) -> io::Result<()> {
        if let Err(err) = draw_frame(
            &self.mesh,
            &self.pose,
            &self.style,
            self.canvas,
            &mut self.surface,
        ) {
            // Skip the frame rather than draw corrupted geometry.
            tracing::warn!(%err, "frame skipped");
            return Ok(());
        }

        let mut stdout = stdout();
        self.surface.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "objviz | FPS: {:.1} | zoom {:.1} | WASD/Arrows rotate  E/R roll  +/- zoom  IJKL move  F fill  M markers  0 reset  Q quit",
                self.fps, self.pose.zoom
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
