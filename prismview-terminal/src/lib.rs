//! Terminal-based prism viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use prismview_core::{
    Camera, MeshCache, OrbitControls, RotationClock, RotationState, SceneConfig, Transform,
    ViewerAction, ViewerState, PRISM_TYPES,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::{AsciiRenderer, Background, CELL_ASPECT};

/// Orbit step per arrow key press (radians).
const ORBIT_STEP: f32 = 0.1;
/// Zoom factor per `+`/`-` press.
const ZOOM_STEP: f32 = 0.9;
/// Pan distance per key press, as a fraction of the orbit radius.
const PAN_STEP: f32 = 0.05;

/// Options the viewer starts with.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub state: ViewerState,
    pub scene: SceneConfig,
    pub clock: RotationClock,
    pub frame_rate: u32,
    pub background: Background,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            state: ViewerState::default(),
            scene: SceneConfig::default(),
            clock: RotationClock::default(),
            frame_rate: 30,
            background: Background::default(),
        }
    }
}

/// What a key press asks the application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Viewer(ViewerAction),
    Orbit { azimuth: f32, polar: f32 },
    Zoom(f32),
    Pan { right: f32, up: f32 },
    ResetView,
}

/// Map a key to a command; unbound keys yield `None`.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Command::Viewer(ViewerAction::Select(PRISM_TYPES[index].id.to_string()))
        }
        KeyCode::Tab | KeyCode::Char('n') => Command::Viewer(ViewerAction::SelectNext),
        KeyCode::BackTab | KeyCode::Char('p') => Command::Viewer(ViewerAction::SelectPrevious),
        KeyCode::Char('w') => Command::Viewer(ViewerAction::ToggleWireframe),
        KeyCode::Char(' ') => Command::Viewer(ViewerAction::ToggleAutoRotate),
        KeyCode::Char('s') => Command::Viewer(ViewerAction::ToggleStats),
        KeyCode::Left => Command::Orbit {
            azimuth: -ORBIT_STEP,
            polar: 0.0,
        },
        KeyCode::Right => Command::Orbit {
            azimuth: ORBIT_STEP,
            polar: 0.0,
        },
        KeyCode::Up => Command::Orbit {
            azimuth: 0.0,
            polar: -ORBIT_STEP,
        },
        KeyCode::Down => Command::Orbit {
            azimuth: 0.0,
            polar: ORBIT_STEP,
        },
        KeyCode::Char('+') | KeyCode::Char('=') => Command::Zoom(ZOOM_STEP),
        KeyCode::Char('-') => Command::Zoom(1.0 / ZOOM_STEP),
        KeyCode::Char('h') => Command::Pan {
            right: -PAN_STEP,
            up: 0.0,
        },
        KeyCode::Char('l') => Command::Pan {
            right: PAN_STEP,
            up: 0.0,
        },
        KeyCode::Char('k') => Command::Pan {
            right: 0.0,
            up: PAN_STEP,
        },
        KeyCode::Char('j') => Command::Pan {
            right: 0.0,
            up: -PAN_STEP,
        },
        KeyCode::Char('r') => Command::ResetView,
        _ => return None,
    };
    Some(command)
}

/// Main application struct for the terminal prism viewer
pub struct TerminalApp {
    state: ViewerState,
    scene: SceneConfig,
    clock: RotationClock,
    frame_rate: u32,
    meshes: MeshCache,
    rotation: RotationState,
    camera: Camera,
    orbit: OrbitControls,
    renderer: AsciiRenderer,
    running: bool,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(options: AppOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(options, width as usize, height as usize))
    }

    /// Build the app for a fixed viewport without touching the terminal.
    pub fn with_size(options: AppOptions, width: usize, height: usize) -> Self {
        let camera = Camera::from_config(&options.scene.camera, viewport_aspect(width, height));
        let orbit = OrbitControls::from_camera(&camera, options.scene.orbit);

        Self {
            state: options.state,
            clock: options.clock,
            frame_rate: options.frame_rate.max(1),
            meshes: MeshCache::new(),
            rotation: RotationState::zero(),
            camera,
            orbit,
            renderer: AsciiRenderer::new(width, height).with_background(options.background),
            scene: options.scene,
            running: true,
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn is_running(&self) -> bool {
        self.running
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
        let target_frame_time = Duration::from_secs(1) / self.frame_rate;
        let mut previous_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update(frame_start - previous_frame);
            previous_frame = frame_start;

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(command) = command_for_key(code) {
                    self.execute(command);
                }
            }
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.renderer.resize(width as usize, height as usize);
                self.camera.aspect = viewport_aspect(width as usize, height as usize);
            }
            _ => {}
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Viewer(action) => {
                tracing::debug!(?action, "viewer action");
                self.state = std::mem::take(&mut self.state).apply(action);
            }
            Command::Orbit { azimuth, polar } => self.orbit.rotate(azimuth, polar),
            Command::Zoom(factor) => self.orbit.zoom(factor),
            Command::Pan { right, up } => {
                let scale = self.orbit.radius;
                self.orbit.pan(right * scale, up * scale);
            }
            Command::ResetView => {
                let camera = Camera::from_config(&self.scene.camera, self.camera.aspect);
                self.orbit = OrbitControls::from_camera(&camera, self.scene.orbit);
                self.rotation = RotationState::zero();
            }
        }
        self.orbit.apply(&mut self.camera);
    }

    /// Advance one frame.
    pub fn update(&mut self, elapsed: Duration) {
        if self.state.auto_rotate {
            self.rotation.advance(self.clock, elapsed);
        }
    }

    /// Rasterize the current frame into the renderer's buffer.
    pub fn rasterize(&mut self) -> &AsciiRenderer {
        let model = Transform::rotation_matrix(&self.rotation);
        let material = self.state.material();
        let mesh = self.meshes.get_or_generate(&self.state.selected_prism);

        self.renderer.clear();
        self.renderer.render_grid(
            &self.scene.grid.lines(),
            (self.scene.grid.cell_color, self.scene.grid.section_color),
            &self.camera,
        );
        self.renderer
            .render_mesh(mesh, &model, &self.camera, &material, &self.scene.lighting);

        &self.renderer
    }

    fn render(&mut self) -> io::Result<()> {
        self.rasterize();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        for (row, (color, text)) in self.overlay_lines().into_iter().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(0, row as u16),
                terminal::Clear(ClearType::UntilNewLine),
                SetForegroundColor(color),
                Print(text),
                ResetColor
            )?;
        }

        let bottom = self.renderer.height().saturating_sub(1) as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, bottom),
            terminal::Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::DarkGrey),
            Print(self.controls_help()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    /// Text drawn over the top-left of the viewport: title, selection, view
    /// options and, when enabled, the geometric properties panel.
    pub fn overlay_lines(&self) -> Vec<(Color, String)> {
        let descriptor = self.state.descriptor();
        let on_off = |flag: bool| if flag { "on" } else { "off" };

        let mut lines = vec![
            (
                Color::Yellow,
                format!("Prism Viewer | FPS: {:.1}", self.fps),
            ),
            (Color::White, descriptor.name.to_string()),
            (Color::DarkGrey, descriptor.description.to_string()),
            (
                Color::Grey,
                format!(
                    "Wireframe: {}  Auto Rotate: {}  Statistics: {}",
                    on_off(self.state.wireframe),
                    on_off(self.state.auto_rotate),
                    on_off(self.state.show_stats)
                ),
            ),
        ];

        if self.state.show_stats {
            lines.push((Color::Cyan, "Geometric Properties".to_string()));
            lines.extend(
                descriptor
                    .properties()
                    .into_iter()
                    .map(|(label, value)| (Color::Cyan, format!("  {label}: {value}"))),
            );
        }

        let width = self.renderer.width();
        lines.truncate(self.renderer.height().saturating_sub(1));
        lines
            .into_iter()
            .map(|(color, text)| (color, clip(&text, width).to_string()))
            .collect()
    }

    /// Key reference for the bottom row, cut to the viewport width so the
    /// terminal never wraps or scrolls.
    pub fn controls_help(&self) -> &'static str {
        clip(CONTROLS_HELP, self.renderer.width())
    }
}

/// Longest prefix of `text` that fits in `width` cells.
fn clip(text: &str, width: usize) -> &str {
    text.char_indices()
        .nth(width)
        .map_or(text, |(end, _)| &text[..end])
}

const CONTROLS_HELP: &str =
    "1-5/Tab=Prism W=Wireframe Space=Rotate S=Stats Arrows=Orbit +/-=Zoom HJKL=Pan R=Reset Q=Quit";

fn viewport_aspect(width: usize, height: usize) -> f32 {
    width as f32 * CELL_ASPECT / height.max(1) as f32
}
