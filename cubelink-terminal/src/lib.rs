//! Terminal front-end for the CubeLink cube
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use cubelink_core::{
    format_moves, Camera, CubeEngine, DragAccumulator, Face, RotationCommand, TurnDirection,
    ViewState,
};
use std::collections::VecDeque;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;

pub use config::AppConfig;
pub use renderer::CubeRenderer;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Rotate(RotationCommand),
    Drag { dx: f32, dy: f32 },
    ResetView,
    ResetState,
    Quit,
}

/// Map a key to an action. Face letters turn in `button_direction`; their
/// shifted (uppercase) form turns the other way.
pub fn key_action(code: KeyCode, button_direction: TurnDirection, impulse: f32) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('v') => Some(Action::ResetView),
        KeyCode::Char('x') => Some(Action::ResetState),
        KeyCode::Left => Some(Action::Drag { dx: -impulse, dy: 0.0 }),
        KeyCode::Right => Some(Action::Drag { dx: impulse, dy: 0.0 }),
        KeyCode::Up => Some(Action::Drag { dx: 0.0, dy: -impulse }),
        KeyCode::Down => Some(Action::Drag { dx: 0.0, dy: impulse }),
        KeyCode::Char(c) => {
            let face = Face::from_letter(c)?;
            let direction = if c.is_ascii_uppercase() {
                button_direction.inverse()
            } else {
                button_direction
            };
            Some(Action::Rotate(RotationCommand::new(face, direction)))
        }
        _ => None,
    }
}

/// Main application struct for the terminal cube
pub struct TerminalApp {
    config: AppConfig,
    engine: CubeEngine,
    view: ViewState,
    drag: DragAccumulator,
    camera: Camera,
    renderer: CubeRenderer,
    /// Scripted commands waiting for the engine to go idle
    pending: VecDeque<RotationCommand>,
    last_mouse: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(config, width as usize, height as usize))
    }

    pub fn with_size(config: AppConfig, width: usize, height: usize) -> Self {
        let aspect = cell_aspect(width, height, config.render.cell_aspect);
        Self {
            engine: CubeEngine::new(config.animation),
            view: ViewState::default(),
            drag: DragAccumulator::new(),
            camera: Camera::new(&config.camera, aspect),
            renderer: CubeRenderer::new(width, height),
            pending: VecDeque::new(),
            last_mouse: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            config,
        }
    }

    pub fn engine(&self) -> &CubeEngine {
        &self.engine
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Commit commands instantly, e.g. a scramble before the session starts.
    /// Returns how many were applied; none are while a turn animates.
    pub fn scramble(&mut self, commands: &[RotationCommand]) -> usize {
        let applied: Vec<RotationCommand> = commands
            .iter()
            .copied()
            .filter(|c| self.engine.apply_now(*c).is_accepted())
            .collect();
        if applied.len() < commands.len() {
            log::debug!(
                "scramble dropped {} of {} moves while rotating",
                commands.len() - applied.len(),
                commands.len()
            );
        }
        if !applied.is_empty() {
            log::info!("scrambled with {}", format_moves(&applied));
        }
        applied.len()
    }

    /// Queue commands to animate one after another
    pub fn queue_moves(&mut self, commands: &[RotationCommand]) {
        self.pending.extend(commands.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup; raw mode goes first so a failed screen restore cannot leave it on
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );

        result.and(raw).and(screen)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(self.config.render.frame_millis());
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            let delta = (frame_start - previous).as_secs_f32();
            previous = frame_start;
            self.update(delta);

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

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                let controls = &self.config.controls;
                if let Some(action) =
                    key_action(code, controls.face_button_direction, controls.key_drag_impulse)
                {
                    self.apply(action);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width as usize, height as usize),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.last_mouse = Some(position),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((x, y)) = self.last_mouse {
                    let scale = self.config.controls.mouse_drag_scale;
                    let dx = (f32::from(position.0) - f32::from(x)) * scale;
                    let dy = (f32::from(position.1) - f32::from(y)) * scale;
                    self.drag.set(dx, dy);
                }
                self.last_mouse = Some(position);
            }
            MouseEventKind::Up(MouseButton::Left) => self.last_mouse = None,
            _ => {}
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Rotate(command) => {
                // Dropped silently while another turn animates
                self.engine.submit_rotation(command);
            }
            Action::Drag { dx, dy } => self.drag.push(dx, dy),
            Action::ResetView => {
                self.view.reset_view();
                self.drag.clear();
            }
            Action::ResetState => {
                self.pending.clear();
                self.engine.reset_state();
            }
            Action::Quit => self.running = false,
        }
    }

    /// Advance one frame: feed scripted moves, animate the slice, spin the view
    pub fn update(&mut self, delta: f32) {
        if !self.engine.is_rotating() {
            if let Some(command) = self.pending.pop_front() {
                self.engine.submit_rotation(command);
            }
        }

        if let Some(done) = self.engine.on_frame(delta) {
            if self.engine.cube().is_solved() {
                log::info!("solved after {}", done.command);
            }
        }

        self.view.update(
            &mut self.drag,
            delta,
            self.engine.is_rotating(),
            &self.config.view,
        );
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.renderer.resize(width, height);
        self.camera
            .set_aspect(cell_aspect(width, height, self.config.render.cell_aspect));
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer
            .render_frame(&self.engine.frame(), &self.view, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        let status = if self.engine.cube().is_solved() {
            "solved"
        } else {
            "scrambled"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "CubeLink | {} | moves: {} | FPS: {:.1} | FBLRUD=turn (Shift=reverse) drag/arrows=spin V=reset view X=reset cube Q=quit",
                status,
                self.engine.history().len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Camera aspect ratio for a grid of terminal cells
fn cell_aspect(width: usize, height: usize, cell_aspect: f32) -> f32 {
    width.max(1) as f32 / (height.max(1) as f32 * cell_aspect)
}
