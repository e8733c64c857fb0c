use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};
use skyglow_config::Config;
use skyglow_core::{AnimationLoop, AnimationSpeed, DrawList, FrameTime, SceneKind};
use skyglow_orbit::WorkspaceState;
use skyglow_sky::{SkyState, backdrop};
use tracing::{debug, info};

use crate::render::{CellCanvas, HitTarget, draw_scene, hit_test};

const ACCENT: Color = Color::Rgb(34, 211, 238);

/// Where terminal events come from.
trait EventSource {
    /// Wait up to `timeout` for an event. `false` means none arrived.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

/// The process's terminal, via crossterm.
struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Scene currently on screen.
    scene: SceneKind,
    /// Playback speed.
    speed: AnimationSpeed,
    frame_loop: AnimationLoop,
    sky: SkyState,
    workspace: WorkspaceState,
    /// Module positions from the last drawn frame.
    targets: Vec<HitTarget>,
    show_help: bool,
    /// Scene time of the last drawn frame, in seconds.
    last_seconds: f32,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let mut frame_loop = AnimationLoop::new(config.fps);
        frame_loop.set_time_scale(config.speed.time_scale());
        Self {
            running: false,
            scene: config.scene,
            speed: config.speed,
            show_help: config.show_help,
            config,
            frame_loop,
            sky: SkyState::new(),
            workspace: WorkspaceState::new(),
            targets: Vec::new(),
            last_seconds: 0.0,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let Some(time) = self.frame_loop.tick(Instant::now()) else {
                break;
            };
            terminal.draw(|frame| self.render(frame, time))?;
            self.handle_crossterm_events()?;
        }
        info!("animation loop stopped");
        Ok(())
    }

    /// Renders one animation frame and the help line.
    fn render(&mut self, frame: &mut Frame, time: FrameTime) {
        let help_height = u16::from(self.show_help);
        let [canvas_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(help_height)])
                .areas(frame.area());

        let mut canvas = CellCanvas::new(
            canvas_area.width,
            canvas_area.height,
            self.config.cell_width,
            self.config.cell_height,
        );
        let viewport = canvas.viewport();

        if self.scene.shows_sky() {
            canvas.paint(&self.sky.frame(viewport, time.elapsed_ms()));
        } else if !viewport.is_empty() {
            let mut list = DrawList::new();
            backdrop::draw_backdrop(viewport, &mut list);
            canvas.paint(&list);
        }

        self.last_seconds = time.seconds();
        if self.scene.shows_workspace() {
            let scene = self.workspace.frame(self.last_seconds);
            self.targets = draw_scene(&mut canvas, &scene, self.last_seconds);
        } else {
            self.targets.clear();
        }

        frame.render_widget(Paragraph::new(canvas.into_lines()), canvas_area);

        if self.show_help {
            frame.render_widget(self.help_line(), help_area);
        }
    }

    fn help_line(&self) -> Line<'static> {
        let mut spans = vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "tab".bold().fg(ACCENT),
            format!(" {}  ", self.scene.label()).dark_gray(),
            "s".bold().fg(ACCENT),
            format!(" {} speed  ", self.speed.label()).dark_gray(),
        ];
        if self.scene.shows_workspace() {
            spans.push("f".bold().fg(ACCENT));
            spans.push(" focus  ".dark_gray());
        }
        spans.push("h".bold().fg(ACCENT));
        spans.push(" hide help".dark_gray());
        if self.scene.shows_workspace() && self.workspace.is_focus_burst(self.last_seconds) {
            spans.push("  focus burst".bold().fg(ACCENT));
        }
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        self.drain_events(&mut TerminalEvents)
    }

    /// Handle every event that arrives before the next frame is due.
    ///
    /// Returns when the deadline passes or the app stops, so input never
    /// produces extra frames. Once the deadline has passed at most one
    /// pending event is handled before the next frame.
    fn drain_events<S: EventSource>(&mut self, source: &mut S) -> color_eyre::Result<()> {
        loop {
            let timeout = self.frame_loop.time_until_next(Instant::now());
            if !source.poll(timeout)? {
                return Ok(());
            }
            self.on_event(source.read()?);
            if !self.running || timeout.is_zero() {
                return Ok(());
            }
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            // The next frame reads the new size.
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.cycle_scene(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('f')) => self.force_focus_burst(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Hover whichever module sits under the pointer.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved = mouse.kind {
            let hovered = hit_test(&self.targets, mouse.column, mouse.row);
            self.workspace.hover(hovered);
        }
    }

    fn cycle_scene(&mut self) {
        self.scene = self.scene.next();
        if !self.scene.shows_workspace() {
            self.workspace.hover(None);
        }
        info!(scene = self.scene.label(), "scene changed");
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.frame_loop.set_time_scale(self.speed.time_scale());
        info!(speed = self.speed.label(), "speed changed");
    }

    fn force_focus_burst(&mut self) {
        if self.scene.shows_workspace() {
            self.workspace.trigger_focus_burst(self.last_seconds);
        }
    }

    /// Stop the loop; no further frames are drawn.
    fn quit(&mut self) {
        self.running = false;
        self.frame_loop.cancel();
    }
}
