use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use motes_config::Config;
use motes_core::{ClockReading, ColorTheme, TimeFormat};
use motes_fonts::{FontLoader, FontRole, FontSources, LoadStatus};
use motes_swarm::SwarmWorld;
use ratatui::{DefaultTerminal, Frame};

mod location;
mod logging;
mod view;

use location::LocationMonitor;
use view::ViewModel;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();
    let config = Config::load();
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current time format (12h or 24h).
    time_format: TimeFormat,
    /// Current particle palette.
    color_theme: ColorTheme,
    /// Delay between frames.
    frame_interval: Duration,
    /// Clock sample taken for the current frame.
    reading: ClockReading,
    /// The particle simulation.
    world: SwarmWorld,
    /// Faces still loading in the background.
    fonts: FontLoader,
    /// IP geolocation lookup.
    location: LocationMonitor,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let sources = FontSources {
            display_bold: config.fonts.display_bold.clone(),
            display_medium: config.fonts.display_medium.clone(),
            body: config.fonts.body.clone(),
        };

        Self {
            running: false,
            time_format: config.time_format,
            color_theme: config.color_theme,
            frame_interval: Duration::from_millis(config.frame_interval_ms.max(1)),
            reading: ClockReading::now(config.time_format),
            world: SwarmWorld::new(config.particles_per_zone, config.color_theme.palette()),
            fonts: FontLoader::spawn(sources, config.fonts.timeout()),
            location: LocationMonitor::new(config.location),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.location.start();
        while self.running {
            self.update();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.location.stop();
        Ok(())
    }

    /// Advance the simulation by one frame.
    ///
    /// The swarm keeps moving while the faces load; it just has no glyphs to
    /// form until they settle.
    fn update(&mut self) {
        if self.fonts.status() == LoadStatus::Pending
            && self.fonts.poll(Instant::now()) != LoadStatus::Pending
            && let Some(set) = self.fonts.fonts()
        {
            self.world.set_face(set.face(FontRole::DisplayBold).clone());
        }

        self.reading = ClockReading::now(self.time_format);
        self.world.tick(&self.reading);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let location = self.location.label();
        let model = ViewModel {
            world: &self.world,
            reading: &self.reading,
            location: &location,
            loading: self.fonts.status() == LoadStatus::Pending,
            time_format: self.time_format,
            color_theme: self.color_theme,
        };
        view::draw(frame, &model);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// The poll timeout paces the frame loop.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_time_format(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Toggle between 12-hour and 24-hour time format.
    fn toggle_time_format(&mut self) {
        self.time_format = self.time_format.toggle();
    }

    /// Cycle through the particle palettes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
        self.world.set_palette(self.color_theme.palette());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
