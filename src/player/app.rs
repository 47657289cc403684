//! Application state and event loop for the terminal player.
//!
//! The app owns a [`Session`] and translates terminal input into session
//! operations. Mouse down, drag and up map one to one onto the session's drag
//! gestures; keys and button clicks call the same operations the on-screen
//! controls do. Backend notifications are pumped once per frame.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use abrepeat::config::Config;
use abrepeat::drag::Pointer;
use abrepeat::media::{MediaBackend, MediaFile};
use abrepeat::repeat::RepeatMode;
use abrepeat::session::{Notice, NoticeLevel, Session, SessionOptions};
use abrepeat::tips::TipRotator;

use super::audio::RodioBackend;
use super::layout::{Button, CardLayout, Hit};
use super::ui;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);
const VOLUME_STEP: u8 = 5;
const SPEED_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a path to load; `replace` swaps the current file instead of adding
    OpenPath { buffer: String, replace: bool },
}

pub struct App<B: MediaBackend> {
    pub session: Session<B>,
    pub tips: Option<TipRotator>,
    pub input: InputMode,
    pub should_quit: bool,
    status: Option<(Notice, Instant)>,
    layout: Option<CardLayout>,
}

impl<B: MediaBackend> App<B> {
    pub fn new(session: Session<B>, config: &Config, now: Instant) -> Self {
        let tips = config
            .show_tips
            .then(|| TipRotator::new(Duration::from_secs(config.tip_interval_secs), now));
        Self {
            session,
            tips,
            input: InputMode::Normal,
            should_quit: false,
            status: None,
            layout: None,
        }
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref().map(|(notice, _)| notice)
    }

    fn set_status(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) {
        self.status = Some((
            Notice {
                level,
                message: message.into(),
            },
            now,
        ));
    }

    /// Add files in order. Files beyond the cap are rejected with a notice.
    pub fn load_paths(&mut self, paths: &[PathBuf], now: Instant) {
        for path in paths {
            self.open_path(path, false, now);
        }
    }

    pub fn open_path(&mut self, path: &Path, replace: bool, now: Instant) {
        let file = match MediaFile::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                error!("Cannot open {}: {e}", path.display());
                self.set_status(NoticeLevel::Error, format!("Cannot open file: {e}"), now);
                return;
            }
        };

        let current = self.session.playlist().current_index();
        let result = match (replace, current) {
            (true, Some(index)) => self.session.replace_file(index, file),
            _ => self.session.add_file(file).map(|_| ()),
        };
        if let Err(e) = result {
            info!("Load rejected: {e}");
        }
        self.collect_notice(now);
    }

    fn collect_notice(&mut self, now: Instant) {
        if let Some(notice) = self.session.take_notice() {
            self.status = Some((notice, now));
        }
    }

    /// Per-frame housekeeping: backend notifications and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        self.session.pump();
        self.collect_notice(now);

        if let Some((_, shown)) = &self.status
            && now.saturating_duration_since(*shown) > NOTICE_TIMEOUT
        {
            self.status = None;
        }
    }

    /// Remember what was drawn. A gesture in progress follows its control.
    pub fn set_layout(&mut self, layout: CardLayout) {
        if let Some(target) = self.session.dragging() {
            self.session.rebind_drag(target, layout.bounds_for(target));
        }
        self.layout = Some(layout);
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Previous => self.session.skip_previous(),
            Button::StepBack => self.session.step_back(),
            Button::PlayPause => self.session.toggle_playback(),
            Button::StepForward => self.session.step_forward(),
            Button::Next => self.session.skip_next(),
            Button::SetA => self.session.set_marker_a_here(),
            Button::All => self.session.select_all(),
            Button::SetB => self.session.set_marker_b_here(),
            Button::Repeat(mode) => self.session.select_repeat(mode),
            Button::Slot(number) => {
                if let Err(e) = self.session.select_slot(number) {
                    error!("Slot selection failed: {e}");
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pointer = Pointer::new(mouse.column as f32, mouse.row as f32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(layout) = &self.layout else {
                    return;
                };
                let region = self.session.region();
                let duration = self.session.duration();
                match layout.hit(mouse.column, mouse.row, region, duration) {
                    Some(Hit::Drag(target)) => {
                        let bounds = layout.bounds_for(target);
                        self.session.begin_drag(target, bounds, pointer);
                    }
                    Some(Hit::Button(button)) => self.press(button),
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.session.drag_to(pointer),
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.end_drag();
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let InputMode::OpenPath { buffer, replace } = &mut self.input {
            match key.code {
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter => {
                    let path = PathBuf::from(shellexpand::tilde(buffer.trim()).as_ref());
                    let replace = *replace;
                    self.input = InputMode::Normal;
                    self.open_path(&path, replace, now);
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.press(Button::PlayPause),
            KeyCode::Left => self.press(Button::StepBack),
            KeyCode::Right => self.press(Button::StepForward),
            KeyCode::Char('n') => self.press(Button::Next),
            KeyCode::Char('p') => self.press(Button::Previous),
            KeyCode::Char('a') => self.press(Button::SetA),
            KeyCode::Char('b') => self.press(Button::SetB),
            KeyCode::Char('l') => self.press(Button::All),
            KeyCode::Char('x') => self.press(Button::Repeat(RepeatMode::X5)),
            KeyCode::Char('X') => self.press(Button::Repeat(RepeatMode::X10)),
            KeyCode::Char('i') => self.press(Button::Repeat(RepeatMode::Infinite)),
            KeyCode::Char(c @ '1'..='5') => {
                self.press(Button::Slot(c as usize - '0' as usize));
            }
            KeyCode::Up => {
                let volume = self.session.volume().saturating_add(VOLUME_STEP);
                self.session.set_volume(volume);
            }
            KeyCode::Down => {
                let volume = self.session.volume().saturating_sub(VOLUME_STEP);
                self.session.set_volume(volume);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.set_speed(self.session.speed() + SPEED_STEP);
            }
            KeyCode::Char('-') => {
                self.session.set_speed(self.session.speed() - SPEED_STEP);
            }
            KeyCode::Char('o') => {
                self.input = InputMode::OpenPath {
                    buffer: String::new(),
                    replace: false,
                };
            }
            KeyCode::Char('O') => {
                self.input = InputMode::OpenPath {
                    buffer: String::new(),
                    replace: true,
                };
            }
            KeyCode::Char('c') => {
                if let Some(index) = self.session.slots().selected()
                    && let Err(e) = self.session.clear_slot(index.number())
                {
                    error!("Clearing slot failed: {e}");
                }
            }
            KeyCode::Char('d') => {
                if let Some(index) = self.session.playlist().current_index()
                    && let Err(e) = self.session.remove_file(index)
                {
                    error!("Remove failed: {e}");
                }
            }
            _ => {}
        }
    }
}

pub fn run(files: &[PathBuf]) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    init_logging(&config)?;
    info!("Starting abrepeat player");

    let backend = RodioBackend::new()?;
    let session = Session::new(backend, SessionOptions::from(&config));
    let mut app = App::new(session, &config, Instant::now());
    app.load_paths(files, Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        eprintln!("Error: {e}");
    }
    info!("Player closed");
    res
}

fn run_app<T: ratatui::backend::Backend, B: MediaBackend>(
    terminal: &mut Terminal<T>,
    app: &mut App<B>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let now = Instant::now();
        app.tick(now);

        let mut drawn = None;
        terminal.draw(|f| drawn = Some(ui::draw(f, app, now)))?;
        if let Some(layout) = drawn {
            app.set_layout(layout);
        }

        // Poll for events with a short timeout to keep the playhead moving
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    use simplelog::{CombinedLogger, LevelFilter, WriteLogger};
    use std::fs::{self, File};

    let log_path = config.log_path()?;
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    CombinedLogger::init(vec![WriteLogger::new(
        LevelFilter::Debug,
        simplelog::Config::default(),
        File::create(&log_path)?,
    )])?;

    Ok(())
}
