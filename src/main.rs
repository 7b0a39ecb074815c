mod ui;

use std::{
    fs::{self, File},
    io::{self, stdin},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{debug, info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use digitar::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker, TypingEvent},
    text, Phase, Session, SessionLength,
};

/// typing speed test: words per minute, letters per minute and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the reference text word by word, pressing space after each word. Accents and case are ignored when comparing words."
)]
pub struct Cli {
    /// session length in seconds (defaults to the last one used)
    #[clap(short = 'd', long, value_enum)]
    duration: Option<SessionLength>,

    /// custom reference text
    #[clap(short = 'p', long, conflicts_with = "file")]
    prompt: Option<String>,

    /// read the reference text from a file
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// print the final results as JSON after leaving
    #[clap(long)]
    json: bool,
}

impl Cli {
    fn reference_text(&self) -> Result<String> {
        match (&self.prompt, &self.file) {
            (Some(prompt), _) => Ok(prompt.clone()),
            (None, Some(path)) => Ok(text::load(path)?),
            (None, None) => Ok(text::default_text()),
        }
    }

    /// The CLI duration wins over the stored one
    fn session_length(&self, config: &Config) -> SessionLength {
        self.duration.unwrap_or(config.session_length)
    }
}

/// What the event loop must do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    /// the countdown (re)started; the next tick is a full second away
    RestartClock,
    /// the session length changed and should be remembered
    SaveLength(SessionLength),
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    /// reread on every new session so edits to the file show up
    text_file: Option<PathBuf>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            text_file: None,
        }
    }

    pub fn with_text_file(mut self, path: Option<PathBuf>) -> Self {
        self.text_file = path;
        self
    }

    /// Translate a key press into session commands. Commands the session
    /// rejects in its current phase are dropped.
    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let phase = self.session.phase();

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('p') if ctrl => {
                if self.session.toggle_pause().is_ok() && self.session.phase() == Phase::Running {
                    Action::RestartClock
                } else {
                    Action::None
                }
            }
            KeyCode::Char('r') if ctrl => self.restart(),
            KeyCode::Left => self.restart(),
            KeyCode::Tab if phase == Phase::Idle => {
                let next = self.session.length().next();
                match self.session.configure_duration(next) {
                    Ok(()) => Action::SaveLength(next),
                    Err(_) => Action::None,
                }
            }
            KeyCode::Enter if phase == Phase::Idle => {
                self.session.start().ok();
                Action::RestartClock
            }
            KeyCode::Backspace => {
                let mut input = self.session.snapshot().input.to_string();
                input.pop();
                self.session.update_input(input).ok();
                Action::None
            }
            KeyCode::Char(' ') => {
                self.session.submit_word().ok();
                Action::None
            }
            KeyCode::Char('r') if phase == Phase::Finished => self.restart(),
            KeyCode::Char('n') if phase == Phase::Finished => {
                self.renew();
                Action::None
            }
            KeyCode::Char(c) if !ctrl => {
                // typing into an idle session starts it
                let action = if phase == Phase::Idle && self.session.start().is_ok() {
                    Action::RestartClock
                } else {
                    Action::None
                };
                let input = format!("{}{}", self.session.snapshot().input, c);
                self.session.update_input(input).ok();
                action
            }
            _ => Action::None,
        }
    }

    pub fn on_tick(&mut self) {
        self.session.tick().ok();
    }

    /// Back to the idle screen, picking up a fresh copy of the text file if
    /// there is one. An unreadable or empty file keeps the current text.
    fn renew(&mut self) {
        if let Some(path) = &self.text_file {
            match text::load(path).and_then(|t| self.session.reset_with_text(t)) {
                Ok(()) => return,
                Err(e) => warn!("keeping the current text: {}", e),
            }
        }
        self.session.reset();
    }

    fn restart(&mut self) -> Action {
        self.session.restart();
        Action::RestartClock
    }
}

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    // stderr belongs to the terminal UI
    let log_file = AppDirs::log_path().and_then(|path| {
        let parent = path.parent()?;
        fs::create_dir_all(parent).ok()?;
        File::options().create(true).append(true).open(path).ok()
    });
    match log_file {
        Some(file) => builder.target(env_logger::Target::Pipe(Box::new(file))),
        None => builder.target(env_logger::Target::Pipe(Box::new(io::sink()))),
    };

    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let config = store.load();
    let session = Session::new(cli.reference_text()?, cli.session_length(&config))
        .context("cannot build a typing session")?;
    let mut app = App::new(session).with_text_file(cli.file.clone());

    enable_raw_mode().context("cannot enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let outcome = start_tui(&mut terminal, &mut app, &mut runner, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    if cli.json && app.session.phase() == Phase::Finished {
        println!("{}", serde_json::to_string_pretty(&app.session.snapshot())?);
    }

    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
    store: &dyn ConfigStore,
) -> Result<()> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            TypingEvent::Tick => {
                if app.session.phase() == Phase::Running {
                    app.on_tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            TypingEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            TypingEvent::Key(key) => {
                match app.on_key(key) {
                    Action::Quit => break,
                    Action::RestartClock => runner.restart_clock(),
                    Action::SaveLength(length) => {
                        let cfg = Config {
                            session_length: length,
                        };
                        if let Err(e) = store.save(&cfg) {
                            warn!("cannot save config: {}", e);
                        }
                    }
                    Action::None => {}
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    info!("leaving in phase {}", app.session.phase());
    debug!("final state: {:?}", app.session.snapshot());
    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
