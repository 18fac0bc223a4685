use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod app;
mod artifact_io;
mod commands;
mod completion;
mod config;
mod content;
mod default_config;
mod error;
mod events;
mod headless;
mod interpreter;
mod navigator;
mod preferences;
mod session;
mod text_layout;
mod theme;
mod ui;

use app::{App, PromptIdentity};
use config::AppConfig;
use content::Content;
use events::AppEvent;
use headless::HeadlessReport;
use interpreter::Interpreter;
use preferences::{PersistentThemeSwitcher, PreferenceStore};
use session::Session;
use theme::{ThemeCatalog, ThemeName};

/// Interactive portfolio terminal. Without `--exec` or `--script` it opens
/// the full-screen UI.
#[derive(Parser, Debug)]
#[command(name = "portfolio-terminal", version)]
struct Cli {
    /// Config file to use instead of ~/.portfolio-terminal/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Portfolio content dataset (TOML) replacing the embedded one
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Theme for this session; not saved as a preference
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Run a command headlessly (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,

    /// Run every line of a script file headlessly
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Print the headless result as JSON
    #[arg(long)]
    json: bool,

    /// Start with an empty scrollback
    #[arg(long)]
    no_welcome: bool,

    /// Increase stderr log verbosity in headless mode
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn is_headless(&self) -> bool {
        !self.exec.is_empty() || self.script.is_some()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let headless = cli.is_headless();

    let (config, config_error) =
        AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let state_dir = config
        .state_dir()
        .context("failed to resolve state directory")?;
    let _log_guard = init_tracing(&config, &state_dir, headless, cli.verbose);
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "failed to load user config, using defaults");
    }

    let content = load_content(&cli, &config)?;
    let store = PreferenceStore::new(&state_dir);
    let theme = resolve_theme(cli.theme.as_deref(), &store, &config)?;
    tracing::info!(%theme, headless, "starting portfolio terminal");

    let session = if cli.no_welcome {
        Session::without_welcome()
    } else {
        Session::default()
    };
    let interpreter = Interpreter::new(
        content,
        theme,
        Box::new(PersistentThemeSwitcher::new(store)),
    )
    .with_session(session);
    let identity = PromptIdentity {
        user: config.prompt.user.clone(),
        host: config.prompt.host.clone(),
    };

    if headless {
        return run_headless(&cli, interpreter, &identity);
    }

    let palettes = match config.palette_file().context("failed to resolve palette file")? {
        Some(path) => ThemeCatalog::load_or_builtin(path),
        None => ThemeCatalog::default(),
    };
    run_tui(App::new(interpreter, identity, palettes)).context("terminal UI failed")
}

fn load_content(cli: &Cli, config: &AppConfig) -> anyhow::Result<Content> {
    let path = match &cli.content {
        Some(path) => Some(path.clone()),
        None => config
            .content_path()
            .context("failed to resolve content path")?,
    };
    match path {
        Some(path) => Content::load(&path)
            .with_context(|| format!("failed to load content from {}", path.display())),
        None => Content::embedded().context("embedded content is invalid"),
    }
}

/// `--theme` wins, then the stored preference, then the config default.
fn resolve_theme(
    cli_theme: Option<&str>,
    store: &PreferenceStore,
    config: &AppConfig,
) -> anyhow::Result<ThemeName> {
    if let Some(raw) = cli_theme {
        return Ok(raw.parse::<ThemeName>()?);
    }
    Ok(store
        .stored_theme()
        .or_else(|| config.default_theme())
        .unwrap_or_default())
}

fn run_headless(
    cli: &Cli,
    mut interpreter: Interpreter,
    identity: &PromptIdentity,
) -> anyhow::Result<()> {
    let mut commands = cli.exec.clone();
    if let Some(script) = &cli.script {
        let lines = headless::load_script(script)
            .with_context(|| format!("failed to read script {}", script.display()))?;
        commands.extend(lines);
    }
    headless::run_commands(&mut interpreter, &commands);

    let output = if cli.json {
        headless::render_json(&HeadlessReport::from_interpreter(&interpreter))?
    } else {
        headless::render_plain(interpreter.scrollback(), identity)
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// File logging under `<state_dir>/logs`, plus stderr only when no TUI owns
/// the screen. `RUST_LOG` overrides the configured level.
fn init_tracing(
    config: &AppConfig,
    state_dir: &Path,
    headless: bool,
    verbose: u8,
) -> Option<WorkerGuard> {
    let log_dir = state_dir.join("logs");
    let (file_layer, guard) = match fs::create_dir_all(&log_dir)
        .map_err(anyhow::Error::from)
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("portfolio-terminal")
                .filename_suffix("log")
                .build(&log_dir)
                .map_err(anyhow::Error::from)
        }) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let stderr_layer = headless.then(|| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .with_filter(filter)
    });

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    guard
}

fn run_tui(app: App) -> io::Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::SteadyBar
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, &app))?;
        let event = events::next_event()?;
        if event == AppEvent::Quit {
            tracing::info!("quit requested");
        }
        app.handle_event(event);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/main_launch_tests.rs"]
mod launch_tests;
