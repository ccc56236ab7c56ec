use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use speedtrain::{
    app::App,
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    driver::Driver,
    runtime::{CrosstermInput, FixedTicker},
    text_source::TextLibrary,
    ui::TerminalPainter,
};

const LOG_ENV: &str = "SPEEDTRAIN_LOG";

/// terminal typing trainer with live symbols-per-minute and a running-line mode
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// directory holding text_0..text_9 and long_text
    #[clap(long)]
    sources: Option<PathBuf>,

    /// pause between frames in milliseconds when no key is pending
    #[clap(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags override whatever the config file says
    fn apply(&self, mut config: Config) -> Config {
        if let Some(ref sources) = self.sources {
            config.sources_dir = sources.clone();
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_interval_ms = frame_ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match self.config {
            Some(ref path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn init_logging() {
    let Some(log_path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let config = cli.apply(cli.config_store().load());
    info!(?config, "speedtrain starting");

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut driver = Driver::new(
        CrosstermInput::new(),
        SystemClock::new(),
        TerminalPainter::new(terminal),
        FixedTicker::new(config.frame_interval()),
    );
    let mut app = App::new(TextLibrary::new(&config.sources_dir), rand::thread_rng());
    let result = app.run(&mut driver);

    // Restore the terminal before reporting anything.
    disable_raw_mode()?;
    let terminal = driver.painter_mut().terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        error!(%err, "speedtrain stopped");
    }
    result.with_context(|| {
        format!(
            "session failed (text sources in {})",
            config.sources_dir.display()
        )
    })
}
