use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs, io, path::PathBuf, time::Instant};

use quick_explorer::logic::layout::Size;
use quick_explorer::{log_debug, set_debug_mode};

/// Breadcrumb file browser with cascading folder menus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vault directory (default: `vault` from the config, else the current directory)
    vault: Option<String>,

    /// File to open at startup, as a path inside the vault
    #[arg(short, long)]
    file: Option<String>,

    /// Enable debug logging to the temp dir (quick-explorer-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,
}

mod app;
mod config;
mod handlers;
mod ui;

use app::App;
use config::Config;

/// Find the config file
///
/// An explicit path must exist; otherwise the platform config dir and then
/// `./config.yaml` are tried, and `None` means run on defaults.
fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    // Try ~/.config/quick-explorer/config.yaml
    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("quick-explorer").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }
    Ok(None)
}

fn load_config(path: &PathBuf) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    set_debug_mode(args.debug);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let config = match get_config_path(args.config)? {
        Some(path) => {
            log_debug(&format!("Using config file: {}", path.display()));
            load_config(&path)?
        }
        None => Config::default(),
    };
    let vault_dir = args
        .vault
        .or_else(|| config.vault.clone())
        .unwrap_or_else(|| ".".to_string());

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(&config, &vault_dir, Size::new(width as i32, height as i32))?;
    if let Some(file) = args.file.as_deref() {
        app.open_initial(file);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log_debug(&format!("Exited with error: {:?}", e));
    }
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        app.host.dismiss_stale_toast();

        if app.should_quit {
            app.shutdown();
            break;
        }

        // Let spawned preview reads make progress
        tokio::task::yield_now().await;
        app.process_background();

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => handlers::handle_key(app, key)?,
                Event::Mouse(mouse) => handlers::handle_mouse(app, mouse)?,
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
    Ok(())
}
