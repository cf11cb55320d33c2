//! Farmstand TUI - terminal dashboard for inventory and the customer queue
//!
//! Run: cargo run -p farmstand-tui

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use farmstand_client::{ClientConfig, StoreClient, StoreSync};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod ui;

use app::App;

/// Dashboard over the remote store REST API
#[derive(Debug, Parser)]
#[command(name = "farmstand-tui", about = "Inventory & customer queue dashboard")]
struct Args {
    /// Remote store base URL
    #[arg(long, env = "FARMSTAND_API_BASE", default_value = farmstand_client::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FARMSTAND_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Directory for rolling log files
    #[arg(long, env = "FARMSTAND_LOG_DIR", default_value = "logs")]
    log_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _guard = init_tracing(&args.log_dir)?;

    std::panic::set_hook(Box::new(|info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        eprintln!("{info}");
        tracing::error!(target: "panic", "{}", info);
    }));

    // Configuration is read once here and handed to the client; nothing
    // downstream touches the environment.
    let config = ClientConfig::new(&args.base_url).with_timeout(args.timeout);
    let client = StoreClient::new(&config)?;
    let mut app = App::new(StoreSync::new(client), args.base_url.clone());

    tracing::info!(base_url = %args.base_url, "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn init_tracing(log_dir: &str) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "farmstand-tui.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,farmstand_client=debug"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .init();

    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    Ok(guard)
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key).await;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
