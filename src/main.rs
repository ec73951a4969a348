use anyhow::{Context, Result};
use clap::Parser;
use fambridge::cli::Cli;
use fambridge::config::{Config, DelayConfig};
use fambridge::flow::RandomCodeSource;
use fambridge::styles::{init_theme, ThemeType};
use fambridge::tasks::{InstantScheduler, Scheduler, TokioScheduler};
use fambridge::tui::Tui;
use fambridge::utils::{get_config_path, get_log_dir, get_log_path, LOG_FILE_NAME};
use fambridge::App;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    if cli.command.is_some() {
        let result = cli.execute();
        drop(guard);
        return result;
    }

    let result = run_tui(&cli);

    // Restore terminal state on normal exit
    // (panic hook handles panics)
    drop(guard);

    result
}

fn run_tui(cli: &Cli) -> Result<()> {
    let config_path = get_config_path();
    let config = Config::load_or_create(&config_path)?;
    for binding in config.keymap.invalid_overrides() {
        warn!("Ignoring keymap override with invalid key {:?}", binding.key);
    }

    let theme = match &cli.theme {
        Some(name) => name.parse::<ThemeType>().unwrap_or(ThemeType::Dark),
        None => config.theme_type(),
    };
    init_theme(theme);

    // Print log location before TUI starts (this will be visible briefly)
    eprintln!("Logs are being written to: {:?}", get_log_path());

    // Owns the timer tasks; must outlive the scheduler
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let (scheduler, delays): (Box<dyn Scheduler>, DelayConfig) = if cli.instant {
        (Box::new(InstantScheduler::new()), DelayConfig::instant())
    } else {
        (
            Box::new(TokioScheduler::new(runtime.handle().clone())),
            config.delays.clone(),
        )
    };

    info!("Launching TUI (theme {:?}, instant: {})", theme, cli.instant);
    let mut app = App::new(config, scheduler, Box::new(RandomCodeSource::new()))
        .with_delays(delays)
        .with_config_path(config_path);
    let mut tui = Tui::new()?;
    let result = app.run(&mut tui);
    drop(app);
    drop(runtime);
    result
}
