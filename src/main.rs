use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use vodnav::config::DEFAULT_CONFIG_TOML;
use vodnav::{VodnavConfig, VodnavOrchestrator};

#[derive(Parser, Debug)]
#[command(name = "vodnav")]
#[command(about = "Navigation and status core for a game-session video browser")]
#[command(version)]
#[command(long_about = "Browses recorded game sessions by category, resolves which point of \
view to play when a category is entered, and merges recorder, microphone, crash, save and \
upgrade status into one view. Drive it from the terminal with 1-9, s, e, b, j, k, m and q.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vodnav.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Override the library directory from the configuration
    #[arg(long, value_name = "DIR", help = "Directory of video metadata sidecars")]
    library: Option<String>,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Dry run mode - load everything but don't enter the event loop
    #[arg(long, help = "Load configuration and library, print the initial view and exit")]
    dry_run: bool,

    /// Re-enter the category selected in the previous session
    #[arg(long, help = "Restore the persisted category instead of starting with none")]
    restore_category: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR", help = "Directory for rolling log files")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config();
        return Ok(());
    }

    let log_guard = init_logging(&args)?;

    info!("Starting vodnav v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let mut config = match VodnavConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(library) = &args.library {
        config.library.path = library.clone();
    }

    match config.validate() {
        Ok(()) if args.validate_config => {
            info!("Configuration validation successful");
            println!("✓ Configuration is valid");
            return Ok(());
        }
        Ok(()) => {}
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            eprintln!("✗ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    }

    let mut orchestrator = VodnavOrchestrator::from_config(config).await.map_err(|e| {
        error!("Failed to create orchestrator: {}", e);
        e
    })?;

    if args.dry_run {
        orchestrator.set_keyboard_enabled(false);
    }

    orchestrator.initialize().await.map_err(|e| {
        error!("Failed to initialize: {}", e);
        e
    })?;

    if args.restore_category {
        orchestrator.restore_persisted_category();
    }

    if args.dry_run {
        info!("Dry run mode - not entering the event loop");
        println!("{}", orchestrator.view_model().summary());
        orchestrator.flush_settings().await?;
        println!("✓ Dry run completed successfully");
        return Ok(());
    }

    // Log-based front end: one line per published view
    let mut views = orchestrator.subscribe_view();
    let renderer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let summary = views.borrow_and_update().summary();
            print!("{}\r\n", summary);
        }
    });

    orchestrator.start().await.map_err(|e| {
        error!("Failed to start: {}", e);
        e
    })?;

    let exit_code = orchestrator.run().await.map_err(|e| {
        error!("Error during execution: {}", e);
        e
    })?;

    renderer.abort();
    info!("Vodnav exited with code: {}", exit_code);

    drop(log_guard);
    std::process::exit(exit_code);
}

fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vodnav={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_target(true)
                .with_thread_ids(args.debug)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .boxed()
        }
    };

    let (file_layer, guard) = match &args.log_file {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "vodnav.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(file_layer)
        .with(env_filter)
        .init();

    Ok(guard)
}

/// Print default configuration in TOML format
fn print_default_config() {
    println!("# Vodnav Configuration File");
    println!("# This is the default configuration with all available options");
    println!();
    println!("{}", DEFAULT_CONFIG_TOML);
}
