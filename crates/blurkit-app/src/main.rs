mod app_state;
mod cli;
mod crash;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use blurkit_config::schema::BlurkitConfig;
use blurkit_supervisor::ExitTrigger;

const DEFAULT_LOG_DIRECTIVE: &str = "blurkit=info";

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        eprintln!("Invalid log filter {directive:?}, using {DEFAULT_LOG_DIRECTIVE}");
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

/// Write the commented default config to `path`, or the platform default.
fn write_default_config(path: Option<&Path>) -> blurkit_common::Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => blurkit_config::toml_loader::default_config_path()?,
    };
    blurkit_config::toml_loader::create_default_config(&path)?;
    Ok(path)
}

fn main() -> ExitCode {
    crash::install_panic_hook();

    let args = cli::parse();
    if args.init_config {
        return match write_default_config(args.config.as_deref()) {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    // Config decides the default log level, so load it before logging is up
    // and report the outcome afterwards.
    let loaded = blurkit_config::load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref().unwrap_or(level.directive()));

    tracing::info!("BlurkitTool shell v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            BlurkitConfig::default()
        }
    };
    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    if args.print_config {
        println!("{}", blurkit_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let mut app = app_state::BlurkitApp::new(config);

    // The worker gets a head start while the window is being created.
    app.start_worker();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            app.shutdown(ExitTrigger::StartupFailed);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }

    app.shutdown(ExitTrigger::HostExit);
    tracing::info!("Exiting");
    ExitCode::SUCCESS
}
