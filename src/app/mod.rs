//! Interactive shell hosting the session. Stands in for the surrounding
//! application: it owns the router, renders toasts to the terminal, and turns
//! terminal input into activity signals.

pub mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    notify::ConsoleToasts,
    routing::{AuthPath, Router, RouterEvent},
    session::{monitor::IdleMonitor, spawn_autostart},
    signals::{hub::ActivityHub, ActivityKind, SignalSource},
    utils::{
        clock::{Clock, DefaultClock},
        dir::default_app_dir,
        logging::{enable_logging, SHELL_PREFIX},
    },
};

use config::load_config;

const HOME_URL: &str = "/dashboard";
const NAV_COMMAND: &str = ":nav ";

#[derive(Parser, Debug)]
#[command(name = "idlewatch", version)]
#[command(about = "Session idle tracking with forced sign-out", long_about = None)]
struct Args {
    #[arg(long, help = "Idle timeout in seconds. Overrides the config file")]
    timeout: Option<u32>,
    #[arg(
        long,
        help = "Config file. Defaults to config.json in the application directory"
    )]
    config: Option<PathBuf>,
    #[arg(long = "log-filter")]
    log: Option<LevelFilter>,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    log_console: bool,
}

/// Runs the shell until the session signs out or the user leaves. Every stdin
/// line counts as activity, `:nav <path>` navigates, `:quit` exits.
pub async fn run_shell() -> Result<()> {
    let args = Args::parse();
    let app_dir = default_app_dir()?;
    enable_logging(SHELL_PREFIX, &app_dir, args.log, args.log_console)?;

    let config_path = args
        .config
        .unwrap_or_else(|| app_dir.join("config.json"));
    let config = load_config(&config_path)?;
    let idle_timeout = args.timeout.unwrap_or(config.idle_timeout);

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let router = Arc::new(Router::new());
    let signals = Arc::new(ActivityHub::new(Arc::clone(&clock)));
    let monitor = IdleMonitor::new(
        Arc::clone(&router),
        Arc::clone(&signals),
        Arc::new(ConsoleToasts),
        clock,
        idle_timeout,
    );
    let _autostart = spawn_autostart(&monitor);

    let mut router_events = router.events();
    router.navigate_by_url(HOME_URL);
    info!("session shell ready, idle timeout {idle_timeout}s");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = router_events.recv() => {
                if matches!(
                    event,
                    Ok(RouterEvent::NavigationEnd { ref url }) if url == AuthPath::SignOut.as_str()
                ) {
                    println!("signed out");
                    break;
                }
            }
            line = lines.next_line() => match line? {
                None => break,
                Some(line) if line == ":quit" => break,
                Some(line) if line.starts_with(NAV_COMMAND) => {
                    router.navigate_by_url(line[NAV_COMMAND.len()..].trim());
                }
                Some(_) => signals.emit(SignalSource::Document, ActivityKind::KeyUp),
            },
        }
    }

    monitor.stop();
    Ok(())
}
