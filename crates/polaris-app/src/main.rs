use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use polaris_config::Config;
use polaris_ocr::HotkeyManager;
use polaris_types::AppEvent;
use tokio::task::JoinSet;

mod controller;
mod events;
mod io;
mod logging;
mod profile;
mod state;
mod tray;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::profile::ProfileStore;
use self::state::AppState;
use self::tray::AppTray;

/// How long background tasks get to wind down after the UI closes
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(name = "polaris", version, about = "Translate Japanese text from the clipboard or the screen")]
struct Cli {
    /// Profile to load from the user config folder
    #[arg(long, default_value = profile::MAIN_PROFILE)]
    profile: String,

    /// Write logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Do not watch the clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Do not register the screen capture hotkey
    #[arg(long)]
    no_ocr: bool,

    /// Create a profile named NAME from the main profile and exit
    #[arg(long, value_name = "NAME")]
    new_profile: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.log_json)?;

    if let Some(name) = &cli.new_profile {
        let store = ProfileStore::user()?;
        store.init()?;
        let file = store.add_from_main(name)?;
        println!("{}", file.display());
        return Ok(());
    }

    let config = load_config(&cli)?;
    tracing::info!(
        "Starting Polaris (profile {}, {} -> {})",
        cli.profile,
        config.translator.source_lang,
        config.translator.target_lang
    );

    // Slint owns the main thread, the backend runs on the runtime's workers
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("polaris-worker")
        .build()?;
    let guard = runtime.enter();

    let state = Arc::new(AppState::new(config)?);
    let (backend, ui_endpoint) = polaris_core::ipc::relay();

    // Registered on the main thread so the OS delivers hotkey messages here
    let hotkey = if state.config.ocr.enabled {
        match HotkeyManager::new(&state.config.ocr.hotkey) {
            Ok(manager) => Some(manager),
            Err(e) => {
                tracing::error!("Screen OCR disabled: {e:#}");
                None
            }
        }
    } else {
        tracing::info!("Screen OCR disabled");
        None
    };

    // Same thread requirement as the hotkey; the app still runs without one
    let tray = match AppTray::new() {
        Ok(tray) => Some(tray),
        Err(e) => {
            tracing::warn!("No tray icon: {e:#}");
            None
        }
    };

    let controller = AppController::new(state.clone(), backend.clone());
    let tasks = controller.spawn_tasks(
        hotkey.as_ref().map(HotkeyManager::listener),
        tray.as_ref().map(AppTray::listener),
    );

    {
        let pusher = backend.pusher();
        let cancel = controller.cancel_token();
        runtime.spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::error!("Failed to listen for Ctrl+C: {e}");
                        return;
                    }
                    tracing::info!("Shutdown requested");
                    pusher.push(AppEvent::Quit).await.ok();
                    cancel.cancel();
                }
                _ = cancel.cancelled() => {}
            }
        });
    }
    drop(backend);

    let ui_result = polaris_ui::run_ui(ui_endpoint, state.config.window.clone());
    if let Err(e) = &ui_result {
        tracing::error!("UI exited with error: {e:#}");
    }

    controller.shutdown();
    runtime.block_on(join_tasks(tasks));
    drop(hotkey);
    drop(tray);
    drop(guard);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    tracing::info!("Polaris stopped");
    ui_result
}

/// Profile from the user folder, then environment and command line
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match ProfileStore::user().and_then(|store| {
        store.init()?;
        store.load(&cli.profile)
    }) {
        Ok(mut config) => {
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        Err(e) => {
            tracing::warn!("Profiles unavailable, using defaults: {e:#}");
            Config::new()
        }
    };

    if cli.no_clipboard {
        config.clipboard.enabled = false;
    }
    if cli.no_ocr {
        config.ocr.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

async fn join_tasks(mut tasks: JoinSet<anyhow::Result<()>>) {
    let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!("Tasks still running after {SHUTDOWN_GRACE:?}, aborting");
        tasks.abort_all();
    }
}
