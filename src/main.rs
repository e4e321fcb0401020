//! spr entry point
//!
//! Loads config and text, then hands a playback controller to the terminal UI.

use clap::Parser;
use log::{debug, error, info, warn};
use spr::cli::Args;
use spr::engine::config::Config;
use spr::input::{self, Source};
use spr::playback::{PlaybackController, PlaybackState};
use spr::rendering::CellRenderer;
use spr::session::{LastPosition, SessionStore};
use spr::ui::{CommandQueue, ExitReason, LogPause, Theme, TuiManager};
use spr::{Result, SprError};
use std::fs::{self, OpenOptions};
use std::process::ExitCode;
use std::time::Instant;

const LOG_FILE: &str = "spr.log";

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("spr: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug_mode: bool) {
    if !debug_mode {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
        return;
    }

    let log_path = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("spr"))
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join(LOG_FILE)));

    match log_path.map(|path| OpenOptions::new().create(true).append(true).open(path)) {
        Some(Ok(log_file)) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
            info!("spr version {} starting (debug mode)", spr::VERSION);
        }
        Some(Err(e)) => {
            eprintln!("Warning: failed to open {} for debug logging: {}", LOG_FILE, e);
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .init();
        }
        None => {
            eprintln!("Warning: no state directory for {}", LOG_FILE);
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .init();
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply_to(&mut config)?;

    let source = args.resolve_source()?;
    let loaded = input::load(&source)?;

    let mut controller = PlaybackController::new(CellRenderer::new(), config.timing.clone());
    controller.load_text(&loaded.text)?;

    let session = match (&source, &loaded.path) {
        (Source::File(_), Some(path)) => SessionStore::open_default().map(|store| (store, path)),
        _ => None,
    };

    if args.resume {
        resume(&mut controller, session.as_ref().map(|(store, path)| (store, path.as_path())))?;
    }

    if !args.paused {
        controller.play(Instant::now())?;
    }

    let queue = CommandQueue::spawn(config.timing.clone())?;
    let reason = {
        // Without --debug, records go to stderr, which the TUI is drawing over
        let _log_pause = (!args.debug).then(LogPause::new);
        let mut tui = TuiManager::new(
            Theme::from_config(&config.theme),
            config.display.clone(),
            loaded.label.clone(),
        )?;
        tui.run(&mut controller, &queue, args.auto_exit)?
    };
    drop(queue);
    debug!("Reader exited: {:?}", reason);

    if let Some((store, path)) = session {
        // A finished book restarts from the top next time
        let cursor = match (reason, controller.state()) {
            (ExitReason::Finished, _) | (_, PlaybackState::Finished) => -1,
            _ => controller.cursor(),
        };
        let position = LastPosition {
            path: path.clone(),
            cursor,
        };
        if let Err(e) = store.save(&position) {
            warn!("Could not save session: {}", e);
        }
    }
    Ok(())
}

fn resume(
    controller: &mut PlaybackController<CellRenderer>,
    session: Option<(&SessionStore, &std::path::Path)>,
) -> Result<()> {
    let Some((store, path)) = session else {
        warn!("--resume only applies to file sources");
        return Ok(());
    };
    match store.resume_cursor(path) {
        Ok(Some(cursor)) => {
            controller.seek(cursor + 1, Instant::now())?;
            let frame = controller.current_frame();
            controller.renderer_mut().preview(frame);
            info!("Resumed {} at unit {}", path.display(), controller.cursor());
        }
        Ok(None) => debug!("No saved position for {}", path.display()),
        Err(SprError::Io(e)) => warn!("Could not read session: {}", e),
        Err(e) => return Err(e),
    }
    Ok(())
}
