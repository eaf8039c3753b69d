mod catalog;
mod cli;
mod config;
mod engine;
mod error;
mod logging;
mod playback;
mod poller;


use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{error, info, warn};

use catalog::Catalog;
use cli::{CliApp, Commands, ParseError};
use config::ConfigManager;
use engine::PlayerEngine;
use error::PlayerError;
use playback::RodioDevice;
use poller::AutoAdvancePoller;

/// Main application controller that coordinates all components
pub struct AppController {
    engine: Arc<Mutex<PlayerEngine>>,
    poller: AutoAdvancePoller,
    // Dropping the output stream silences every sink, so it lives here on
    // the main thread for the life of the application.
    _stream: rodio::OutputStream,
}

impl AppController {
    /// Create a new application controller
    pub fn new() -> Result<Self, PlayerError> {
        let config_manager = ConfigManager::new()?;
        let folder = config_manager.resolve_music_folder();

        match &folder {
            None => {
                warn!("no music folder configured");
                eprintln!("Warning: MUSIC_FOLDER environment variable not set");
                eprintln!("Playback commands will fail until a music folder is configured");
            }
            Some(path) if !path.is_dir() => {
                warn!("configured music folder does not exist: {}", path.display());
                eprintln!("Warning: music folder does not exist: {}", path.display());
            }
            Some(path) => info!("using music folder {}", path.display()),
        }

        let stream = playback::open_output_stream()?;
        let device = RodioDevice::new(stream.mixer().clone());
        let engine = Arc::new(Mutex::new(PlayerEngine::new(
            Catalog::new(folder),
            Box::new(device),
        )));
        let poll_interval =
            Duration::from_millis(config_manager.get_config().poll_interval_ms);

        info!("application controller initialized");

        Ok(Self {
            engine,
            poller: AutoAdvancePoller::new(poll_interval),
            _stream: stream,
        })
    }

    /// Start the auto-advance poller (idempotent)
    pub fn start_poller(&mut self) {
        self.poller.start(self.engine.clone());
    }

    /// Execute a single command, returning its text result. Errors are
    /// rendered as text at the dispatch boundary and never escape.
    pub fn execute_command(&self, command: Commands) -> String {
        let mut engine = self.engine.lock().unwrap();
        cli::dispatch(&mut engine, command)
    }

    /// Run interactive mode
    pub async fn run_interactive_mode(&mut self) -> Result<(), PlayerError> {
        println!("MP3 Folder Player v0.1.0");
        println!("Type 'help' for available commands, 'exit' or 'quit' to quit.");
        println!();

        // Graceful shutdown on Ctrl-C
        let shutdown_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let shutdown_flag_clone = shutdown_flag.clone();
        ctrlc::set_handler(move || {
            println!("\nReceived interrupt signal. Shutting down gracefully...");
            shutdown_flag_clone.store(true, std::sync::atomic::Ordering::Relaxed);
        })
        .expect("Error setting Ctrl-C handler");

        // Non-blocking input via a dedicated stdin thread
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut line = String::new();
            loop {
                line.clear();
                match stdin.read_line(&mut line) {
                    Ok(0) | Err(_) => {
                        // EOF or read failure closes the channel
                        break;
                    }
                    Ok(_) => {
                        if tx.send(line.trim().to_string()).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let mut interval = tokio::time::interval(Duration::from_millis(100));
        let mut awaiting_input = false;

        loop {
            if shutdown_flag.load(std::sync::atomic::Ordering::Relaxed) {
                break;
            }

            if !awaiting_input {
                print!("> ");
                let _ = std::io::Write::flush(&mut std::io::stdout());
                awaiting_input = true;
            }

            tokio::select! {
                biased;

                line = rx.recv() => {
                    awaiting_input = false;
                    match line {
                        Some(line) => {
                            if line.is_empty() {
                                continue;
                            }
                            if line == "exit" || line == "quit" {
                                println!("Goodbye!");
                                break;
                            }
                            match CliApp::parse_command(&line) {
                                Ok(command) => {
                                    println!("{}", self.execute_command(command));
                                }
                                Err(ParseError::HelpRequested) => {
                                    CliApp::display_help();
                                }
                                Err(e) => {
                                    eprintln!("Error: {}", e);
                                    println!("Type 'help' for available commands.");
                                }
                            }
                        }
                        None => {
                            // stdin closed
                            println!();
                            break;
                        }
                    }
                }

                // Keep the shutdown flag responsive while idle
                _ = interval.tick() => {}
            }
        }

        println!("Shutting down...");
        self.shutdown();
        println!("Shutdown complete.");
        Ok(())
    }

    /// Stop the poller and any active playback
    pub fn shutdown(&mut self) {
        self.poller.stop();
        let mut engine = self.engine.lock().unwrap();
        if let Err(e) = engine.stop() {
            // NotPlaying here just means there was nothing to stop.
            info!("shutdown: {}", e);
        }
    }
}

#[tokio::main]
async fn main() {
    if std::env::var("MP3_PLAYER_LOG_LEVEL").is_err() {
        std::env::set_var("MP3_PLAYER_LOG_LEVEL", "warn");
    }
    if let Err(e) = logging::init() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mut app = match AppController::new() {
        Ok(app) => app,
        Err(e) => {
            error!("failed to initialize application: {}", e);
            eprintln!("Failed to initialize application: {}", e.user_message());
            std::process::exit(1);
        }
    };

    app.start_poller();

    let cli = CliApp::parse();
    match cli.command {
        Some(command) => {
            // Single command mode: every result, error included, is plain text.
            println!("{}", app.execute_command(command));
            app.shutdown();
        }
        None => {
            if let Err(e) = app.run_interactive_mode().await {
                error!("interactive mode failed: {}", e);
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        }
    }

    info!("application shutdown complete");
}
