use clap::{Parser, Subcommand};
use log::log;

use crate::engine::{Advance, PlayMode, PlayerEngine};
use crate::error::PlayerError;

/// MP3 Folder Player CLI
#[derive(Parser)]
#[command(name = "mp3player")]
#[command(about = "A CLI MP3 folder player with play modes and automatic track advancement")]
#[command(version = "0.1.0")]
pub struct CliApp {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// List MP3 files in the music folder
    List,
    /// Play a specific MP3 file from the music folder
    Play {
        /// File name to play (e.g. "song.mp3")
        filename: String,
    },
    /// Build a playlist from the whole folder and start playing
    #[command(name = "playall")]
    PlayAll {
        /// Shuffle the playlist order
        #[arg(long)]
        shuffle: bool,
    },
    /// Set the play mode (sequential, shuffle, repeat_all, repeat_one)
    Mode {
        /// Mode name
        mode: String,
    },
    /// Advance to the next track in the playlist
    Next,
    /// Go back to the previous track in the playlist
    #[command(alias = "previous")]
    Prev,
    /// Stop the currently playing music
    Stop,
    /// Show current playback status
    Status,
}

impl CliApp {
    /// Parse command line arguments
    pub fn parse() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Parse command from string (for interactive mode)
    pub fn parse_command(input: &str) -> Result<Commands, ParseError> {
        let args: Vec<&str> = input.trim().split_whitespace().collect();
        if args.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        match args[0] {
            "list" => Ok(Commands::List),
            "play" => {
                if args.len() > 1 {
                    Ok(Commands::Play {
                        filename: args[1..].join(" "),
                    })
                } else {
                    Err(ParseError::MissingArgument {
                        command: "play".to_string(),
                        argument: "filename".to_string(),
                    })
                }
            }
            "playall" => {
                let shuffle = args.get(1).map(|a| *a == "shuffle").unwrap_or(false);
                if args.len() > 1 && !shuffle {
                    return Err(ParseError::InvalidArgument {
                        argument: "playall option".to_string(),
                        value: args[1].to_string(),
                        expected: "shuffle".to_string(),
                    });
                }
                Ok(Commands::PlayAll { shuffle })
            }
            "mode" => {
                if args.len() > 1 {
                    Ok(Commands::Mode {
                        mode: args[1].to_string(),
                    })
                } else {
                    Err(ParseError::MissingArgument {
                        command: "mode".to_string(),
                        argument: "mode".to_string(),
                    })
                }
            }
            "next" => Ok(Commands::Next),
            "prev" | "previous" => Ok(Commands::Prev),
            "stop" => Ok(Commands::Stop),
            "status" => Ok(Commands::Status),
            "help" => Err(ParseError::HelpRequested),
            _ => Err(ParseError::UnknownCommand {
                command: args[0].to_string(),
            }),
        }
    }

    /// Display help information
    pub fn display_help() {
        println!("MP3 Folder Player - Available Commands:");
        println!();
        println!("Playback Control:");
        println!("  play <file>       - Play a specific MP3 file");
        println!("  playall [shuffle] - Build a playlist from the folder and play it");
        println!("  stop              - Stop playback");
        println!("  next              - Next track");
        println!("  prev              - Previous track");
        println!();
        println!("Playlist:");
        println!("  mode <m>          - Set play mode (sequential, shuffle, repeat_all, repeat_one)");
        println!();
        println!("Information:");
        println!("  list              - List MP3 files in the music folder");
        println!("  status            - Show playback status");
        println!();
        println!("General:");
        println!("  help              - Show this help message");
        println!("  exit, quit        - Exit the player");
    }
}

/// Execute one caller-facing operation against the engine and render the
/// result as plain text. This is the error boundary: every failure becomes
/// descriptive text and nothing propagates as process-fatal.
pub fn dispatch(engine: &mut PlayerEngine, command: Commands) -> String {
    let result: Result<String, PlayerError> = match command {
        Commands::List => engine
            .list_files()
            .map(render_file_list)
            .map_err(PlayerError::from),
        Commands::Play { filename } => engine
            .play_file(&filename)
            .map(|name| format!("Now playing: {}", name)),
        Commands::PlayAll { shuffle } => engine
            .build_playlist(shuffle)
            .and_then(|_| engine.play_at(0))
            .map(|name| format!("Now playing: {}", name)),
        Commands::Mode { mode } => match mode.parse::<PlayMode>() {
            Ok(mode) => {
                engine.set_mode(mode);
                Ok(format!("Play mode set to: {}", mode.as_str()))
            }
            Err(e) => Err(e.into()),
        },
        Commands::Next => engine.advance_to_next().map(render_advance),
        Commands::Prev => engine.advance_to_previous().map(render_advance),
        Commands::Stop => engine
            .stop()
            .map(|file| format!("Stopped playback: {}", file)),
        Commands::Status => Ok(engine.status()),
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            log!(e.severity().log_level(), "{}", e);
            e.user_message()
        }
    }
}

fn render_file_list(files: Vec<String>) -> String {
    if files.is_empty() {
        return "No MP3 files found in the music folder".to_string();
    }
    let lines: Vec<String> = files.iter().map(|f| format!("- {}", f)).collect();
    format!("MP3 Files:\n{}", lines.join("\n"))
}

fn render_advance(advance: Advance) -> String {
    match advance {
        Advance::Playing(name) => format!("Now playing: {}", name),
        Advance::EndOfPlaylist => "End of playlist".to_string(),
        Advance::BeginningOfPlaylist => "Beginning of playlist".to_string(),
    }
}

/// Command parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Missing argument for {command}: {argument}")]
    MissingArgument { command: String, argument: String },

    #[error("Invalid argument {argument}: got '{value}', expected {expected}")]
    InvalidArgument {
        argument: String,
        value: String,
        expected: String,
    },

    #[error("Help requested")]
    HelpRequested,
}
