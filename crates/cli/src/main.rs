use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::color::{DecodeArgs, EncodeArgs};
use commands::find::FindArgs;
use commands::replace_all::ReplaceArgs;

#[derive(Parser)]
#[command(name = "richfind")]
#[command(about = "Formatting-aware find and replace tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Show version information
    #[command(name = "-version")]
    Version,

    /// Show help and available actions
    #[command(name = "-help")]
    Help,

    /// Search a text file and print every match with context
    #[command(name = "-find")]
    Find(FindArgs),

    /// Replace every match in a text file
    #[command(name = "-replace-all")]
    ReplaceAll(ReplaceArgs),

    /// Decode a native color value
    #[command(name = "-decode-color")]
    DecodeColor(DecodeArgs),

    /// Encode a hex or theme color as a native color value
    #[command(name = "-encode-color")]
    EncodeColor(EncodeArgs),

    /// List theme palette colors
    #[command(name = "-list-colors")]
    ListColors,

    /// Display current configuration
    #[command(name = "-show-config")]
    ShowConfig,

    /// Validate configuration file
    #[command(name = "-validate-config")]
    ValidateConfig,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.action {
        Some(Action::Version) => {
            commands::version::run();
            Ok(())
        }
        Some(Action::Help) => {
            commands::help::run();
            Ok(())
        }
        Some(Action::Find(args)) => commands::find::run(args),
        Some(Action::ReplaceAll(args)) => commands::replace_all::run(args),
        Some(Action::DecodeColor(args)) => commands::color::decode(args),
        Some(Action::EncodeColor(args)) => commands::color::encode(args),
        Some(Action::ListColors) => {
            commands::list_colors::run();
            Ok(())
        }
        Some(Action::ShowConfig) => {
            commands::show_config::run();
            Ok(())
        }
        Some(Action::ValidateConfig) => {
            commands::validate_config::run();
            Ok(())
        }
        None => {
            // No subcommand: show help
            commands::help::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
