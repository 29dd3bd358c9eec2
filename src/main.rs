mod commands;
mod config;

use std::{
    env, fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context;
use commands::{Bridge, Command, Response};

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const WRITE_FLAG: &str = "--write";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut path: Option<PathBuf> = None;
    let mut write_back = false;
    for arg in env::args().skip(1) {
        if arg == WRITE_FLAG {
            write_back = true;
        } else if arg == "--version" {
            println!("richfind {}", APP_VERSION);
            return Ok(());
        } else {
            path = Some(PathBuf::from(arg));
        }
    }

    let app_config = config::AppConfig::load_or_create();
    let text = match &path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => String::new(),
    };

    let mut bridge = Bridge::new(app_config, &text);
    let mut dirty = false;
    log::info!(
        "richfind {} ready, {} characters loaded",
        APP_VERSION,
        bridge.document().char_count()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Command>(&line) {
            Ok(command) => {
                dirty |= command.mutates();
                bridge.dispatch(command)
            }
            Err(e) => Response::Error {
                message: format!("invalid command: {}", e),
            },
        };

        serde_json::to_writer(&mut stdout, &response).context("failed to write response")?;
        writeln!(stdout)?;
        stdout.flush()?;
    }

    if write_back && dirty {
        if let Some(path) = &path {
            fs::write(path, bridge.document().as_string())
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("saved {}", path.display());
        } else {
            log::warn!("{} given without a file, nothing saved", WRITE_FLAG);
        }
    }

    Ok(())
}
