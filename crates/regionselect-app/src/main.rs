//! Replay entry point (native).

use regionselect_app::{load_script, replay};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "native")]
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: regionselect <script.json>");
        return ExitCode::from(2);
    };
    log::info!("Replaying {}", path.display());

    let report = match load_script(&path).and_then(|script| replay(&script)) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Replay of {} failed: {}", path.display(), e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
