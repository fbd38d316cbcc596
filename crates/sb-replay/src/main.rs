//! Sketchboard replay — draw a gesture script headlessly and save the PNG.
//!
//! ```text
//! sb-replay <script.json> [--out <file.png>]
//! ```
//!
//! Without `--out` the image is written to the current directory under
//! the timestamped export name. Set `RUST_LOG=debug` to trace gestures.

mod script;

use sb_core::PixmapSurface;
use sb_editor::{Board, current_export_file_name};
use script::{ReplayError, Script};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(script_path) = args.get(1).filter(|a| !a.starts_with("--")) else {
        eprintln!("usage: sb-replay <script.json> [--out <file.png>]");
        std::process::exit(2);
    };
    let out = match args.get(2).map(|s| s.as_str()) {
        Some("--out") => match args.get(3) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                eprintln!("sb-replay: --out needs a path");
                std::process::exit(2);
            }
        },
        Some(other) => {
            eprintln!("sb-replay: unexpected argument '{other}'");
            std::process::exit(2);
        }
        None => None,
    };

    match run(script_path, out) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("sb-replay error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(script_path: &str, out: Option<PathBuf>) -> Result<PathBuf, ReplayError> {
    let text = std::fs::read_to_string(script_path)?;
    let script = Script::from_json(&text)?;
    log::info!(
        "replaying {} steps on {}x{}",
        script.steps.len(),
        script.config.width,
        script.config.height
    );

    let surface = PixmapSurface::new(script.config.width, script.config.height)?;
    let mut board = Board::new(surface, script.config.clone());
    script.play(&mut board)?;

    let out = out.unwrap_or_else(|| PathBuf::from(current_export_file_name()));
    let png = board.into_surface().encode_png()?;
    std::fs::write(&out, png)?;
    log::info!("wrote {}", out.display());
    Ok(out)
}
