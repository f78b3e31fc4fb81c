use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use env_logger::{Env, Target};

use bouquet::{
    config::GardenConfig,
    engine::{Engine, message::CannedMessages, palette::PALETTES, source::GardenScript},
    player::Player,
    renderer::export,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "bouquet [play]";
const RENDER_USAGE: &str = "bouquet render <script.json> <output.png>";
const VARIETIES_USAGE: &str = "bouquet varieties";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None | Some("play") => play(),
        Some("render") => {
            let script_path = args.next().context(RENDER_USAGE)?;
            let output_path = args.next().context(RENDER_USAGE)?;
            render(&script_path, &output_path)
        }
        Some("varieties") => {
            varieties();
            Ok(())
        }
        _ => bail!(
            "Bouquet: plant a garden, wrap it up\n\nUsage:\n  {PLAY_USAGE}\n  {RENDER_USAGE}\n  {VARIETIES_USAGE}"
        ),
    }
}

/// The interactive screen owns the terminal, so logs only go to a file.
fn init_file_logging(config: &GardenConfig) -> Result<()> {
    let path = std::env::var_os("BOUQUET_LOG")
        .map(PathBuf::from)
        .or_else(|| config.log_file.clone());
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("Failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn play() -> Result<()> {
    let config = GardenConfig::load();
    init_file_logging(&config)?;

    let (cols, rows) = crossterm::terminal::size()?;
    let provider = Arc::new(CannedMessages::new(config.message_delay()));
    let mut player = Player::new(config, provider, Player::canvas_grid(cols, rows));
    player.play()
}

fn render(script_path: &str, output_path: &str) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = GardenConfig::load();

    let json =
        fs::read_to_string(script_path).with_context(|| format!("Failed to read {script_path}"))?;
    let script: GardenScript =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {script_path}"))?;

    let garden = Engine::simulate(&script)?;
    let canvas = export::render_image(&garden, config.supersample)?;
    export::write_png(&canvas, Path::new(output_path))
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Rendered {} flowers ({}x{}) from {} -> {}",
        garden.flowers().len(),
        canvas.width(),
        canvas.height(),
        script_path,
        output_path,
    );

    Ok(())
}

fn varieties() {
    for (i, palette) in PALETTES.iter().enumerate() {
        let class = if palette.is_core() { "core" } else { "filler" };
        println!("{}  {:<14} {:<10} {class}", i + 1, palette.name, palette.shape.as_str());
    }
}
