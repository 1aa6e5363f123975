//! `scribble`: command-line host for the drawing engine and the animation sandbox.

mod drawing;
mod routine_file;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use canvas::engine::Engine;
use canvas::summary::summarize;
use canvas::surface::SurfaceError;
use clap::{Args, Parser, Subcommand};
use sandbox::compile::compile;
use sandbox::config::AnimatorConfig;
use sandbox::error::{AnimationError, ConfigError, ErrorCode};
use sandbox::player::{Animator, Phase, Tick};

use crate::routine_file::FileGenerator;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid drawing JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("invalid animation config: {0}")]
    Config(#[from] ConfigError),
    #[error("{code}: {0}", code = .0.error_code())]
    Animation(#[from] AnimationError),
    #[error("animation ended in error: {code}: {message}")]
    AnimationEnded { code: &'static str, message: String },
    #[error("--fps must be positive, got {0}")]
    InvalidFps(f64),
}

#[derive(Parser, Debug)]
#[command(name = "scribble", about = "Stroke drawing renderer and animation sandbox")]
struct Cli {
    /// Canvas width in pixels.
    #[arg(long, env = "SCRIBBLE_WIDTH", default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, env = "SCRIBBLE_HEIGHT", default_value_t = 600)]
    height: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a drawing to a PNG snapshot.
    Render {
        #[arg(long)]
        drawing: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the stroke summary sent with generation requests.
    Summary {
        #[arg(long)]
        drawing: PathBuf,
    },
    /// Extract, scan, and compile a routine without running it.
    Check {
        #[arg(long)]
        routine: PathBuf,
    },
    /// Play a routine over a drawing and write the frames as PNGs.
    Animate(AnimateCommand),
}

#[derive(Args, Debug)]
struct AnimateCommand {
    #[arg(long)]
    drawing: PathBuf,
    #[arg(long)]
    routine: PathBuf,
    #[arg(long, default_value = "animate this drawing")]
    prompt: String,
    #[arg(long, default_value_t = 60)]
    frames: u32,
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
    #[arg(long)]
    out_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render { drawing, out } => run_render(cli.width, cli.height, &drawing, &out),
        Command::Summary { drawing } => run_summary(&drawing),
        Command::Check { routine } => run_check(&routine),
        Command::Animate(cmd) => run_animate(cli.width, cli.height, cmd).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| CliError::Write { path: path.to_owned(), source })
}

fn load_engine(width: u32, height: u32, drawing: &Path) -> Result<Engine, CliError> {
    let strokes = drawing::parse(&read(drawing)?)?;
    let mut engine = Engine::new(width, height)?;
    engine.load(strokes);
    Ok(engine)
}

fn run_render(width: u32, height: u32, drawing: &Path, out: &Path) -> Result<(), CliError> {
    let engine = load_engine(width, height, drawing)?;
    write(out, &engine.snapshot()?)?;
    println!("wrote {} ({} strokes)", out.display(), engine.strokes().len());
    Ok(())
}

fn run_summary(drawing: &Path) -> Result<(), CliError> {
    let strokes = drawing::parse(&read(drawing)?)?;
    println!("{}", summarize(&strokes));
    Ok(())
}

fn run_check(routine: &Path) -> Result<(), CliError> {
    let config = AnimatorConfig::from_env()?;
    compile(&read(routine)?, &config).map_err(AnimationError::from)?;
    println!("ok");
    Ok(())
}

async fn run_animate(width: u32, height: u32, cmd: AnimateCommand) -> Result<(), CliError> {
    if !(cmd.fps.is_finite() && cmd.fps > 0.0) {
        return Err(CliError::InvalidFps(cmd.fps));
    }
    let config = AnimatorConfig::from_env()?;
    let engine = load_engine(width, height, &cmd.drawing)?;
    fs::create_dir_all(&cmd.out_dir).map_err(|source| CliError::Write { path: cmd.out_dir.clone(), source })?;

    let mut animator = Animator::new(config);
    let generator = FileGenerator::new(&cmd.routine);
    let token = animator.generate(&generator, &cmd.prompt, engine.snapshot()?, engine.strokes()).await?;

    let (mut painted, mut skipped) = (0u32, 0u32);
    for index in 0..cmd.frames {
        match animator.tick(token, drawing::frame_time_ms(index, cmd.fps)) {
            Tick::Painted { .. } => {
                if let Some(frame) = animator.frame() {
                    write(&cmd.out_dir.join(drawing::frame_file_name(index)), &frame.encode_png()?)?;
                    painted += 1;
                }
            }
            Tick::Skipped { .. } => skipped += 1,
            Tick::Crashed | Tick::Stale => break,
        }
    }
    tracing::info!(painted, skipped, "animation finished");

    if let Phase::Error { code, message } = animator.phase() {
        return Err(CliError::AnimationEnded { code: *code, message: message.clone() });
    }
    println!("wrote {painted} frames to {} ({skipped} skipped)", cmd.out_dir.display());
    Ok(())
}
