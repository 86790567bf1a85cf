use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tessera::{
    Canvas, EngineConfig, FixedStepDriver, FrameDriver, FrameRGBA, FrameRequest, PatternEngine,
    PixelHost, PixelSurface, SurfaceHost as _,
};

const SURFACE_ID: &str = "canvas";

#[derive(Parser, Debug)]
#[command(name = "tessera", version)]
struct Cli {
    /// Print engine events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the engine headless and write the final surface as a PNG.
    Frame(FrameArgs),
    /// Run the engine headless and write every K-th frame as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed; overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 180)]
    height: u32,

    /// Frames per second of the simulated clock.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print the SHA-256 of the final pixels.
    #[arg(long)]
    digest: bool,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Write one PNG every this many frames.
    #[arg(long, default_value_t = 10)]
    every: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args, cli.verbose),
        Command::Sequence(args) => cmd_sequence(args, cli.verbose),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let cfg = EngineConfig::from_json_str(&json)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(cfg)
}

fn make_engine(
    args: &EngineArgs,
    verbose: bool,
) -> anyhow::Result<(PatternEngine<PixelSurface>, FixedStepDriver)> {
    let mut config = match &args.config {
        Some(path) => read_config_json(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.debug_mode |= verbose;

    let viewport = Canvas::new(args.width, args.height);
    let mut host = PixelHost::new(viewport);
    host.insert(SURFACE_ID, PixelSurface::new(Canvas::new(1, 1)));

    let mut engine = PatternEngine::create(&mut host, SURFACE_ID, config)?;
    engine.start(host.viewport());

    let driver = FixedStepDriver::new(args.fps)?.with_max_frames(args.frames);
    Ok((engine, driver))
}

fn cmd_frame(args: FrameArgs, verbose: bool) -> anyhow::Result<()> {
    let (mut engine, mut driver) = make_engine(&args.engine, verbose)?;
    let stats = engine.run(&mut driver)?;

    let frame = engine.surface().readback();
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} ({} frames, {} patterns spawned, {} erased)",
        args.out.display(),
        stats.frames,
        stats.patterns_spawned,
        stats.patterns_discarded
    );
    if args.digest {
        println!("{}", sha256_hex(&frame.data));
    }
    Ok(())
}

fn cmd_sequence(args: SequenceArgs, verbose: bool) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be > 0");
    let (mut engine, mut driver) = make_engine(&args.engine, verbose)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u64;
    while let Some(now) = driver.next_timestamp() {
        let request = engine.on_frame(now)?;
        let ticks = engine.scheduler().ticks();
        if ticks % args.every == 0 {
            let path = args.out_dir.join(format!("frame_{ticks:05}.png"));
            write_png(&path, &engine.surface().readback())?;
            written += 1;
        }
        if request == FrameRequest::Stop {
            break;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
