use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "emoview", version, about = "Capture facial-expression previews per animation clip")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the clips found under a folder.
    Scan(ScanArgs),
    /// Print sample times and camera placements as JSON, without rendering.
    Plan(PlanArgs),
    /// Render one PNG per clip.
    Capture(CaptureArgs),
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Folder searched recursively for `.anim` files.
    #[arg(long)]
    clips: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Folder searched recursively for `.anim` files.
    #[arg(long)]
    clips: PathBuf,

    /// Rig description JSON.
    #[arg(long)]
    rig: PathBuf,

    /// Vertical field of view in degrees.
    #[arg(long)]
    fov: Option<f32>,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Folder searched recursively for `.anim` files.
    #[arg(long)]
    clips: PathBuf,

    /// Rig description JSON.
    #[arg(long)]
    rig: PathBuf,

    /// Output folder for `<clip>.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Capture settings JSON. Flags below override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Square image size in pixels (minimum 256).
    #[arg(long)]
    resolution: Option<u32>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    fov: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Scan(args) => cmd_scan(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Capture(args) => cmd_capture(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(
    path: Option<&Path>,
    resolution: Option<u32>,
    fov: Option<f32>,
) -> anyhow::Result<emoview::CaptureSettings> {
    let mut settings = match path {
        Some(p) => emoview::CaptureSettings::from_path(p)?,
        None => emoview::CaptureSettings::default(),
    };
    if let Some(r) = resolution {
        settings.resolution = r;
    }
    if let Some(f) = fov {
        settings.vertical_fov_deg = f;
    }
    settings.validate()?;
    Ok(settings)
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    let clips = emoview::ClipLibrary::scan(&args.clips)?;
    for entry in clips.iter() {
        println!("{}\t{}", entry.name, entry.path.display());
    }
    eprintln!("{} clip(s)", clips.len());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let clips = emoview::ClipLibrary::scan(&args.clips)?;
    let rig = emoview::Rig::from_path(&args.rig)?;
    let settings = load_settings(None, None, args.fov)?;

    let mut host = emoview::PreviewHost::new(rig);
    let mut session = emoview::CaptureSession::new(settings, ".")?;
    let plans = session.plan(&mut host, &clips)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &plans).context("write plan JSON")?;
    println!();
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let clips = emoview::ClipLibrary::scan(&args.clips)?;
    tracing::info!("{} clip(s) found", clips.len());
    let rig = emoview::Rig::from_path(&args.rig)?;
    let settings = load_settings(args.settings.as_deref(), args.resolution, args.fov)?;

    let mut host = emoview::PreviewHost::new(rig);
    let mut session = emoview::CaptureSession::new(settings, &args.out)?;
    let report = session
        .run(&mut host, &clips)
        .with_context(|| format!("capture into '{}'", args.out.display()))?;

    for c in &report.captured {
        eprintln!("wrote {}", c.path.display());
    }
    for s in &report.skipped {
        eprintln!("skipped {}: {}", s.name, s.reason);
    }
    if report.captured.is_empty() {
        anyhow::bail!("no clip could be captured");
    }
    Ok(())
}
