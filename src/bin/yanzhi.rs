use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use yanzhi::{
    BASE_TICK_MS, DebugConfig, DirFrameSource, FrameSource, LogNotifier, LogPresenter,
    MemoryFrameSource, Runtime, ScaleContext, ScreenSize, SequenceDirector, Show, Stage,
    StepOutcome, TextEngine, WallClock,
};

#[derive(Parser, Debug)]
#[command(name = "yanzhi", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the show in real time, logging window changes.
    Play(PlayArgs),
    /// Render the desktop at one playback position as a PNG.
    Snapshot(SnapshotArgs),
    /// Print the show as JSON.
    Dump(DumpArgs),
    /// Validate a show and load every asset it references.
    Check(ShowArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Show JSON; the built-in show when omitted.
    #[arg(long = "show")]
    show_path: Option<PathBuf>,

    /// Directory holding the `frames/...` resource folders.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Generate flat placeholder frames instead of reading assets.
    #[arg(long, default_value_t = false)]
    placeholders: bool,

    /// Font file to shape labels with instead of the show's own font.
    /// Placeholder runs without one draw labels without text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Primary screen size as WxH.
    #[arg(long, default_value = "1920x1080")]
    screen: ScreenSize,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Verbose logging (also `YANZHI_DEBUG`).
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Seek here on the first position update (ms).
    #[arg(long)]
    start_from: Option<u64>,

    /// Stop and exit at this position (ms).
    #[arg(long)]
    stop_at: Option<u64>,

    /// Log every position dispatch.
    #[arg(long, default_value_t = false)]
    count_ticks: bool,

    /// Keep windows out of the taskbar.
    #[arg(long, default_value_t = false)]
    hide_taskbar: bool,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Playback position (ms).
    #[arg(long)]
    at: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Show JSON to normalize; the built-in show when omitted.
    #[arg(long = "show")]
    show_path: Option<PathBuf>,

    /// Write here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(cfg: &DebugConfig) {
    let level = if cfg.count_ticks {
        tracing::Level::TRACE
    } else if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_show(path: Option<&Path>) -> anyhow::Result<Show> {
    Ok(match path {
        Some(p) => Show::from_path(p)?,
        None => yanzhi::yanzhi_show()?,
    })
}

fn build_stage(args: &ShowArgs, show: &Show) -> anyhow::Result<Stage> {
    let scale = ScaleContext::new(args.screen)?;
    let source: Box<dyn FrameSource> = if args.placeholders {
        Box::new(MemoryFrameSource::with_placeholders(8, ScreenSize::new(64, 64)))
    } else {
        Box::new(DirFrameSource::new(&args.assets))
    };
    let notifier = Box::new(LogNotifier);
    let stage = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            let text = TextEngine::from_font_bytes(bytes)?;
            Stage::from_show_with_text(show, scale, source, notifier, text)
        }
        None if args.placeholders => {
            Stage::from_show_with_text(show, scale, source, notifier, TextEngine::new())
        }
        None => Stage::from_show(show, scale, source, notifier),
    }
    .context("build stage")?;
    tracing::debug!(scale = stage.scale().factor(), "display scale");
    Ok(stage)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = DebugConfig::from_env();
    cfg.debug |= args.debug;
    cfg.count_ticks |= args.count_ticks;
    cfg.hide_taskbar |= args.hide_taskbar;
    if let Some(ms) = args.start_from {
        cfg.start_from_ms = ms;
    }
    if let Some(ms) = args.stop_at {
        cfg.stop_at_ms = ms;
    }
    init_logging(&cfg);

    let show = load_show(args.show.show_path.as_deref())?;
    let stage = build_stage(&args.show, &show)?;
    let mut presenter = LogPresenter::new(cfg.hide_taskbar);
    let director = SequenceDirector::new(show.timeline.clone(), cfg);
    let mut clock = WallClock::new(show.duration_ms);
    clock.start(0);
    let mut runtime = Runtime::new(stage, director, clock);

    tracing::info!(title = %show.title, duration_ms = show.duration_ms, "playing");
    let epoch = Instant::now();
    let tick = Duration::from_millis(BASE_TICK_MS);
    loop {
        let now_ms = u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        if runtime.step(now_ms, &mut presenter)? == StepOutcome::Exit {
            break;
        }
        std::thread::sleep(tick);
    }
    tracing::info!("done");
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    init_logging(&DebugConfig::default());
    let show = load_show(args.show.show_path.as_deref())?;
    let mut stage = build_stage(&args.show, &show)?;
    stage.set_now(args.at);
    let mut director = SequenceDirector::new(show.timeline.clone(), DebugConfig::default());
    director.dispatch(args.at, &mut stage);
    stage.tick(args.at);
    let img = yanzhi::render_stage(&stage)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let show = load_show(args.show_path.as_deref())?;
    let json = show.to_json()?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_check(args: ShowArgs) -> anyhow::Result<()> {
    init_logging(&DebugConfig::default());
    let show = load_show(args.show_path.as_deref())?;
    let stage = build_stage(&args, &show)?;
    eprintln!(
        "ok: {} windows, {} cues",
        stage.windows().len(),
        show.timeline.len()
    );
    Ok(())
}
