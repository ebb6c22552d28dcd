use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;

use vizpipe::{BoundingBox, CameraPose, OverlayInput, PipelineConfig, TagPoses, TextContent};

#[derive(Parser, Debug)]
#[command(name = "vizpipe", version)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the configured overlays onto an image and write a PNG.
    Render(RenderArgs),
    /// Validate a pipeline config and list its overlays in draw order.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Pipeline config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Per-overlay parameters JSON, keyed by overlay id.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Pipeline config JSON.
    #[arg(long)]
    config: PathBuf,
}

/// Parameters of one overlay as written in the params file.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
enum ParamSpec {
    Text(TextContent),
    BoundingBoxes(Vec<BoundingBox>),
    /// Image path, relative to the params file.
    Image(PathBuf),
    CameraPose(CameraPose),
    TagPoses(TagPoses),
}

impl ParamSpec {
    fn into_input(self, base_dir: &Path) -> anyhow::Result<OverlayInput> {
        Ok(match self {
            ParamSpec::Text(t) => OverlayInput::Text(t),
            ParamSpec::BoundingBoxes(b) => OverlayInput::BoundingBoxes(b),
            ParamSpec::Image(rel) => {
                let path = base_dir.join(rel);
                let img = image::open(&path)
                    .with_context(|| format!("decode overlay image '{}'", path.display()))?;
                OverlayInput::Image(img.into_rgba8())
            }
            ParamSpec::CameraPose(p) => OverlayInput::CameraPose(p),
            ParamSpec::TagPoses(p) => OverlayInput::TagPoses(p),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn load_params(path: &Path) -> anyhow::Result<HashMap<String, OverlayInput>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read params '{}'", path.display()))?;
    let specs: HashMap<String, ParamSpec> = serde_json::from_str(&text)
        .with_context(|| format!("parse params '{}'", path.display()))?;
    specs
        .into_iter()
        .map(|(id, param)| Ok((id, param.into_input(parent_dir(path))?)))
        .collect()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::from_path(&args.config)?;
    let mut pipeline = config.build(parent_dir(&args.config))?;

    let input = image::open(&args.in_path)
        .with_context(|| format!("decode input image '{}'", args.in_path.display()))?
        .into_rgb8();
    let params = match &args.params {
        Some(path) => load_params(path)?,
        None => HashMap::new(),
    };

    let Some(vis) = pipeline.visualize(Some(&input), &params)? else {
        anyhow::bail!("pipeline produced no image");
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    vis.image
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    for outcome in &vis.outcomes {
        let status = if outcome.success { "ok" } else { "failed" };
        println!("{}\t{status}", outcome.identifier);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::from_path(&args.config)?;
    let pipeline = config.build(parent_dir(&args.config))?;
    for id in pipeline.identifiers() {
        println!("{id}");
    }
    Ok(())
}
