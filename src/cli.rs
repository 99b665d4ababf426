use crate::{
    config::{Config, OutputFormat},
    layout::{LayoutMode, OrderOptions},
    page_key::FilenamePatterns,
    pipeline::Pipeline,
    scan,
    util::ensure_dir,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "scan-order")]
#[command(about = "Infer reading order of scanned page images from their filenames")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./scan-order.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report whether the images look single- or double-sided.
    Classify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum)]
        layout: Option<LayoutMode>,
    },
    /// Show the page key extracted from every image.
    Keys {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the images in processing order.
    Order {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum)]
        layout: Option<LayoutMode>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Also write the ordered list, one path per line, to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Classify { input, layout } => classify(&cfg, input, *layout),
        Command::Keys { input } => keys(&cfg, input),
        Command::Order {
            input,
            layout,
            format,
            out,
        } => order(&cfg, input, *layout, *format, out.as_deref()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("scan-order.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the command's result; logs go to stderr.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = match resolve_log_path(cfg) {
        Some(path) => {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            ensure_dir(parent)?;
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create log file: {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from("scan-order.log"))
}

/// `--out` wins; otherwise the configured list file inside the input directory.
pub fn resolve_list_path(cfg: &Config, input: &Path, out: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = out {
        return Some(p.to_path_buf());
    }
    cfg.output
        .write_list_file
        .then(|| input.join(&cfg.output.list_filename))
}

fn pipeline(cfg: &Config, layout: Option<LayoutMode>) -> Pipeline<FilenamePatterns> {
    let mut opts = OrderOptions::from_config(cfg);
    if let Some(mode) = layout {
        opts = opts.with_mode(mode);
    }
    Pipeline::new(opts, FilenamePatterns)
}

fn classify(cfg: &Config, input: &Path, layout: Option<LayoutMode>) -> Result<()> {
    let files = scan::discover(&cfg.scan, input)?;
    let decision = pipeline(cfg, layout)
        .decide(&files)
        .with_context(|| format!("classifying {}", input.display()))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "input": input,
            "decision": decision,
        }))?
    );
    Ok(())
}

fn keys(cfg: &Config, input: &Path) -> Result<()> {
    let files = scan::discover(&cfg.scan, input)?;
    let probes = pipeline(cfg, None).probe_keys(&files);
    println!("{}", serde_json::to_string_pretty(&probes)?);
    Ok(())
}

fn order(
    cfg: &Config,
    input: &Path,
    layout: Option<LayoutMode>,
    format: Option<OutputFormat>,
    out: Option<&Path>,
) -> Result<()> {
    let files = scan::discover(&cfg.scan, input)?;
    let report = pipeline(cfg, layout)
        .run(&files)
        .with_context(|| format!("ordering {}", input.display()))?;

    if let Some(path) = resolve_list_path(cfg, input, out) {
        report.write_list(&path)?;
        info!("wrote {} entries to {}", report.entries.len(), path.display());
    }

    match format.unwrap_or(cfg.output.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Lines => print!("{}", report.to_list()),
    }
    Ok(())
}
