use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyphgrid", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a job: PNG for color output, JSON for numeric grids and contours.
    Render(RenderArgs),
    /// Validate a job and build its shader chain without aggregating.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "glyphgrid=debug",
        _ => "glyphgrid=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_job_json(path: &Path) -> anyhow::Result<glyphgrid::RenderJob> {
    let f = File::open(path).with_context(|| format!("open job '{}'", path.display()))?;
    let r = BufReader::new(f);
    let job: glyphgrid::RenderJob =
        serde_json::from_reader(r).with_context(|| "parse job JSON")?;
    Ok(job)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let job = read_job_json(&args.in_path)?;
    job.validate()?;
    let chain = job.build_chain()?;
    eprintln!(
        "ok: {} records, {} shader stage(s), {}",
        job.records.len(),
        chain.len(),
        if chain.is_terminal() {
            "terminal".to_string()
        } else {
            format!("{:?} output", chain.output_form().unwrap_or(job.aggregate_form()))
        }
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = read_job_json(&args.in_path)?;
    let shaded = job.run()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    match &shaded {
        glyphgrid::Shaded::Color(grid) => {
            let img = grid.to_rgba_image()?;
            img.save_with_format(&args.out, image::ImageFormat::Png)
                .with_context(|| format!("write png '{}'", args.out.display()))?;
        }
        glyphgrid::Shaded::Numeric(_) | glyphgrid::Shaded::Contours(_) => {
            let f = File::create(&args.out)
                .with_context(|| format!("create '{}'", args.out.display()))?;
            serde_json::to_writer_pretty(f, &shaded)
                .with_context(|| format!("write json '{}'", args.out.display()))?;
        }
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
