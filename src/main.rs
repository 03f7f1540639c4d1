use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use overlay_transform::replay::{self, Overrides, ReplayError, Script};

#[derive(Parser, Debug)]
#[command(name = "overlay-transform", about = "Replay pointer scripts against a quad overlay")]
struct Cli {
    /// Script path, or `-` for stdin.
    #[arg(long, env = "OVERLAY_SCRIPT", default_value = "-")]
    script: String,

    /// Image whose header supplies the bitmap size.
    #[arg(long, env = "OVERLAY_IMAGE")]
    image: Option<PathBuf>,

    #[arg(long, env = "OVERLAY_RATIO_LOCKED")]
    ratio_locked: bool,

    #[arg(long, env = "OVERLAY_FIT_TO_IMAGE")]
    fit_to_image: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(count) => {
            tracing::info!(placements = count, "replay complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<usize, ReplayError> {
    let raw = if cli.script == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.script)?
    };
    let script = Script::parse(&raw)?;

    let bitmap = match &cli.image {
        Some(path) => Some(replay::bitmap_size_from_image(path)?),
        None => None,
    };
    let overrides = Overrides { bitmap, ratio_locked: cli.ratio_locked, fit_to_image: cli.fit_to_image };
    let placements = replay::run(&script, overrides)?;

    let mut out = BufWriter::new(io::stdout().lock());
    for placement in &placements {
        serde_json::to_writer(&mut out, placement)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(placements.len())
}
