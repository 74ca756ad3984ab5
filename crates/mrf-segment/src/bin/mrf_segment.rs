//! Command-line front end: decode an image, segment it, re-encode the
//! results.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use mrf_segment::{io, SegmentationParams, Segmenter};
use mrf_segment_core::init_with_level;

#[derive(Parser, Debug)]
#[command(name = "mrf-segment", version, about = "MRF foreground segmentation")]
struct Cli {
    /// Input image (any format the `image` crate decodes).
    input: PathBuf,

    /// Segmented output image.
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the binary mask (foreground white).
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Also write the relaxed (smoothed/quantized) buffer.
    #[arg(long)]
    relaxed_out: Option<PathBuf>,

    /// JSON file with `SegmentationParams`; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Number of relaxation passes.
    #[arg(long)]
    iterations: Option<u32>,

    /// CDF threshold in (0, 1).
    #[arg(long)]
    threshold: Option<f64>,

    /// Gibbs temperature (> 0).
    #[arg(long)]
    temperature: Option<f64>,

    /// Radius divisor (radius = min(w, h) / partition).
    #[arg(long)]
    partition: Option<u32>,

    /// Explicit neighborhood radius, overriding the partition.
    #[arg(long)]
    radius: Option<u32>,

    /// Region seed as `X,Y` (defaults to the image center).
    #[arg(long, value_parser = parse_seed)]
    seed: Option<(u32, u32)>,

    /// Convert the input to grayscale before segmenting.
    #[arg(long)]
    gray: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_seed(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn build_params(cli: &Cli) -> Result<SegmentationParams, Box<dyn std::error::Error>> {
    let mut params = match &cli.params {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SegmentationParams::default(),
    };
    if let Some(v) = cli.iterations {
        params.iterations = v;
    }
    if let Some(v) = cli.threshold {
        params.threshold = v;
    }
    if let Some(v) = cli.temperature {
        params.temperature = v;
    }
    if let Some(v) = cli.partition {
        params.partition = v;
    }
    if let Some(v) = cli.radius {
        params.radius = Some(v);
    }
    if let Some(v) = cli.seed {
        params.seed = Some(v);
    }
    Ok(params)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let decoded = image::ImageReader::open(&cli.input)?.decode()?;
    let buffer = if cli.gray {
        io::buffer_from_gray(&decoded.to_luma8())?
    } else {
        io::buffer_from_dynamic(&decoded)?
    };
    log::info!(
        "loaded {} ({}x{}, {} channel(s))",
        cli.input.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels()
    );

    let segmenter = Segmenter::new(build_params(&cli)?)?;
    let result = segmenter.segment(&buffer)?;
    log::info!(
        "radius {}, seed ({}, {}), foreground {} px",
        result.radius,
        result.seed.0,
        result.seed.1,
        result.mask.count_set()
    );

    save_buffer(&result.segmented, &cli.output)?;
    if let Some(path) = &cli.relaxed_out {
        save_buffer(&result.relaxed, path)?;
    }
    if let Some(path) = &cli.mask_out {
        io::gray_from_mask(&result.mask)?.save(path)?;
    }
    Ok(())
}

fn save_buffer(
    buf: &mrf_segment_core::PixelBuffer,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    match buf.channels() {
        1 => io::gray_from_buffer(buf)?.save(path)?,
        _ => io::rgb_from_buffer(buf)?.save(path)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = init_with_level(level);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
