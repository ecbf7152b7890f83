use clap::{Parser, Subcommand};
use qr_locate::tools::{
    FileImage, ImageSource, PngOverlay, RegionRenderer, binary_stats, gray_stats, save_float,
    save_gray, save_mask,
};
use qr_locate::{BoundingBox, BoxRule, Locator, PipelineConfig, PipelineError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrlocate", version, about = "Locate the QR code region in an image")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Foreground threshold on the stretched edge map (default 70)
    #[arg(long, global = true)]
    threshold: Option<u8>,

    /// Number of box-average passes (default 6)
    #[arg(long, global = true)]
    smoothing: Option<usize>,

    /// Process rows in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Rectangle rule: `minimal` or `scan` (first/last raster hit)
    #[arg(long, global = true, value_parser = parse_box_rule)]
    box_rule: Option<BoxRule>,
}

fn parse_box_rule(name: &str) -> Result<BoxRule, String> {
    BoxRule::from_name(name).ok_or_else(|| format!("unknown box rule `{}`", name))
}

#[derive(Subcommand)]
enum Command {
    /// Print the bounding box as `left top width height`
    Locate {
        #[arg(long)]
        image: PathBuf,
    },
    /// Write every intermediate stage as a PNG into a directory
    Stages {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Write the image with the located rectangle drawn on it
    Overlay {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 3)]
        line_width: usize,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env().with_parallel(cli.parallel);
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(passes) = cli.smoothing {
        config = config.with_smoothing_passes(passes);
    }
    if let Some(rule) = cli.box_rule {
        config = config.with_box_rule(rule);
    }
    let locator = Locator::with_config(config);

    let result = match cli.command {
        Command::Locate { image } => locate_cmd(&locator, &image),
        Command::Stages { image, out_dir } => stages_cmd(&locator, &image, &out_dir),
        Command::Overlay {
            image,
            out,
            line_width,
        } => overlay_cmd(&locator, &image, &out, line_width),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_region(region: &BoundingBox) {
    println!(
        "{} {} {} {}",
        region.left, region.top, region.width, region.height
    );
}

fn locate_cmd(locator: &Locator, image: &Path) -> Result<(), PipelineError> {
    let pixels = FileImage::new(image).load()?;
    let region = locator.locate(&pixels)?;
    print_region(&region);
    Ok(())
}

fn stages_cmd(locator: &Locator, image: &Path, out_dir: &Path) -> Result<(), PipelineError> {
    let pixels = FileImage::new(image).load()?;
    std::fs::create_dir_all(out_dir)?;

    let start = Instant::now();
    let trace = locator.trace(&pixels)?;
    println!(
        "Image: {} ({}x{}) processed in {:.2?}",
        image.display(),
        pixels.width(),
        pixels.height(),
        start.elapsed()
    );

    let stats = gray_stats(&trace.greyscale);
    println!(
        "Greyscale range: {}-{}, average: {}",
        stats.min, stats.max, stats.avg
    );
    let stats = binary_stats(&trace.binary);
    println!(
        "Thresholded: foreground={} total={} ratio={:.2}%",
        stats.foreground_pixels,
        stats.total_pixels,
        stats.foreground_ratio * 100.0
    );
    println!(
        "Components: {} (largest {} pixels)",
        trace.telemetry.components, trace.telemetry.largest_component_pixels
    );

    save_gray(out_dir.join("01_greyscale.png"), &trace.greyscale)?;
    save_float(out_dir.join("02_edges.png"), &trace.edges)?;
    save_float(out_dir.join("03_smoothed.png"), &trace.smoothed)?;
    save_gray(out_dir.join("04_stretched.png"), &trace.stretched)?;
    save_gray(out_dir.join("05_threshold.png"), &trace.binary)?;
    save_mask(out_dir.join("06_closed.png"), &trace.closed)?;
    save_mask(out_dir.join("07_labels.png"), &trace.labeling.labels)?;
    if let Some(component) = &trace.component {
        save_mask(out_dir.join("08_component.png"), component)?;
    }

    if let Some((left, top, width, height)) = trace.scan_box {
        println!("Raster scan: {} {} {} {}", left, top, width, height);
    }
    let region = trace.region()?;
    print_region(&region);
    PngOverlay::new(out_dir.join("09_overlay.png")).render(&pixels, &region)
}

fn overlay_cmd(
    locator: &Locator,
    image: &Path,
    out: &Path,
    line_width: usize,
) -> Result<(), PipelineError> {
    let renderer = PngOverlay::new(out).with_line_width(line_width);
    let region = locator.run(&FileImage::new(image), &renderer)?;
    print_region(&region);
    Ok(())
}
