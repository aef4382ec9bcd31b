//! pixfilter command-line front end
//!
//! Usage examples:
//!   pixfilter photo.png out.png --filter sepia --sepia-ratio 40
//!   pixfilter photo.bmp out.bmp --filter gauss --gauss-radius 5 --gauss-sigma 3
//!   pixfilter scan.png out.png --filter opening --kernel kernel.txt
//!
//! The output format follows the output file extension. Set `RUST_LOG=debug`
//! for per-pass log lines.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use pixfilter::io::ImageFormat;
use pixfilter::{FilterKind, FilterParams, Session, SessionStatus, WorkerError};

/// Apply one filter to an image file.
#[derive(Parser, Debug)]
#[command(
    name = "pixfilter",
    version,
    about = "Apply an image filter from the command line",
    long_about = "Reads INPUT (BMP, PNG or JPEG), applies one filter and writes OUTPUT\n\
                  (BMP or PNG, chosen by extension).\n\n\
                  Filters: invert, grayscale, sepia, brightness, perfect-reflector,\n\
                  linear-stretch, glass, vertical-waves, horizontal-waves, blur, gauss,\n\
                  sharpen, motion-blur, sobel, emboss, median, convolve, dilation,\n\
                  erosion, opening, closing, top-hat.\n\
                  convolve and the morphological filters need --kernel."
)]
struct CliArgs {
    /// Image to read
    input: PathBuf,

    /// Image to write
    output: PathBuf,

    /// Filter to apply
    #[arg(short, long, value_name = "NAME")]
    filter: FilterKind,

    /// Kernel text file (whitespace-separated weights, one row per line)
    #[arg(short, long, value_name = "FILE")]
    kernel: Option<PathBuf>,

    /// Sepia tint strength
    #[arg(long, default_value_t = 25.0)]
    sepia_ratio: f32,

    /// Value added to every channel by `brightness`
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    brightness: i32,

    /// Gaussian kernel radius
    #[arg(long, default_value_t = 3)]
    gauss_radius: u32,

    /// Gaussian standard deviation
    #[arg(long, default_value_t = 2.0)]
    gauss_sigma: f32,

    /// Motion blur kernel size
    #[arg(long, default_value_t = 10)]
    motion_length: u32,

    /// Seed for `glass`; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl CliArgs {
    fn params(&self) -> FilterParams {
        FilterParams {
            sepia_ratio: self.sepia_ratio,
            brightness: self.brightness,
            gauss_radius: self.gauss_radius,
            gauss_sigma: self.gauss_sigma,
            motion_length: self.motion_length,
            kernel: None,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = CliArgs::parse();

    let format = ImageFormat::from_path(&args.output).ok_or_else(|| {
        format!(
            "cannot tell the output format from '{}' (use .bmp or .png)",
            args.output.display()
        )
    })?;
    if args.filter.requires_kernel() && args.kernel.is_none() {
        return Err(WorkerError::MissingKernel(args.filter).into());
    }

    let mut session = Session::open(&args.input)?;
    *session.params_mut() = args.params();
    if let Some(path) = &args.kernel {
        session.load_kernel(path)?;
    }

    session.apply(args.filter)?;
    let mut stderr = std::io::stderr();
    let status = session.wait_with(|percent| {
        let _ = write!(stderr, "\r{}: {percent:3}%", args.filter);
        let _ = stderr.flush();
    })?;
    eprintln!("\r{}: 100%", args.filter);

    if status != SessionStatus::Committed {
        return Err(format!("{} did not complete", args.filter).into());
    }
    session.save_image(&args.output, format)?;
    info!("wrote {}", args.output.display());
    Ok(())
}
