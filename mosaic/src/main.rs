use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use mosaic_lib::{BorderStyle, Mode, Observer, Params, Region, RgbImage, Session};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(about = "Replace every square block of an image with its average color")]
#[command(version)]
struct Args {
    /// Image to process
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Side length of each averaging square, in pixels
    #[arg(value_name = "SQUARE_SIZE")]
    square_size: u32,

    /// S (single-threaded) or M (multi-threaded)
    #[arg(value_name = "MODE")]
    mode: String,

    /// Number of bands processed in parallel in mode M
    #[arg(short, long, value_name = "N", default_value_t = mosaic_lib::DEFAULT_WORKERS)]
    workers: usize,

    /// Delay after every block, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pace_ms: u64,

    /// Pace blocks so they can be followed by eye (overrides --pace-ms)
    #[arg(long)]
    visualize: bool,

    /// Let block outlines spill into the next block; matches the original
    /// program's output, which the default inset outline does not
    #[arg(long)]
    overlapping_border: bool,

    /// Where to write the result
    #[arg(short, long, value_name = "FILE", default_value = "result.jpg")]
    output: PathBuf,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

struct Progress {
    bar: ProgressBar,
}

impl Progress {
    fn new(blocks: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(blocks as u64)
        };

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{elapsed_precise} [{bar:40}] {pos}/{len} blocks {msg}")
                .progress_chars("=> "),
        );

        Self { bar }
    }
}

impl Observer for Progress {
    fn on_block_updated(&self, _img: &RgbImage, _block: Region) {
        self.bar.inc(1);
    }

    fn on_processing_complete(&self, _img: &RgbImage, blocks: usize) {
        self.bar.finish_with_message(format!("({} done)", blocks));
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Usage and argument errors are not process failures
            let _ = err.print();
            return;
        }
    };

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(err) = run(args) {
        eprintln!("Error processing image: {:#}", err);
    }
}

fn run(args: Args) -> Result<()> {
    let mode: Mode = match args.mode.parse() {
        Ok(mode) => mode,
        Err(err) => {
            println!("{}", err);
            return Ok(());
        }
    };

    let params = Params::new(args.square_size)?
        .with_workers(args.workers)?
        .with_pacing(Duration::from_millis(args.pace_ms))
        .with_border(if args.overlapping_border {
            BorderStyle::Overlapping
        } else {
            BorderStyle::Inset
        });

    let params = if args.visualize {
        params.visualization()
    } else {
        params
    };

    debug!("{:#?}", params);

    let mut img = mosaic_lib::load(&args.image)?;
    let (width, height) = img.dimensions();

    info!("Processing image: {} ({}x{})", args.image.display(), width, height);

    match mode {
        Mode::Sequential => info!("Running single-threaded processing..."),
        Mode::Concurrent => info!(
            "Running multi-threaded processing with {} workers...",
            params.workers()
        ),
    }

    let progress = Progress::new(params.block_count(width, height), args.no_progress);
    let started = Instant::now();

    let report = Session::new(&params)
        .with_observer(&progress)
        .run(&mut img, mode)
        .context("Processing stopped")?;

    mosaic_lib::save(&img, &args.output)?;

    println!(
        "Processing complete. Result saved as {}.",
        args.output.display()
    );
    println!(
        "Processing took: {} seconds.",
        started.elapsed().as_secs()
    );

    debug!("{:#?}", report);

    Ok(())
}
