use battlemap_vectorizer::config::{load_config, RuntimeConfig};
use battlemap_vectorizer::grid::{GridDescriptor, GridDetector, GridParams, GridReport};
use battlemap_vectorizer::image::io::{load_raster, write_json_file};
use battlemap_vectorizer::walls::{save_debug_artifacts, WallParams, WallReport, WallVectorizer};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "battlemap", about = "Grid detection and wall vectorization for traced battle maps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect grid pitch and offsets.
    Grid(GridArgs),
    /// Vectorize the wall trace into polylines.
    Walls(WallArgs),
    /// Run both detectors from a JSON runtime config.
    Run {
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GridArgs {
    #[arg(long)]
    image: PathBuf,

    /// JSON file with `GridParams` (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    min_size: Option<u32>,

    #[arg(long)]
    max_size: Option<u32>,

    /// Write the descriptor here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct WallArgs {
    #[arg(long)]
    image: PathBuf,

    /// JSON file with `WallParams` (missing fields take defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write `{width, height, polylines}` here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for overlay / mask / skeleton renders
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Enable parallel-duplicate removal with this distance
    #[arg(long)]
    parallel_distance: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Grid(args) => run_grid(args),
        Command::Walls(args) => run_walls(args),
        Command::Run { config } => run_config(&config),
    }
}

fn read_params<T: DeserializeOwned + Default>(path: Option<&Path>) -> CliResult<T> {
    match path {
        Some(p) => Ok(serde_json::from_str(&fs::read_to_string(p)?)?),
        None => Ok(T::default()),
    }
}

fn emit<T: serde::Serialize>(value: &T, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            write_json_file(path, value)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn run_grid(args: GridArgs) -> CliResult<()> {
    let mut params: GridParams = read_params(args.config.as_deref())?;
    if let Some(v) = args.min_size {
        params.min_size = v;
    }
    if let Some(v) = args.max_size {
        params.max_size = v;
    }
    let detector = GridDetector::new(params)?;
    let img = load_raster(&args.image)?;
    let report = detector.detect_with_report(&img);
    print_grid_summary(&report);
    emit(&report.descriptor, args.out.as_deref())
}

fn run_walls(args: WallArgs) -> CliResult<()> {
    let mut params: WallParams = read_params(args.config.as_deref())?;
    if let Some(v) = args.parallel_distance {
        params.parallel_distance = v;
    }
    let vectorizer = WallVectorizer::new(params)?;
    let report = vectorizer.vectorize_file(&args.image, args.debug_dir.as_deref())?;
    print_wall_summary(&report);
    emit(&report.export(), args.out.as_deref())
}

fn run_config(path: &Path) -> CliResult<()> {
    let RuntimeConfig {
        input,
        grid,
        walls,
        output,
    } = load_config(path)?;
    let detector = GridDetector::new(grid)?;
    let vectorizer = WallVectorizer::new(walls)?;
    let img = load_raster(&input)?;

    // The two detectors share nothing mutable.
    let (grid_report, walls) = rayon::join(
        || detector.detect_with_report(&img),
        || vectorizer.vectorize_with_report(&img),
    );
    let wall_report = walls?;

    print_grid_summary(&grid_report);
    print_wall_summary(&wall_report);
    emit(&grid_report.descriptor, output.grid_json.as_deref())?;
    emit(&wall_report.export(), output.json_out.as_deref())?;
    if let Some(dir) = &output.debug_dir {
        let written = save_debug_artifacts(
            dir,
            &img,
            &wall_report.mask,
            &wall_report.skeleton,
            &wall_report.polylines,
        )?;
        log::info!("{} debug artifacts written to {}", written.len(), dir.display());
    }
    Ok(())
}

fn print_grid_summary(report: &GridReport) {
    let GridDescriptor {
        grid_size,
        x_offset,
        y_offset,
        confidence,
        method,
    } = &report.descriptor;
    match grid_size {
        Some(size) => log::info!(
            "grid: size={size}px offset=({x_offset}, {y_offset}) confidence={confidence:.3} method={method:?}"
        ),
        None => log::info!("grid: no periodicity found"),
    }
    for stage in &report.timing.stages {
        log::debug!("  {:<12} {:>8.2} ms", stage.label, stage.elapsed_ms);
    }
}

fn print_wall_summary(report: &WallReport) {
    log::info!(
        "walls: {} polylines ({} vertices) in {:.1} ms",
        report.polylines.len(),
        report.polylines.iter().map(Vec::len).sum::<usize>(),
        report.timing.total_ms
    );
    log::debug!("  stage counts: {:?}", report.counts);
}
