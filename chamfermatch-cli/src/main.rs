use chamfermatch::image::io::load_binary_image;
use chamfermatch::{
    sort_by_score, suppress_non_minima, ChamferTransform, DistanceMatcher, PixelDistance, Shape,
    TemplateFactory,
};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chamfer-match note head shapes in a page image")]
struct Cli {
    /// Path to the page image (converted to grayscale, then binarized).
    image: PathBuf,
    /// Binarization threshold: pixels darker than this are foreground.
    #[arg(long, default_value_t = 128)]
    threshold: u8,
    /// Interline (nominal staff line spacing) in pixels.
    #[arg(long, default_value_t = 20)]
    interline: u32,
    /// Shape to match (e.g. notehead-black, whole-note).
    #[arg(long, default_value = "notehead-black")]
    shape: Shape,
    /// Retain candidates scoring at or below this value.
    #[arg(long, default_value_t = 1.5)]
    max_score: f32,
    /// Chebyshev radius for non-minimum suppression; omit to keep all.
    #[arg(long)]
    nms_radius: Option<usize>,
    /// Print at most this many candidates.
    #[arg(long, default_value_t = 50)]
    limit: usize,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    score: f32,
}

impl From<PixelDistance> for MatchRecord {
    fn from(m: PixelDistance) -> Self {
        Self {
            x: m.x,
            y: m.y,
            score: m.score,
        }
    }
}

#[derive(Serialize)]
struct Report {
    shape: String,
    interline: u32,
    candidates: Vec<MatchRecord>,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let bitmap = load_binary_image(&cli.image, cli.threshold)?;
    let distances = ChamferTransform::new().compute_to_foreground(bitmap.view())?;

    let factory = TemplateFactory::new();
    let catalog = factory.catalog(cli.interline)?;
    let template = catalog.lookup(cli.shape)?;

    let matcher = DistanceMatcher::new(&distances);
    let mut matches = matcher.match_all(template, cli.max_score);
    let mut ranked = match cli.nms_radius {
        Some(radius) => suppress_non_minima(&mut matches, radius),
        None => {
            sort_by_score(&mut matches);
            matches
        }
    };
    ranked.truncate(cli.limit);

    let report = Report {
        shape: cli.shape.to_string(),
        interline: cli.interline,
        candidates: ranked.into_iter().map(MatchRecord::from).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
