//! reviewfeed - Entry Point

use clap::Parser;
use reviewfeed::config::{self, ResolvedConfig};
use reviewfeed::integration::{simulate_scroll, ScrollReport};
use reviewfeed::model::AppError;
use reviewfeed::source::{synthetic_records, LocalReviewSource};
use reviewfeed::state::{ListSnapshot, ReviewsController};
use reviewfeed::view::{buffer_to_lines, ColorConfig, TerminalPreview};
use reviewfeed::view_state::{MonospaceMeasurer, TextMeasurer};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Extra time granted to each fetch on top of the configured latency.
const FETCH_GRACE: Duration = Duration::from_secs(10);

/// reviewfeed - scroll a paginated review feed headlessly
#[derive(Parser, Debug)]
#[command(name = "reviewfeed")]
#[command(version)]
#[command(about = "Load a review feed page by page and preview its row layout")]
pub struct Args {
    /// JSON file with an array of reviews or a page object (synthetic data if omitted)
    pub file: Option<PathBuf>,

    /// Number of synthetic reviews when no file is given
    #[arg(short = 'n', long, default_value = "45")]
    pub count: usize,

    /// Viewport width in points
    #[arg(long)]
    pub width: Option<f64>,

    /// Viewport height in points
    #[arg(long)]
    pub height: Option<f64>,

    /// Records per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Simulated fetch latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Fail every N-th fetch (0 disables)
    #[arg(long, default_value = "0")]
    pub fail_every: usize,

    /// Maximum number of scroll gestures
    #[arg(long, default_value = "1000")]
    pub max_steps: usize,

    /// Print the viewport as text after loading
    #[arg(long)]
    pub preview: bool,

    /// Scroll offset of the preview in points
    #[arg(long, default_value = "0")]
    pub offset: f64,

    /// Print a line every time the list changes
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("reviewfeed: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Resolve configuration with full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;
    let resolved = config::apply_cli_overrides(
        with_env,
        args.page_size.map(|n| n as usize),
        args.latency_ms,
        args.width,
        args.height,
    );
    resolved.validate()?;
    Ok(resolved)
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    reviewfeed::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let source = match &args.file {
        Some(path) => LocalReviewSource::open(path)?,
        None => LocalReviewSource::new(synthetic_records(args.count)),
    }
    .with_latency(config.fetch_latency())
    .with_failure_every(args.fail_every);

    let measurer: Arc<dyn TextMeasurer> = Arc::new(MonospaceMeasurer::default());
    let mut controller = ReviewsController::new(source, measurer, config.list_settings());

    if args.verbose {
        controller.set_observer(|snapshot: &ListSnapshot| {
            let total = snapshot
                .total_count()
                .map_or_else(|| "?".to_string(), |n| n.to_string());
            match snapshot.last_error() {
                Some(err) => println!(
                    "loaded {}/{} (last load failed: {})",
                    snapshot.count(),
                    total,
                    err
                ),
                None => println!("loaded {}/{}", snapshot.count(), total),
            }
        });
    }

    let viewport = config.viewport();
    let wait = config.fetch_latency() + FETCH_GRACE;
    let report = simulate_scroll(&mut controller, viewport, args.max_steps, wait);
    print_report(&report, &config);

    if args.preview {
        let colors = ColorConfig::from_env_and_args(args.no_color);
        let buffer = TerminalPreview::new(colors).render(
            &controller,
            viewport.width,
            args.offset.max(0.0),
            viewport.height,
        );
        println!();
        for line in buffer_to_lines(&buffer) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn print_report(report: &ScrollReport, config: &ResolvedConfig) {
    println!(
        "Loaded {} reviews in {} fetches ({} failed) over {} scroll steps",
        report.item_count, report.fetches_issued, report.failures, report.steps
    );
    println!(
        "Content height at {}pt: {}pt",
        config.viewport_width, report.content_height
    );
    if report.exhausted {
        println!("Feed fully loaded");
    } else if report.timed_out {
        println!("Stopped: a fetch did not complete in time");
    } else {
        println!("Stopped before the end of the feed");
    }
    if let Some(err) = &report.last_error {
        println!("Last error: {}", err);
    }
}
