use analyzer::Analyzer;
use anyhow::Context;
use charts::ChartRenderer;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, LogFormat, init_tracing, load_config};
use generator::SyntheticGenerator;
use std::fs;
use std::path::PathBuf;
use storage::CsvRepository;

mod console;

/// The main entry point for the revenue EDA application.
fn main() -> anyhow::Result<()> {
    // A .env file is optional; REVENUE_EDA__* and RUST_LOG may come from it.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    let command = cli.command.unwrap_or(Commands::Run(RunArgs::default()));
    command.apply(&mut config);
    config.validate().context("Invalid configuration after CLI overrides")?;

    // Held until exit so the file writer flushes.
    let _guard = init_tracing(&config.logging).context("Failed to initialize logging")?;

    match command {
        Commands::Generate(_) => handle_generate(&config),
        Commands::Analyze(_) => handle_analyze(&config),
        Commands::Run(_) => {
            handle_generate(&config)?;
            handle_analyze(&config)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Generates a synthetic daily revenue series and runs an exploratory analysis on it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides the configured stdout log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the raw CSV from the seeded generator.
    Generate(GenerateArgs),
    /// Analyze the raw CSV: restore the calendar, flag anomalies, write the clean CSV and charts.
    Analyze(AnalyzeArgs),
    /// Generate, then analyze.
    Run(RunArgs),
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Random seed of the generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Calendar year to generate.
    #[arg(long)]
    year: Option<i32>,

    /// Where to write the raw CSV.
    #[arg(long)]
    raw: Option<PathBuf>,
}

#[derive(Args, Default)]
struct AnalyzeArgs {
    /// The raw CSV to analyze.
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Where to write the restored series.
    #[arg(long)]
    clean: Option<PathBuf>,

    /// Also write the analysis report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip chart rendering.
    #[arg(long)]
    no_charts: bool,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Random seed of the generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Calendar year to generate.
    #[arg(long)]
    year: Option<i32>,

    #[command(flatten)]
    analyze: AnalyzeArgs,
}

impl Commands {
    /// Folds the command-line overrides into the loaded configuration.
    fn apply(&self, config: &mut Config) {
        match self {
            Commands::Generate(args) => {
                if let Some(seed) = args.seed {
                    config.generator.seed = seed;
                }
                if let Some(year) = args.year {
                    config.generator.year = year;
                }
                if let Some(raw) = &args.raw {
                    config.paths.raw_data = raw.clone();
                }
            }
            Commands::Analyze(args) => args.apply(config),
            Commands::Run(args) => {
                if let Some(seed) = args.seed {
                    config.generator.seed = seed;
                }
                if let Some(year) = args.year {
                    config.generator.year = year;
                }
                args.analyze.apply(config);
            }
        }
    }
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(raw) = &self.raw {
            config.paths.raw_data = raw.clone();
        }
        if let Some(clean) = &self.clean {
            config.paths.clean_data = clean.clone();
        }
        if self.report.is_some() {
            config.paths.report = self.report.clone();
        }
        if self.no_charts {
            config.charts.enabled = false;
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Generates the raw series and writes it, replacing any previous file.
fn handle_generate(config: &Config) -> anyhow::Result<()> {
    let generated = SyntheticGenerator::new(config.generator.clone())
        .generate()
        .context("Failed to generate the synthetic series")?;

    let path = &config.paths.raw_data;
    CsvRepository::new()
        .save_series(path, &generated.series)
        .context("Failed to write the raw series")?;

    tracing::info!(rows = generated.series.len(), "Raw data saved to {}", path.display());
    console::print_generation(&generated, path);
    Ok(())
}

/// Runs the analysis steps in order against the configured raw CSV.
fn handle_analyze(config: &Config) -> anyhow::Result<()> {
    let repo = CsvRepository::new();
    let analyzer = Analyzer::new(config.analysis.clone());
    let renderer = config
        .charts
        .enabled
        .then(|| ChartRenderer::new(&config.charts));

    // 1. Load & describe
    let raw = repo
        .load_series(&config.paths.raw_data)
        .context("Failed to load the raw series")?;
    let overview = analyzer.overview(&raw)?;
    console::print_overview(&overview);

    // 2. Raw plot
    if let Some(renderer) = &renderer {
        renderer
            .render_raw_series(&config.charts.raw_chart, &raw)
            .context("Failed to render the raw series chart")?;
    }

    // 3-5. Calendar validation, restoration and anomaly detection
    let prepared = analyzer.prepare(&raw)?;
    console::print_calendar(&prepared.calendar);
    console::print_anomalies(&prepared.anomalies);

    if let Some(renderer) = &renderer {
        renderer
            .render_anomalies(
                &config.charts.anomaly_chart,
                &prepared.restored,
                &prepared.anomalies,
            )
            .context("Failed to render the anomaly chart")?;
    }

    // 6. Persistence
    let clean_path = &config.paths.clean_data;
    repo.save_series(clean_path, &prepared.restored)
        .context("Failed to write the clean series")?;
    tracing::info!(
        rows = prepared.restored.len(),
        "Clean data saved to {}",
        clean_path.display()
    );

    // 7. Reload & compare
    let clean = repo
        .load_series(clean_path)
        .context("Failed to reload the clean series")?;
    let comparison = analyzer.compare(&raw, &clean);
    console::print_comparison(&comparison);

    // 8. Trend
    let trend = analyzer.trend(&clean)?;
    if let Some(renderer) = &renderer {
        renderer
            .render_trend(
                &config.charts.trend_chart,
                &trend,
                analyzer.settings().rolling_window,
            )
            .context("Failed to render the trend chart")?;
    }

    // 9. Report
    if let Some(path) = &config.paths.report {
        let report = analyzer.report(overview, &prepared, comparison);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write the report to {}", path.display()))?;
        tracing::info!("Report saved to {}", path.display());
    }

    tracing::info!("Analysis complete");
    Ok(())
}
