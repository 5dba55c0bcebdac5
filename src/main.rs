use chrono::NaiveDate;
use clap::Parser;
use smartspend_report::{
    ChartSlot, FileExporter, FilesystemResourceProvider, JsonFileSource, Locale, RenderedSurface,
    ReportConfig, ReportError, ReportPeriod, ReportPipeline, ReportSource,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Builds the SmartSpend monthly financial report PDF.
#[derive(Parser, Debug)]
#[command(name = "smartspend-report", version, about)]
struct Cli {
    /// Saved report-data JSON payload.
    #[arg(long, value_name = "JSON", required_unless_present = "api_url", conflicts_with = "api_url")]
    data: Option<PathBuf>,

    /// API root of the SmartSpend backend, e.g. http://localhost:8080/api/v1
    #[arg(long, value_name = "URL", requires = "account_id")]
    api_url: Option<String>,

    #[arg(long, value_name = "ID")]
    account_id: Option<i64>,

    /// Bearer token sent to the backend.
    #[arg(long)]
    token: Option<String>,

    #[arg(long)]
    year: i32,

    #[arg(long)]
    month: u32,

    /// Rendered chart image, in gallery order. Repeatable.
    #[arg(long = "chart", value_name = "IMAGE")]
    charts: Vec<PathBuf>,

    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// en or es
    #[arg(long)]
    locale: Option<Locale>,

    /// Report configuration JSON.
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Date printed in the footer (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    generated_on: Option<NaiveDate>,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Fail instead of replacing an existing report file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{0}")]
    Usage(String),
}

fn source_for(cli: &Cli) -> Result<Arc<dyn ReportSource>, CliError> {
    if let Some(path) = &cli.data {
        return Ok(Arc::new(JsonFileSource::new(path)));
    }
    match &cli.api_url {
        #[cfg(feature = "http")]
        Some(url) => {
            let mut source = smartspend_report::HttpReportSource::new(url.as_str());
            if let Some(token) = &cli.token {
                source = source.with_token(token.as_str());
            }
            Ok(Arc::new(source))
        }
        #[cfg(not(feature = "http"))]
        Some(_) => Err(CliError::Usage(
            "--api-url needs the `http` feature; use --data instead".to_string(),
        )),
        None => Err(CliError::Usage("either --data or --api-url is required".to_string())),
    }
}

/// Each chart file becomes a slot. Unreadable files fail their slot so the
/// gallery reports them like any other chart that never became ready.
async fn chart_slots(paths: &[PathBuf]) -> Vec<ChartSlot> {
    let mut slots = Vec::with_capacity(paths.len());
    for path in paths {
        match tokio::fs::read(path).await {
            Ok(bytes) => slots.push(ChartSlot::ready(RenderedSurface::from_encoded(bytes))),
            Err(e) => {
                let (slot, readiness) = ChartSlot::pending();
                readiness.fail(format!("{}: {}", path.display(), e));
                slots.push(slot);
            }
        }
    }
    slots
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }
    if let Some(date) = cli.generated_on {
        config = config.with_generated_on(date);
    }

    let period = ReportPeriod::new(cli.year, cli.month)?;
    let mut builder = ReportPipeline::builder()
        .with_source(source_for(&cli)?)
        .with_exporter(Arc::new(FileExporter::new(&cli.out_dir).overwrite(!cli.no_overwrite)));

    if let Some(logo) = &cli.logo {
        let (provider, name) = FilesystemResourceProvider::for_file(logo)
            .ok_or_else(|| CliError::Usage(format!("--logo '{}' is not a file path", logo.display())))?;
        config = config.with_logo(name);
        builder = builder.with_resources(Arc::new(provider));
    }

    let pipeline = builder.with_config(config).build()?;
    let slots = chart_slots(&cli.charts).await;
    let report = pipeline.run(cli.account_id.unwrap_or_default(), period, slots).await?;

    for reason in &report.diagnostics.skipped {
        println!("  skipped: {}", reason);
    }
    println!(
        "Successfully generated {} ({} page(s), balance {})",
        report.path.display(),
        report.page_count,
        report.summary.balance()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
