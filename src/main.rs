use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};

use doc_markdown_builder::{BatchDriver, Config, MarkdownProcessor, XmlSource};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Sphinx XML build output to Markdown", long_about = None)]
struct Args {
    /// Directory holding the XML build output (overrides DOCS_XML_DIR)
    #[arg(short = 'i', long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the Markdown files (overrides MD_OUTPUT_DIR)
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Files converted at the same time (overrides MAX_CONCURRENT_FILES)
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// trace, debug, info, warn or error (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the block/node outline of every converted document
    #[arg(long)]
    print_structure: bool,

    /// Include text previews and code details in the outline
    #[arg(short, long)]
    verbose: bool,

    /// Write a JSON report of converted, skipped and failed files
    #[arg(long)]
    report: Option<PathBuf>,
}

fn init_logging(log_level: &str) {
    let level = log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(input_dir) = args.input_dir {
        config.paths.input_dir = input_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.paths.output_dir = output_dir;
    }
    if let Some(concurrency) = args.concurrency {
        config.processing.max_concurrent_files = concurrency;
    }
    if let Some(log_level) = args.log_level {
        config.processing.log_level = log_level;
    }

    init_logging(&config.processing.log_level);

    std::fs::create_dir_all(&config.paths.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.paths.output_dir.display()
        )
    })?;

    let processor = if args.print_structure {
        MarkdownProcessor::with_structure(args.verbose)
    } else {
        MarkdownProcessor::new()
    };

    let driver = BatchDriver::new(
        XmlSource::new(&config.paths.input_dir),
        &config.paths.output_dir,
        Box::new(processor),
    )
    .with_concurrency(config.processing.max_concurrent_files);

    let report = driver.run().await?;

    if let Some(report_path) = &args.report {
        std::fs::write(report_path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        info!("Report saved to: {}", report_path.display());
    }

    if report.has_failures() {
        warn!("{} of {} files failed", report.failed.len(), report.total());
    }
    info!(
        "Markdown conversion complete: {} converted, {} skipped, {} failed. Files saved to {}",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len(),
        config.paths.output_dir.display()
    );

    Ok(())
}
