//! `glean` CLI - extract text from PDFs and scanned images, analyze it for
//! social-media engagement, and write content-analysis reports.

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use glean::ExtractMode;

#[derive(Parser)]
#[command(name = "glean")]
#[command(about = "Document text extractor and engagement analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Extraction path override.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ModeArg {
    /// Detect PDF vs image from the file contents
    #[default]
    Auto,
    /// Force the PDF text-layer path
    Pdf,
    /// Force the OCR path
    Image,
}

impl From<ModeArg> for ExtractMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => ExtractMode::Auto,
            ModeArg::Pdf => ExtractMode::Pdf,
            ModeArg::Image => ExtractMode::Image,
        }
    }
}

/// Output format for `analyze`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum AnalyzeOutputFormat {
    /// Human-readable statistics
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF or scanned image
    Extract {
        /// Document to process
        file: PathBuf,

        /// Force an extraction path instead of auto-detecting
        #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// OCR language hint (e.g. "eng", "eng+fin")
        #[arg(short, long)]
        lang: Option<String>,

        /// Save extracted text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract text and print engagement statistics and suggestions
    Analyze {
        /// Document to process
        file: PathBuf,

        /// Force an extraction path instead of auto-detecting
        #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// OCR language hint (e.g. "eng", "eng+fin")
        #[arg(short, long)]
        lang: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = AnalyzeOutputFormat::Text)]
        format: AnalyzeOutputFormat,
    },

    /// Extract, analyze, and write the content-analysis report
    Report {
        /// Document to process
        file: PathBuf,

        /// Force an extraction path instead of auto-detecting
        #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// OCR language hint (e.g. "eng", "eng+fin")
        #[arg(short, long)]
        lang: Option<String>,

        /// Report path (default: ./content-analysis-report.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            mode,
            lang,
            output,
        } => {
            cmd::extract::cmd_extract(&file, mode.into(), lang.as_deref(), output).await?;
        }
        Commands::Analyze {
            file,
            mode,
            lang,
            format,
        } => {
            cmd::analyze::cmd_analyze(&file, mode.into(), lang.as_deref(), format).await?;
        }
        Commands::Report {
            file,
            mode,
            lang,
            output,
        } => {
            cmd::report::cmd_report(&file, mode.into(), lang.as_deref(), output).await?;
        }
    }

    Ok(())
}
