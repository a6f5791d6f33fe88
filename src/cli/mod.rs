use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "compliance-lens")]
#[command(about = "Feature compliance scoring workflow")]
#[command(long_about = "Compliance Lens takes a feature description through a staged compliance \
                       analysis and reports a risk score, status and recommended actions. \
                       Get started with 'compliance-lens analyze --sample 1'.")]
pub struct Cli {
    /// Emit JSON log lines
    #[arg(long, global = true, help = "Emit structured JSON logs instead of plain text")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a feature for compliance risk
    Analyze {
        /// Feature title
        #[arg(long, help = "Short title of the feature")]
        title: Option<String>,
        /// Feature description
        #[arg(long, help = "What the feature does, what data it touches")]
        description: Option<String>,
        /// Feature category
        #[arg(long, help = "One of: Content, Commerce, Safety, Analytics, Social")]
        category: Option<String>,
        /// Target region (repeatable)
        #[arg(long = "region", help = "Target region code, e.g. EU or US (repeatable)")]
        regions: Vec<String>,
        /// Relevant code snippet
        #[arg(long, help = "Optional code snippet to include")]
        code_snippet: Option<String>,
        /// Analysis mode
        #[arg(long, help = "Analysis mode: quick or deep")]
        mode: Option<String>,
        /// Confidence threshold
        #[arg(long, help = "Confidence threshold percentage (0-100)")]
        confidence: Option<u8>,
        /// Start from a bundled sample
        #[arg(long, help = "Load bundled sample feature 1 or 2 before applying other flags")]
        sample: Option<usize>,
        /// Seed for reproducible scores
        #[arg(long, help = "Seed the risk scorer for reproducible results")]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long, help = "Print the analysis result as JSON")]
        json: bool,
    },
    /// List the bundled sample features
    Samples,
    /// List the analysis stages in order
    Stages,
    /// Run several analyses in one session and summarize the history
    Demo {
        /// Number of runs
        #[arg(long, default_value = "3", help = "How many analyses to run")]
        runs: usize,
        /// Seed for reproducible scores
        #[arg(long, help = "Seed the risk scorer for reproducible results")]
        seed: Option<u64>,
    },
}
