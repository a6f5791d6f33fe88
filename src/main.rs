use anyhow::Result;
use clap::Parser;

use compliance_lens::cli::commands::analyze::AnalyzeCommand;
use compliance_lens::cli::commands::demo::DemoCommand;
use compliance_lens::cli::commands::samples::SamplesCommand;
use compliance_lens::cli::commands::stages::StagesCommand;
use compliance_lens::cli::{Cli, Commands};
use compliance_lens::{config, init_telemetry, shutdown_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config()?;

    init_telemetry(
        &config.observability.log_level,
        cli.json_logs || config.observability.json_logs,
    )?;

    let outcome = match cli.command {
        // Default behavior: no subcommand - show how to get started
        None => {
            show_getting_started();
            Ok(())
        }
        Some(Commands::Analyze {
            title,
            description,
            category,
            regions,
            code_snippet,
            mode,
            confidence,
            sample,
            seed,
            json,
        }) => {
            let command = AnalyzeCommand {
                title,
                description,
                category,
                regions,
                code_snippet,
                mode,
                confidence,
                sample,
                seed,
                json,
            };
            tokio::runtime::Runtime::new()?.block_on(async { command.execute(config).await })
        }
        Some(Commands::Samples) => SamplesCommand.execute(),
        Some(Commands::Stages) => StagesCommand.execute(config),
        Some(Commands::Demo { runs, seed }) => {
            let command = DemoCommand { runs, seed };
            tokio::runtime::Runtime::new()?.block_on(async { command.execute(config).await })
        }
    };

    shutdown_telemetry();
    outcome
}

fn show_getting_started() {
    println!("🔍 Compliance Lens - feature compliance scoring");
    println!();
    println!("🎯 QUICK START:");
    println!("   → Try a sample:   compliance-lens analyze --sample 1");
    println!("   → Your feature:   compliance-lens analyze --title '...' --description '...' --category Content --region EU");
    println!("   → List samples:   compliance-lens samples");
    println!("   → See stages:     compliance-lens stages");
    println!("   → Session demo:   compliance-lens demo --runs 4");
}
