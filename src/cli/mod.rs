pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ksimply")]
#[command(about = "Find recipes your hardware can run", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze which recipes run on your hardware
    Analyze {
        /// GPU name from the registry (see `ksimply gpus`)
        #[arg(long, conflicts_with = "vram")]
        gpu: Option<String>,
        /// GPU memory, e.g. "12" or "12GB"
        #[arg(long)]
        vram: Option<String>,
        /// System memory (optional, will auto-detect if not provided)
        #[arg(long)]
        ram: Option<String>,
        /// Storage kind: hdd, ssd or nvme
        #[arg(long, default_value = "ssd")]
        storage: String,
        /// Catalog JSON file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<String>,
        /// Configuration JSON file
        #[arg(long)]
        config: Option<String>,
        /// Save the report to a JSON file
        #[arg(long)]
        output: Option<String>,
        /// Save the report under the configured report directory
        #[arg(long)]
        save: bool,
        /// Print results as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List known GPUs
    Gpus,
    /// List base models in the catalog
    Models {
        /// Catalog JSON file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Print or save the default configuration
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            gpu,
            vram,
            ram,
            storage,
            catalog,
            config,
            output,
            save,
            json,
        } => commands::analyze(commands::AnalyzeArgs {
            gpu,
            vram,
            ram,
            storage,
            catalog,
            config,
            output,
            save,
            json,
        }),
        Commands::Gpus => commands::gpus(),
        Commands::Models { catalog } => commands::models(catalog),
        Commands::Config { output } => commands::config(output),
    }
}
