mod cli;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schemakernel", about = "Circuit schematic renderer: script to placement, routing and SVG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG applies otherwise.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run an instruction script and write the schematic.
    Render {
        /// Path to the instruction script.
        script: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Render config YAML.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the JSON snapshot instead of SVG.
        #[arg(long)]
        json: bool,
    },
    /// List supported component types with their pins.
    Symbols,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            script,
            output,
            config,
            json,
        } => cli::render::run(&script, output.as_deref(), config.as_deref(), json),
        Command::Symbols => cli::symbols::run(),
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}
