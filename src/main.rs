// pdf-wordviz - word frequencies of a PDF, in the browser or the terminal
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use pdf_wordviz::render::{plain, Reporter};
use pdf_wordviz::server::{self, AppState};
use pdf_wordviz::{analyze_file, VizConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: ./wordviz.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the upload page and reports over HTTP
    Serve {
        /// Listen address, overrides the config file
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Analyze one PDF and write a report
    Analyze {
        pdf_file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rows of the frequency table in text output
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("pdf_wordviz=info")).init();

    let args = Args::parse();
    let mut config = VizConfig::load(args.config.as_deref()).context("Failed to load config")?;

    match args.command {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            server::serve(AppState::new(config))
        }
        Command::Analyze { pdf_file, format, output, top } => {
            let report = run_analyze(&config, &pdf_file, format, top)?;
            match output {
                Some(path) => {
                    fs::write(&path, report).with_context(|| format!("Cannot write '{}'", path.display()))?;
                    log::info!("Report written to {}", path.display());
                }
                None => print!("{}", report),
            }
            Ok(())
        }
    }
}

fn run_analyze(config: &VizConfig, pdf_file: &Path, format: Format, top: usize) -> Result<String> {
    let analysis = analyze_file(pdf_file, &config.analysis)
        .with_context(|| format!("Cannot analyze '{}'", pdf_file.display()))?;

    Ok(match format {
        Format::Text => plain::text_report(&analysis, top),
        Format::Json => serde_json::to_string_pretty(&analysis)? + "\n",
        Format::Html => Reporter::new(config).standalone(&analysis)?,
    })
}
