//! colcalc - a data grid with formula-derived columns

mod config;
mod error;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use colcalc_core::storage::{ExportFormat, export_to_path, write_sheet};
use colcalc_core::{Sheet, seed_sheet};

#[derive(Parser, Debug)]
#[command(
    name = "colcalc",
    version,
    about = "Data grid with formula-derived columns",
    after_help = "Formulas reference columns by position: c1 is the first column.\n\
                  Example: colcalc -c \"c2 * c3\" -p"
)]
struct Cli {
    /// Add a derived column (repeatable, applied in order)
    #[arg(short = 'c', long = "column", value_name = "FORMULA")]
    columns: Vec<String>,

    /// Export the sheet to FILE and exit (.csv for CSV, otherwise Markdown)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the sheet as Markdown and exit
    #[arg(short, long)]
    print: bool,

    /// Seed for the generated startup values
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (default: <config dir>/colcalc/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn headless(&self) -> bool {
        !self.columns.is_empty() || self.output.is_some() || self.print
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let seed = cli.seed.unwrap_or(config.seed);
    let mut sheet = seed_sheet(seed);

    if cli.headless() {
        return run_headless(&cli, &mut sheet);
    }

    run_front_end(sheet, &config)
}

/// Apply `-c` formulas, then export or print.
fn run_headless(cli: &Cli, sheet: &mut Sheet) -> anyhow::Result<()> {
    for formula in &cli.columns {
        sheet.add_derived_column(formula)?;
    }

    let snapshot = sheet.snapshot();
    if let Some(path) = &cli.output {
        export_to_path(path, &snapshot)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("Exported to {}", path.display());
    }
    if cli.print || cli.output.is_none() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_sheet(&mut out, &snapshot, ExportFormat::Markdown)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_front_end(sheet: Sheet, config: &config::Config) -> anyhow::Result<()> {
    let mut app = tui::App::new(sheet, config.col_width);
    tui::run(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_front_end(_sheet: Sheet, _config: &config::Config) -> anyhow::Result<()> {
    Err(error::AppError::NoFrontEnd.into())
}
