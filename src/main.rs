use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use powermix::{
    build_charts, compute_slice, config::DashboardConfig, export, load_sheet, DashboardView,
    SourceTable, YearSelector,
};
use serde::Serialize;
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Electricity generation by source: reshape a databank sheet and slice it by year"
)]
struct Args {
    /// YAML dashboard config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Spreadsheet to load (.xlsx, .xls, .ods or .csv)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Worksheet name (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the selectable years as slider stops
    Years,
    /// Print the source values and trend rows for one year
    Slice {
        #[arg(short, long)]
        year: i32,
    },
    /// Print (or write) the chart payload for one year
    Chart {
        /// Defaults to the earliest year
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write the reshaped table to Parquet
    Export {
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries JSON, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(input) = args.input {
        cfg.input = input;
    }
    if args.sheet.is_some() {
        cfg.sheet = args.sheet;
    }
    let palette = cfg.palette()?;

    // ─── 3) load table once ──────────────────────────────────────────
    let table: SourceTable = load_sheet(&cfg.input, cfg.sheet.as_deref())
        .with_context(|| format!("loading {}", cfg.input.display()))?;
    let selector = YearSelector::new(&table);

    // ─── 4) run command ──────────────────────────────────────────────
    match args.command {
        Command::Years => print_json(&selector)?,

        Command::Slice { year } => {
            let year = selector.select(year)?;
            let slice = compute_slice(&table, year)?;
            print_json(&slice)?;
        }

        Command::Chart { year, out } => {
            let year = selector.select(year.unwrap_or(selector.value))?;
            let slice = compute_slice(&table, year)?;
            let view = DashboardView {
                title: cfg.title.clone(),
                attribution: cfg.attribution.clone(),
                selector: YearSelector {
                    value: year,
                    ..selector.clone()
                },
                figure: build_charts(&slice, &palette),
            };
            match out {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&view)?;
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(year, path = %path.display(), "wrote chart payload");
                }
                None => print_json(&view)?,
            }
        }

        Command::Export { out } => {
            export::write_parquet(&table, &out)
                .with_context(|| format!("exporting to {}", out.display()))?;
        }
    }

    Ok(())
}
