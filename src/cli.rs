use crate::{
    analysis::{correlation_by_timing, error_curves_by_retention, TimingCorrelation},
    clock::pll::{compute_frequencies, sweep_multipliers, trcd_cycles_to_ns, ClockConfig},
    config::Config,
    data::{load_table, DatasetDescriptor},
    render::{self, ChartSize},
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config/analysis.toml";

/// PLL arithmetic and retention-test analysis for SoftMC DRAM experiments.
#[derive(Parser, Debug)]
#[command(name = "dramlab", version, about)]
pub struct Cli {
    /// Config file (TOML).
    #[arg(short, long, global = true, env = "DRAMLAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the DDR and fabric clock of a PLL setting
    Pll(PllArgs),
    /// Plot error % over tRCD, one series per retention time
    Curves(CurvesArgs),
    /// Correlate errors with retention time per tRCD and print the trend
    Correlate(CorrelateArgs),
}

#[derive(Args, Debug, Default)]
pub struct PllArgs {
    /// Input clock in MHz
    #[arg(long)]
    pub base_clk: Option<f64>,
    /// CLKFBOUT_MULT
    #[arg(long)]
    pub mult: Option<f64>,
    /// DIVCLK_DIVIDE
    #[arg(long)]
    pub divclk_divide: Option<f64>,
    /// CLKOUT_DIVIDE
    #[arg(long)]
    pub clkout_divide: Option<f64>,
    /// Evaluate every multiplier in a range, e.g. `6..=10`
    #[arg(long, value_parser = parse_mult_range)]
    pub sweep: Option<RangeInclusive<u32>>,
    /// Print tRCD in ns for 1..=N cycles of the fabric clock
    #[arg(long, conflicts_with = "sweep")]
    pub trcd_cycles: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub struct CurvesArgs {
    /// Measurement CSVs; replaces the datasets listed in the config
    pub datasets: Vec<PathBuf>,
    /// Retention times in seconds, comma separated
    #[arg(long, value_delimiter = ',')]
    pub buckets: Vec<f64>,
    /// Output directory for the charts
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct CorrelateArgs {
    /// Measurement CSVs; replaces the datasets listed in the config
    pub datasets: Vec<PathBuf>,
    /// Output directory for the charts
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn parse_mult_range(s: &str) -> Result<RangeInclusive<u32>, String> {
    let (lo, hi) = s
        .split_once("..=")
        .or_else(|| s.split_once('-'))
        .ok_or_else(|| format!("expected A..=B, got `{s}`"))?;
    let lo: u32 = lo.trim().parse().map_err(|e| format!("bad range start: {e}"))?;
    let hi: u32 = hi.trim().parse().map_err(|e| format!("bad range end: {e}"))?;
    if lo > hi {
        return Err(format!("empty range {lo}..={hi}"));
    }
    Ok(lo..=hi)
}

pub fn run(cli: Cli, cfg: Config) -> Result<()> {
    match cli.command {
        Command::Pll(args) => pll(&cfg, &args),
        Command::Curves(args) => {
            let datasets = select_datasets(&cfg, &args.datasets)?;
            let buckets = if args.buckets.is_empty() {
                cfg.analysis.retention_buckets.clone()
            } else {
                args.buckets
            };
            let out = args.out.unwrap_or_else(|| cfg.plot.output_dir.clone());
            curves(&datasets, &buckets, &out, cfg.plot.size).map(|_| ())
        }
        Command::Correlate(args) => {
            let datasets = select_datasets(&cfg, &args.datasets)?;
            let out = args.out.unwrap_or_else(|| cfg.plot.output_dir.clone());
            for result in correlate(&datasets, &out, cfg.plot.size)? {
                println!("{result}");
            }
            Ok(())
        }
    }
}

fn select_datasets(cfg: &Config, paths: &[PathBuf]) -> Result<Vec<DatasetDescriptor>> {
    let datasets: Vec<DatasetDescriptor> = if paths.is_empty() {
        cfg.datasets.clone()
    } else {
        paths.iter().map(DatasetDescriptor::new).collect()
    };
    if datasets.is_empty() {
        bail!("no datasets: pass CSV paths or list [[datasets]] in the config");
    }
    Ok(datasets)
}

fn pll(cfg: &Config, args: &PllArgs) -> Result<()> {
    let clock = ClockConfig {
        base_clk: args.base_clk.unwrap_or(cfg.clock.base_clk),
        clkfbout_mult: args.mult.unwrap_or(cfg.clock.clkfbout_mult),
        divclk_divide: args.divclk_divide.unwrap_or(cfg.clock.divclk_divide),
        clkout_divide: args.clkout_divide.unwrap_or(cfg.clock.clkout_divide),
    };

    if let Some(range) = &args.sweep {
        println!("mult, ddr_clk, fabric_clk");
        for (mult, f) in sweep_multipliers(&clock, range.clone())? {
            println!("{mult}, {}, {}", f.ddr_clk, f.fabric_clk);
        }
        return Ok(());
    }

    let f = compute_frequencies(&clock).context("invalid PLL configuration")?;
    println!("{}", f.ddr_clk);
    println!("{}", f.fabric_clk);

    if let Some(max_cycles) = args.trcd_cycles {
        for cycles in 1..=max_cycles {
            println!("tRCD {cycles} cycles = {} ns", trcd_cycles_to_ns(cycles, f.fabric_clk)?);
        }
    }
    Ok(())
}

/// Renders one error-curve chart per dataset; returns the written files.
pub fn curves(
    datasets: &[DatasetDescriptor],
    buckets: &[f64],
    out_dir: &Path,
    size: ChartSize,
) -> Result<Vec<PathBuf>> {
    render::ensure_output_dir(out_dir)?;
    let mut written = Vec::with_capacity(datasets.len());
    for descriptor in datasets {
        let table = load_table(descriptor)?;
        if table.is_empty() {
            tracing::warn!("{} has no rows; chart will be empty", table.source().display());
        }
        let curves = error_curves_by_retention(&table, buckets);
        let out = out_dir.join(format!("{}_curves.svg", file_stem(&descriptor.path)));
        render::render_error_curves(&out, &table.label().title(), &curves, size)
            .with_context(|| format!("rendering curves for {}", descriptor.path.display()))?;
        written.push(out);
    }
    Ok(written)
}

/// Correlates every dataset and draws one chart per manufacturer.
pub fn correlate(
    datasets: &[DatasetDescriptor],
    out_dir: &Path,
    size: ChartSize,
) -> Result<Vec<TimingCorrelation>> {
    let mut results = Vec::with_capacity(datasets.len());
    for descriptor in datasets {
        let table = load_table(descriptor)?;
        let result = correlation_by_timing(&table)
            .with_context(|| format!("correlating {}", descriptor.path.display()))?;
        info!(
            "{} ({}): {} tRCD values, r = {:.4}",
            result.label,
            table.source().display(),
            result.series.len(),
            result.summary.coefficient
        );
        results.push(result);
    }

    render::ensure_output_dir(out_dir)?;
    let mut groups: Vec<(&str, Vec<&TimingCorrelation>)> = Vec::new();
    for result in &results {
        let name = result.label.manufacturer.as_str();
        match groups.iter_mut().find(|(m, _)| *m == name) {
            Some((_, members)) => members.push(result),
            None => groups.push((name, vec![result])),
        }
    }
    for (manufacturer, members) in groups {
        let series: Vec<(String, _)> = members
            .into_iter()
            .map(|r| (r.label.to_string(), &r.series))
            .collect();
        let out = out_dir.join(format!("{manufacturer}_correlation.svg"));
        let title = format!("Correlation between retention time and errors, {manufacturer}");
        render::render_correlation(&out, &title, &series, size)
            .with_context(|| format!("rendering correlation chart for {manufacturer}"))?;
    }
    Ok(results)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".into())
}
