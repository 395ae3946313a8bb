use crate::{
    analysis::default_retention_buckets, clock::pll::ClockConfig, data::DatasetDescriptor,
    render::ChartSize,
};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct AnalysisCfg {
    /// Retention times (seconds) plotted as separate error curves.
    #[serde(default)]
    pub retention_buckets: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PlotCfg {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(flatten)]
    pub size: ChartSize,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub analysis: AnalysisCfg,
    #[serde(default)]
    pub plot: PlotCfg,
    #[serde(default)]
    pub datasets: Vec<DatasetDescriptor>,
}

impl Default for PlotCfg {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            size: ChartSize::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let buf = fs::read_to_string(path)?;
    Ok(toml::from_str::<Config>(&buf)?)
}

pub fn ensure_defaults(cfg: &mut Config) {
    if cfg.analysis.retention_buckets.is_empty() {
        tracing::info!("no retention buckets configured; using 0..=120 s in 20 s steps");
        cfg.analysis.retention_buckets = default_retention_buckets();
    }
    let min = ChartSize::MIN;
    if cfg.plot.size.width < min.width || cfg.plot.size.height < min.height {
        tracing::warn!(
            "chart size {}x{} too small; raising to at least {}x{}",
            cfg.plot.size.width,
            cfg.plot.size.height,
            min.width,
            min.height
        );
        cfg.plot.size.width = cfg.plot.size.width.max(min.width);
        cfg.plot.size.height = cfg.plot.size.height.max(min.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let cfg: Config = toml::from_str(
            r#"
            [clock]
            base_clk = 400.0
            clkfbout_mult = 6.0
            divclk_divide = 1.0
            clkout_divide = 3.0

            [analysis]
            retention_buckets = [0.0, 60.0]

            [plot]
            output_dir = "out"
            width = 800
            height = 600

            [[datasets]]
            path = "data/SamsungLong40xff.csv"

            [[datasets]]
            path = "data/SamsungLong40x0.csv"
            label = "hot, zeros"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.clock.base_clk, 400.0);
        assert_eq!(cfg.analysis.retention_buckets, vec![0.0, 60.0]);
        assert_eq!(cfg.plot.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.plot.size, ChartSize { width: 800, height: 600 });
        assert_eq!(cfg.datasets.len(), 2);
        assert_eq!(cfg.datasets[1].label.as_deref(), Some("hot, zeros"));
    }

    #[test]
    fn empty_config_gets_defaults() {
        let mut cfg: Config = toml::from_str("").unwrap();
        ensure_defaults(&mut cfg);

        assert_eq!(cfg.clock, ClockConfig::default());
        assert_eq!(cfg.analysis.retention_buckets, default_retention_buckets());
        assert_eq!(cfg.plot, PlotCfg::default());
        assert!(cfg.datasets.is_empty());
    }

    #[test]
    fn tiny_chart_is_raised() {
        let mut cfg: Config = toml::from_str("[plot]\nwidth = 10\nheight = 1000").unwrap();
        ensure_defaults(&mut cfg);
        assert_eq!(cfg.plot.size, ChartSize { width: ChartSize::MIN.width, height: 1000 });
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(load("/nonexistent/dramlab.toml").is_err());
    }
}
