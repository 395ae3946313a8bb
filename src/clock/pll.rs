use super::ClockError;
use crate::util::cycles_to_ns;
use serde::Deserialize;
use std::ops::RangeInclusive;

/// MMCM/PLL parameters of the memory controller design.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Input clock (MHz).
    pub base_clk: f64,
    pub clkfbout_mult: f64,
    pub divclk_divide: f64,
    pub clkout_divide: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockFrequencies {
    pub ddr_clk: f64,
    pub fabric_clk: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_clk: 200.0,
            clkfbout_mult: 10.0,
            divclk_divide: 1.0,
            clkout_divide: 4.0,
        }
    }
}

impl ClockConfig {
    pub fn with_mult(self, clkfbout_mult: f64) -> Self {
        Self {
            clkfbout_mult,
            ..self
        }
    }
}

pub fn compute_frequencies(cfg: &ClockConfig) -> Result<ClockFrequencies, ClockError> {
    let divisor = cfg.divclk_divide * cfg.clkout_divide;
    if divisor == 0.0 {
        return Err(ClockError::DivisionByZero {
            what: "divclk_divide * clkout_divide",
        });
    }
    let ddr_clk = cfg.base_clk * cfg.clkfbout_mult / divisor;
    Ok(ClockFrequencies {
        ddr_clk,
        fabric_clk: ddr_clk / 2.0,
    })
}

/// tRCD as the firmware logs it: cycles of the fabric clock, in ns.
pub fn trcd_cycles_to_ns(cycles: u32, fabric_clk_mhz: f64) -> Result<f64, ClockError> {
    cycles_to_ns(cycles, fabric_clk_mhz).ok_or(ClockError::DivisionByZero {
        what: "fabric clock",
    })
}

pub fn sweep_multipliers(
    base: &ClockConfig,
    mults: RangeInclusive<u32>,
) -> Result<Vec<(u32, ClockFrequencies)>, ClockError> {
    mults
        .map(|mult| {
            let freqs = compute_frequencies(&base.with_mult(mult as f64))?;
            tracing::debug!(
                mult,
                ddr_clk = freqs.ddr_clk,
                fabric_clk = freqs.fabric_clk,
                "evaluated PLL setting"
            );
            Ok((mult, freqs))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(base_clk: f64, mult: f64, divclk: f64, clkout: f64) -> ClockConfig {
        ClockConfig {
            base_clk,
            clkfbout_mult: mult,
            divclk_divide: divclk,
            clkout_divide: clkout,
        }
    }

    #[test]
    fn default_setting_gives_500_and_250() {
        let f = compute_frequencies(&cfg(200.0, 10.0, 1.0, 4.0)).unwrap();
        assert_eq!(f.ddr_clk, 500.0);
        assert_eq!(f.fabric_clk, 250.0);
        assert_eq!(compute_frequencies(&ClockConfig::default()).unwrap(), f);
    }

    #[test]
    fn controller_reset_setting_gives_800_and_400() {
        let f = compute_frequencies(&cfg(400.0, 6.0, 1.0, 3.0)).unwrap();
        assert_eq!(f.ddr_clk, 800.0);
        assert_eq!(f.fabric_clk, 400.0);
    }

    #[test]
    fn fabric_is_half_of_ddr() {
        for (b, m, d, o) in [
            (200.0, 7.0, 1.0, 4.0),
            (400.0, 9.0, 2.0, 3.0),
            (133.3, 11.0, 3.0, 7.0),
            (100.0, 64.0, 5.0, 1.5),
        ] {
            let f = compute_frequencies(&cfg(b, m, d, o)).unwrap();
            assert_eq!(f.ddr_clk, b * m / (d * o));
            assert_eq!(f.fabric_clk, f.ddr_clk / 2.0);
        }
    }

    #[test]
    fn zero_divider_is_rejected() {
        for c in [cfg(200.0, 10.0, 0.0, 4.0), cfg(200.0, 10.0, 1.0, 0.0)] {
            assert!(matches!(
                compute_frequencies(&c),
                Err(ClockError::DivisionByZero { .. })
            ));
        }
    }

    #[test]
    fn trcd_conversion_matches_firmware_table() {
        // mult 8 with base 400 and divide 1/4: fabric clock 400 MHz
        let f = compute_frequencies(&cfg(400.0, 8.0, 1.0, 4.0)).unwrap();
        assert_eq!(f.fabric_clk, 400.0);
        assert_eq!(trcd_cycles_to_ns(1, f.fabric_clk).unwrap(), 2.5);
        assert_eq!(trcd_cycles_to_ns(4, f.fabric_clk).unwrap(), 10.0);
        assert!(trcd_cycles_to_ns(4, 0.0).is_err());
    }

    #[test]
    fn sweep_covers_every_multiplier() {
        let rows = sweep_multipliers(&cfg(200.0, 1.0, 1.0, 4.0), 6..=10).unwrap();
        let mults: Vec<u32> = rows.iter().map(|(m, _)| *m).collect();
        assert_eq!(mults, vec![6, 7, 8, 9, 10]);
        assert_eq!(rows[4].1.ddr_clk, 500.0);
        assert_eq!(rows[0].1.fabric_clk, 150.0);
    }

    #[test]
    fn sweep_propagates_invalid_divider() {
        assert!(sweep_multipliers(&cfg(200.0, 1.0, 1.0, 0.0), 6..=7).is_err());
    }
}
