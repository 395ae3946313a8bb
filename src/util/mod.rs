/// Nanoseconds in one microsecond; a clock in MHz ticks once every `NS_PER_US / mhz` ns.
pub const NS_PER_US: f64 = 1_000.0;

/// Period of a clock given in MHz, in nanoseconds.
pub fn mhz_to_period_ns(mhz: f64) -> Option<f64> {
    if mhz == 0.0 {
        return None;
    }
    Some(NS_PER_US / mhz)
}

pub fn cycles_to_ns(cycles: u32, mhz: f64) -> Option<f64> {
    mhz_to_period_ns(mhz).map(|period| cycles as f64 * period)
}

/// Total ordering on finite measurements; NaN sorts last.
pub fn cmp_f64(a: &f64, b: &f64) -> std::cmp::Ordering {
    a.total_cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_of_common_clocks() {
        assert_eq!(mhz_to_period_ns(100.0), Some(10.0));
        assert_eq!(mhz_to_period_ns(250.0), Some(4.0));
        assert_eq!(mhz_to_period_ns(0.0), None);
    }

    #[test]
    fn cycles_scale_with_period() {
        assert_eq!(cycles_to_ns(3, 200.0), Some(15.0));
        assert_eq!(cycles_to_ns(0, 200.0), Some(0.0));
        assert_eq!(cycles_to_ns(5, 0.0), None);
    }
}
