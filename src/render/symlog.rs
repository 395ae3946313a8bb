/// Symmetric log scale: linear inside `±threshold`, log10 outside.
///
/// Scaled values are in units of the threshold, so the linear band maps to
/// [-1, 1] and every decade beyond it adds one unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymLog {
    threshold: f64,
}

impl SymLog {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.abs().max(f64::MIN_POSITIVE),
        }
    }

    pub fn forward(&self, v: f64) -> f64 {
        let a = v.abs();
        if a <= self.threshold {
            v / self.threshold
        } else {
            v.signum() * (1.0 + (a / self.threshold).log10())
        }
    }

    pub fn inverse(&self, s: f64) -> f64 {
        let a = s.abs();
        if a <= 1.0 {
            s * self.threshold
        } else {
            s.signum() * self.threshold * 10f64.powf(a - 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_band_and_decades() {
        let s = SymLog::new(0.01);
        assert_eq!(s.forward(0.0), 0.0);
        assert!((s.forward(0.005) - 0.5).abs() < 1e-12);
        assert!((s.forward(0.01) - 1.0).abs() < 1e-12);
        assert!((s.forward(100.0) - 5.0).abs() < 1e-12);
        assert!((s.forward(-1.0) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_recovers_tick_values() {
        let s = SymLog::new(0.01);
        assert!((s.inverse(5.0) - 100.0).abs() < 1e-9);
        assert!((s.inverse(0.5) - 0.005).abs() < 1e-12);
        assert!((s.inverse(s.forward(37.5)) - 37.5).abs() < 1e-9);
    }
}
