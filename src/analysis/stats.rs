use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson correlation of two equally long samples.
///
/// Returns `None` where the coefficient is undefined: fewer than two pairs or
/// a constant variable.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return None;
    }
    let n = x.len() as f64;
    let (kx, ky) = (pow2_scale(x), pow2_scale(y));
    let mx = x.iter().map(|a| a / kx).sum::<f64>() / n;
    let my = y.iter().map(|b| b / ky).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a / kx - mx;
        let dy = b / ky - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let den = (sxx * syy).sqrt();
    if den > 0.0 {
        Some((sxy / den).clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Two-sided p-value of a Pearson coefficient `r` over `n` pairs, from the
/// Student t distribution with `n - 2` degrees of freedom.
pub fn pearson_p_value(r: f64, n: usize) -> Result<f64, String> {
    if n <= 2 {
        return Ok(1.0);
    }
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|err| err.to_string())?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Power of two near the largest magnitude; dividing by it is exact and keeps
/// the squared deviations finite.
fn pow2_scale(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max > 0.0 && max.is_finite() {
        max.log2().floor().exp2()
    } else {
        1.0
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
