//! Piecewise-linear interpolation helpers

/// Evaluate the piecewise-linear function through `(xs[i], ys[i])` at `x`.
///
/// `xs` must be sorted ascending with the same length as `ys`. Values
/// outside the sampled range are held at the nearest endpoint.
pub fn interpolate_at(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    match xs.len() {
        0 => return f64::NAN,
        1 => return ys[0],
        _ => {}
    }
    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }

    // First index with xs[i] > x; x lies in [xs[i-1], xs[i])
    let i = xs.partition_point(|&v| v <= x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

/// Resample values that evenly span the normalized domain [0, 1] onto
/// `points` evenly spaced samples of the same domain.
pub fn resample_linear(values: &[f64], points: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || points == 0 {
        return Vec::new();
    }
    if n == 1 || points == 1 {
        return vec![values[0]; points];
    }

    let scale = (n - 1) as f64 / (points - 1) as f64;
    (0..points)
        .map(|m| {
            let t = m as f64 * scale;
            let i = (t.floor() as usize).min(n - 2);
            let frac = t - i as f64;
            values[i] + frac * (values[i + 1] - values[i])
        })
        .collect()
}
