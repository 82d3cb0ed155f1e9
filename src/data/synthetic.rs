use rand::Rng;

/// A Gaussian peak in sample-index units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticPeak {
    pub center: f64,
    pub width: f64,
    pub amplitude: f64,
}

impl SyntheticPeak {
    pub fn new(center: f64, width: f64, amplitude: f64) -> Self {
        SyntheticPeak {
            center,
            width,
            amplitude,
        }
    }

    fn at(&self, x: f64) -> f64 {
        self.amplitude * (-(x - self.center).powi(2) / (2.0 * self.width.powi(2))).exp()
    }
}

/// Standard normal draw (Box-Muller).
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Build a raw scan of `n_samples` intensities: a baseline rising linearly
/// from `baseline` to `2 * baseline`, the given peaks, and white noise with
/// standard deviation `noise_level`. Intensities are clamped at zero.
pub fn synthetic_scan<R: Rng>(
    n_samples: usize,
    peaks: &[SyntheticPeak],
    baseline: f64,
    noise_level: f64,
    rng: &mut R,
) -> Vec<f64> {
    (0..n_samples)
        .map(|i| {
            let x = i as f64;
            let signal: f64 = peaks.iter().map(|p| p.at(x)).sum();
            let drift = baseline * (1.0 + x / n_samples as f64);
            (drift + signal + noise_level * standard_normal(rng)).max(0.0)
        })
        .collect()
}
