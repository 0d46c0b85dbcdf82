//! Gaussian noise for the noisy sine panel
//!
//! The noise realization is drawn once and kept by the caller. Moving the
//! noise-level slider only rescales it.

use crate::error::{Result, ScopeError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Default standard deviation of the noise realization
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.5;

/// Zero-mean Gaussian sample generator
pub struct NoiseSource {
    distribution: Normal<f64>,
    rng: StdRng,
}

impl NoiseSource {
    /// Create an entropy-seeded source with the given standard deviation
    pub fn new(std_dev: f64) -> Result<Self> {
        Ok(Self {
            distribution: Self::distribution(std_dev)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create a reproducible source
    pub fn with_seed(std_dev: f64, seed: u64) -> Result<Self> {
        Ok(Self {
            distribution: Self::distribution(std_dev)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn distribution(std_dev: f64) -> Result<Normal<f64>> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ScopeError::invalid(format!(
                "noise standard deviation must be finite and non-negative, got {}",
                std_dev
            )));
        }
        Normal::new(0.0, std_dev).map_err(|e| ScopeError::invalid(e.to_string()))
    }

    /// Draw `n` samples
    pub fn samples(&mut self, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| self.distribution.sample(&mut self.rng))
            .collect()
    }
}

/// `sin(ω · x[i]) + noise_level · noise[i]`
///
/// `noise` must have one entry per grid sample.
pub fn noisy_sine(
    x: &[f64],
    angular_frequency: f64,
    noise_level: f64,
    noise: &[f64],
) -> Result<Vec<f64>> {
    if noise.len() != x.len() {
        return Err(ScopeError::invalid(format!(
            "noise buffer has {} samples but grid has {}",
            noise.len(),
            x.len()
        )));
    }

    Ok(x.iter()
        .zip(noise.iter())
        .map(|(&xi, &ni)| (angular_frequency * xi).sin() + noise_level * ni)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::linspace;

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let a = NoiseSource::with_seed(0.5, 42).unwrap().samples(100);
        let b = NoiseSource::with_seed(0.5, 42).unwrap().samples(100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_statistics() {
        let samples = NoiseSource::with_seed(0.5, 7).unwrap().samples(20_000);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.02, "mean {} should be near zero", mean);
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std-dev {} should be near 0.5", var.sqrt());
    }

    #[test]
    fn test_invalid_std_dev() {
        assert!(NoiseSource::new(-1.0).is_err());
        assert!(NoiseSource::with_seed(f64::NAN, 1).is_err());
        assert!(NoiseSource::new(0.0).is_ok());
    }

    #[test]
    fn test_noisy_sine_zero_level_is_clean() {
        let x = linspace(0.0, 2.0 * std::f64::consts::PI, 300);
        let noise = NoiseSource::with_seed(0.5, 1).unwrap().samples(300);
        let noisy = noisy_sine(&x, 2.0, 0.0, &noise).unwrap();
        for (xi, yi) in x.iter().zip(noisy.iter()) {
            assert!((yi - (2.0 * xi).sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_noisy_sine_scales_noise() {
        let x = [0.0, 0.0];
        let noise = [1.0, -2.0];
        assert_eq!(noisy_sine(&x, 2.0, 3.0, &noise).unwrap(), vec![3.0, -6.0]);
    }

    #[test]
    fn test_noisy_sine_length_mismatch() {
        let err = noisy_sine(&[0.0, 1.0], 2.0, 1.0, &[0.0]).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
