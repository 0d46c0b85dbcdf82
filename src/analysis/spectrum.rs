//! Power spectrum analysis module
//!
//! Turns a uniformly sampled amplitude sequence into a power spectrum and a
//! matching frequency axis:
//! - Forward DFT of the whole signal (no windowing, no zero padding)
//! - Power per bin as `|X[k]|² / n`, first `n / 2` bins kept
//! - Frequency axis snapped to multiples of 1/3 Hz
//!
//! # Frequency axis layout
//!
//! The axis is built as `n` evenly spaced values over `[0, (n/2) / t_max]`,
//! each snapped to the nearest third of a hertz, and then only the
//! even-indexed entries are kept. This is a positional subsample, not a
//! frequency decimation, and it yields `ceil(n / 2)` entries while the power
//! array has `n / 2`. For odd `n` the axis is one entry longer than the
//! power array; anything zipping the two stops at the shorter one.
//! Callers rely on this layout; do not realign the two arrays here.

use crate::error::{Result, ScopeError};
use crate::types::linspace;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// Frequency axis values are multiples of `1 / FREQUENCY_QUANTA_PER_HZ` Hz
pub const FREQUENCY_QUANTA_PER_HZ: f64 = 3.0;

/// Power spectrum paired with its frequency axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Power per bin, `n / 2` entries, all non-negative
    pub power: Vec<f64>,
    /// Frequencies in Hz, `ceil(n / 2)` entries, quantized to 1/3 Hz
    pub frequencies: Vec<f64>,
    /// Number of input samples
    pub sample_count: usize,
    /// Total sampled duration in seconds
    pub duration: f64,
}

impl Spectrum {
    /// Find the strongest bin as (frequency, power)
    pub fn peak(&self) -> Option<(f64, f64)> {
        let (idx, &max_power) = self
            .power
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

        Some((self.frequencies.get(idx).copied()?, max_power))
    }

    /// Total power across the kept bins
    pub fn total_power(&self) -> f64 {
        self.power.iter().sum()
    }

    /// Get data points for plotting (frequency, power pairs)
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.frequencies
            .iter()
            .zip(self.power.iter())
            .map(|(&f, &p)| [f, p])
            .collect()
    }
}

/// Reject inputs the analysis is undefined for and return the top of the
/// frequency range, `(n / 2) / t_max`
fn validated_f_max(sample_count: usize, t_max: f64) -> Result<f64> {
    if sample_count == 0 {
        return Err(ScopeError::invalid("amplitude sequence is empty"));
    }
    if !t_max.is_finite() || t_max <= 0.0 {
        return Err(ScopeError::invalid(format!(
            "sampling duration must be positive and finite, got {}",
            t_max
        )));
    }

    let f_max = (sample_count as f64 / 2.0) * (1.0 / t_max);
    // Quantization scales by FREQUENCY_QUANTA_PER_HZ, which must stay finite too
    if !(f_max * FREQUENCY_QUANTA_PER_HZ).is_finite() {
        return Err(ScopeError::invalid(format!(
            "sampling duration {} too short for {} samples: frequency range overflows",
            t_max, sample_count
        )));
    }
    Ok(f_max)
}

fn quantized_axis(n: usize, f_max: f64) -> Vec<f64> {
    linspace(0.0, f_max, n)
        .into_iter()
        .step_by(2)
        .map(|f| (f * FREQUENCY_QUANTA_PER_HZ).round_ties_even() / FREQUENCY_QUANTA_PER_HZ)
        .collect()
}

/// Build the quantized, even-index-subsampled frequency axis for `n` samples
/// spanning `t_max` seconds. Returns `ceil(n / 2)` values.
pub fn frequency_axis(n: usize, t_max: f64) -> Result<Vec<f64>> {
    let f_max = validated_f_max(n, t_max)?;
    Ok(quantized_axis(n, f_max))
}

/// Spectrum analyzer with cached FFT plans
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute `|X[k]|² / n` for the first `n / 2` DFT bins of `amplitude`
    pub fn power_spectrum(&mut self, amplitude: &[f64]) -> Vec<f64> {
        let n = amplitude.len();
        if n == 0 {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f64>> =
            amplitude.iter().map(|&a| Complex::new(a, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let n_f = n as f64;
        buffer
            .iter()
            .take(n / 2)
            .map(|&c| (c * c.conj()).norm() / n_f)
            .collect()
    }

    /// Compute the power spectrum and frequency axis of `amplitude`, sampled
    /// uniformly over `t_max` seconds.
    ///
    /// # Errors
    /// [`ScopeError::InvalidArgument`] if `amplitude` is empty, `t_max` is
    /// not a positive finite number, or `t_max` is so short that the
    /// frequency range overflows.
    pub fn analyze(&mut self, amplitude: &[f64], t_max: f64) -> Result<Spectrum> {
        let n = amplitude.len();
        let f_max = validated_f_max(n, t_max).map_err(|e| {
            tracing::warn!("Rejecting spectrum request: {}", e);
            e
        })?;

        let frequencies = quantized_axis(n, f_max);
        let power = self.power_spectrum(amplitude);

        tracing::debug!(
            samples = n,
            duration = t_max,
            power_bins = power.len(),
            frequency_bins = frequencies.len(),
            "Computed power spectrum"
        );

        Ok(Spectrum {
            power,
            frequencies,
            sample_count: n,
            duration: t_max,
        })
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze `amplitude` with a fresh analyzer
pub fn analyze(amplitude: &[f64], t_max: f64) -> Result<Spectrum> {
    SpectrumAnalyzer::new().analyze(amplitude, t_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::generate_sine;
    use std::f64::consts::PI;

    fn reference_signal() -> Vec<f64> {
        generate_sine(&linspace(0.0, 3.0, 300), 1.0)
    }

    #[test]
    fn test_reference_power_and_frequency() {
        let spectrum = analyze(&reference_signal(), 3.0).unwrap();

        let expected_power = [
            0.00046456552344201386,
            0.004715246604514724,
            74.724873693238,
            0.010032901044703203,
        ];
        let expected_freq = [1.0 / 3.0, 2.0 / 3.0, 1.0, 4.0 / 3.0];

        for (i, (&p, &f)) in expected_power.iter().zip(expected_freq.iter()).enumerate() {
            let bin = i + 1;
            assert!(
                (spectrum.power[bin] - p).abs() < 1e-6,
                "Power at bin {} expected {} got {}",
                bin,
                p,
                spectrum.power[bin]
            );
            assert!(
                (spectrum.frequencies[bin] - f).abs() < 1e-6,
                "Frequency at bin {} expected {} got {}",
                bin,
                f,
                spectrum.frequencies[bin]
            );
        }
    }

    #[test]
    fn test_output_lengths_even() {
        let spectrum = analyze(&reference_signal(), 3.0).unwrap();
        assert_eq!(spectrum.power.len(), 150);
        assert_eq!(spectrum.frequencies.len(), 150);
    }

    #[test]
    fn test_output_lengths_odd() {
        let signal = vec![0.5; 7];
        let spectrum = analyze(&signal, 1.0).unwrap();
        assert_eq!(spectrum.power.len(), 3);
        assert_eq!(spectrum.frequencies.len(), 4);
        assert_eq!(spectrum.plot_points().len(), 3);
    }

    #[test]
    fn test_single_sample() {
        let spectrum = analyze(&[1.0], 1.0).unwrap();
        assert!(spectrum.power.is_empty());
        assert_eq!(spectrum.frequencies, vec![0.0]);
        assert_eq!(spectrum.peak(), None);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(analyze(&[], 3.0).unwrap_err().is_invalid_argument());
        assert!(analyze(&[1.0, 2.0], 0.0).unwrap_err().is_invalid_argument());
        assert!(analyze(&[1.0, 2.0], -1.0).unwrap_err().is_invalid_argument());
        assert!(analyze(&[1.0, 2.0], f64::NAN).unwrap_err().is_invalid_argument());
        assert!(analyze(&[1.0, 2.0], f64::INFINITY).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_tiny_duration_overflowing_frequency_range() {
        let signal = [1.0, 2.0, 3.0, 4.0];
        // 1 / 5e-324 is infinite; 2 * (1 / 1e-308) overflows
        assert!(analyze(&signal, 5e-324).unwrap_err().is_invalid_argument());
        assert!(analyze(&signal, 1e-308).unwrap_err().is_invalid_argument());
        assert!(frequency_axis(4, 1e-308).unwrap_err().is_invalid_argument());
        // f_max = 1e308 is finite but overflows once scaled for quantization
        assert!(frequency_axis(2, 1e-308).unwrap_err().is_invalid_argument());

        // Short but representable durations still produce a finite axis
        let spectrum = analyze(&signal, 1e-300).unwrap();
        assert!(spectrum.frequencies.iter().all(|f| f.is_finite()));
        assert!(spectrum.frequencies.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_peak_at_signal_frequency() {
        let spectrum = analyze(&reference_signal(), 3.0).unwrap();
        let (freq, power) = spectrum.peak().expect("Should find peak");
        assert!((freq - 1.0).abs() < 1e-9);
        assert!(power > 70.0);
    }

    #[test]
    fn test_dc_signal_power() {
        // A constant of 2 over 8 samples puts |X[0]|² / n = 16² / 8 = 32 in bin 0
        let spectrum = analyze(&[2.0; 8], 1.0).unwrap();
        assert!((spectrum.power[0] - 32.0).abs() < 1e-9);
        assert!(spectrum.power[1..].iter().all(|&p| p < 1e-18));
    }

    #[test]
    fn test_quantization_rounds_half_to_even() {
        // n = 3, t_max = 1: f_max = 1.5, linspace = [0, 0.75, 1.5]
        // index 1 is dropped; 1.5 * 3 = 4.5 rounds to 4 (ties to even)
        let axis = frequency_axis(3, 1.0).unwrap();
        assert_eq!(axis, vec![0.0, 4.0 / 3.0]);
    }

    #[test]
    fn test_analyzer_reuse_is_idempotent() {
        let signal = reference_signal();
        let mut analyzer = SpectrumAnalyzer::new();
        let first = analyzer.analyze(&signal, 3.0).unwrap();
        let second = analyzer.analyze(&signal, 3.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_power_matches_parseval_half() {
        // Pure tone on an exact bin: all energy sits in bins k and n - k
        let n = 64;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).sin())
            .collect();
        let spectrum = analyze(&signal, 1.0).unwrap();
        let energy: f64 = signal.iter().map(|s| s * s).sum();
        assert!((spectrum.total_power() - energy / 2.0).abs() < 1e-9);
        assert!((spectrum.power[4] - energy / 2.0).abs() < 1e-9);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_lengths_follow_sample_count(
            signal in prop::collection::vec(-10.0f64..10.0, 1..200),
            t_max in 0.01f64..100.0
        ) {
            let n = signal.len();
            let spectrum = analyze(&signal, t_max).unwrap();
            prop_assert_eq!(spectrum.power.len(), n / 2);
            prop_assert_eq!(spectrum.frequencies.len(), n.div_ceil(2));
        }

        #[test]
        fn test_power_is_non_negative(
            signal in prop::collection::vec(-1000.0f64..1000.0, 1..256)
        ) {
            let spectrum = analyze(&signal, 1.0).unwrap();
            prop_assert!(spectrum.power.iter().all(|&p| p >= 0.0));
        }

        #[test]
        fn test_axis_is_monotonic_and_quantized(
            n in 1usize..500,
            t_max in 0.05f64..50.0
        ) {
            let axis = frequency_axis(n, t_max).unwrap();
            prop_assert!(axis.windows(2).all(|w| w[0] <= w[1]));
            for &f in &axis {
                let thirds = f * FREQUENCY_QUANTA_PER_HZ;
                prop_assert!((thirds - thirds.round()).abs() < 1e-9, "{} is not a multiple of 1/3", f);
            }
        }
    }
}
