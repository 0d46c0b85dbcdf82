//! Waveform generators
//!
//! Every generator is a pure map from a sample grid to one amplitude per
//! sample. None of them can fail, and an empty grid yields an empty output.
//!
//! - [`generate_sine`] takes an ordinary frequency in Hz
//! - the panel generators ([`phase_shifted_sine`], [`square`], [`sawtooth`], ...)
//!   take an angular multiplier applied directly to the grid value

use crate::error::ScopeError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::str::FromStr;

/// Waveform shapes the oscilloscope can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// Plain sine at a frequency in Hz
    #[default]
    Sine,
    /// Sine with an additive phase offset
    PhaseShiftedSine,
    /// Sine with scaled Gaussian noise on top
    NoisySine,
    /// 50% duty square wave in [-1, 1]
    Square,
    /// Rising ramp from -1 to 1 per period
    Sawtooth,
}

impl Waveform {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::PhaseShiftedSine => "Phase Shifted Sine",
            Waveform::NoisySine => "Noisy Sine",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
        }
    }

    /// Config and command line name
    pub fn key(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::PhaseShiftedSine => "phase_shifted_sine",
            Waveform::NoisySine => "noisy_sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Get all waveforms
    pub fn all() -> &'static [Waveform] {
        &[
            Waveform::Sine,
            Waveform::PhaseShiftedSine,
            Waveform::NoisySine,
            Waveform::Square,
            Waveform::Sawtooth,
        ]
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Waveform {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Waveform::all()
            .iter()
            .copied()
            .find(|w| w.key() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Waveform::all().iter().map(|w| w.key()).collect();
                ScopeError::invalid(format!(
                    "unknown waveform '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Which trigonometric curve a travelling wave follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveKind {
    Sine,
    Cosine,
}

/// Sine amplitude at each time sample: `sin(2π · frequency · t[i])`.
///
/// Zero and negative frequencies are valid and give a flat line or a
/// phase-reversed sine respectively.
pub fn generate_sine(t: &[f64], frequency: f64) -> Vec<f64> {
    t.iter().map(|&ti| (2.0 * PI * frequency * ti).sin()).collect()
}

/// `sin(phase + ω · x[i])`
pub fn phase_shifted_sine(x: &[f64], phase: f64, angular_frequency: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| (phase + angular_frequency * xi).sin())
        .collect()
}

/// 50% duty square wave: +1 on the first half of each 2π period, -1 on the second.
pub fn square(x: &[f64], angular_frequency: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| {
            if (angular_frequency * xi).rem_euclid(TAU) < PI {
                1.0
            } else {
                -1.0
            }
        })
        .collect()
}

/// Rising sawtooth: -1 at the start of each 2π period, approaching +1 at its end.
pub fn sawtooth(x: &[f64], angular_frequency: f64) -> Vec<f64> {
    x.iter()
        .map(|&xi| (angular_frequency * xi).rem_euclid(TAU) / PI - 1.0)
        .collect()
}

/// Wave moving along `x` at `velocity`, sampled at time `t`:
/// `sin/cos(2π · (x[i] - velocity · t) / wavelength)`.
pub fn travelling_wave(
    x: &[f64],
    t: f64,
    wavelength: f64,
    velocity: f64,
    kind: WaveKind,
) -> Vec<f64> {
    x.iter()
        .map(|&xi| {
            let arg = 2.0 * PI * (xi - velocity * t) / wavelength;
            match kind {
                WaveKind::Sine => arg.sin(),
                WaveKind::Cosine => arg.cos(),
            }
        })
        .collect()
}
