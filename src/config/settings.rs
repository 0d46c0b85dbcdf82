//! Per-panel settings for the oscilloscope
//!
//! Each panel is driven by one slider. These types record the slider range,
//! its starting value and the fixed parameters of the waveform it drives.
//!
//! # Main Types
//!
//! - [`SliderRange`] - Slider bounds and initial value
//! - [`SinePanelSettings`] - Main sine and its spectrum
//! - [`PhasePanelSettings`] - Phase shifted sine
//! - [`NoisePanelSettings`] - Sine with Gaussian noise
//! - [`PeriodicPanelSettings`] - Square, sawtooth and second sine panels
//! - [`AnimationSettings`] - Travelling sine/cosine animation

use crate::error::{Result, ScopeError};
use crate::synthesis::Waveform;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Bounds and starting value of a slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, initial: f64) -> Self {
        Self { min, max, initial }
    }

    /// Clamp a requested value into the slider's range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Start at `value`, widening the bounds if it lies outside them
    pub fn with_initial(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
            initial: value,
        }
    }

    /// True if `value` lies within the range
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Check bounds are finite and ordered and the initial value is reachable
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.initial.is_finite() {
            return Err(ScopeError::Config(format!(
                "{} slider values must be finite",
                name
            )));
        }
        if self.min > self.max {
            return Err(ScopeError::Config(format!(
                "{} slider minimum {} exceeds maximum {}",
                name, self.min, self.max
            )));
        }
        if !self.contains(self.initial) {
            return Err(ScopeError::Config(format!(
                "{} slider initial value {} outside [{}, {}]",
                name, self.initial, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Main signal panel; its signal also feeds the power spectrum panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinePanelSettings {
    /// Shape of the analysed signal
    pub waveform: Waveform,
    /// Frequency slider (Hz)
    pub frequency: SliderRange,
}

impl Default for SinePanelSettings {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: SliderRange::new(0.1, 5.0, 1.0),
        }
    }
}

/// Phase shifted sine panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhasePanelSettings {
    /// Phase slider (radians)
    pub phase: SliderRange,
    /// Angular multiplier applied to the grid
    pub angular_frequency: f64,
    /// Grid end (grid starts at 0)
    pub x_max: f64,
}

impl Default for PhasePanelSettings {
    fn default() -> Self {
        Self {
            phase: SliderRange::new(0.0, 10.0, 0.0),
            angular_frequency: 4.0,
            x_max: 2.0 * PI,
        }
    }
}

/// Noisy sine panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoisePanelSettings {
    /// Noise level slider (scales the noise realization)
    pub level: SliderRange,
    /// Standard deviation of the noise realization
    pub std_dev: f64,
    /// Seed for a reproducible realization; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Angular multiplier of the underlying sine
    pub angular_frequency: f64,
    /// Grid end (grid starts at 0)
    pub x_max: f64,
}

impl Default for NoisePanelSettings {
    fn default() -> Self {
        Self {
            level: SliderRange::new(0.0, 3.0, 0.01),
            std_dev: crate::synthesis::DEFAULT_NOISE_STD_DEV,
            seed: None,
            angular_frequency: 2.0,
            x_max: 2.0 * PI,
        }
    }
}

/// Panel showing a periodic waveform driven by a frequency slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicPanelSettings {
    /// Frequency slider
    pub frequency: SliderRange,
    /// Grid end (grid starts at 0)
    pub x_max: f64,
}

impl PeriodicPanelSettings {
    /// Square and sawtooth panel defaults
    pub fn edge_wave() -> Self {
        Self {
            frequency: SliderRange::new(0.15, 10.0, 2.0),
            x_max: 4.0 * PI,
        }
    }

    /// Second sine panel defaults
    pub fn second_sine() -> Self {
        Self {
            frequency: SliderRange::new(0.1, 5.0, 1.0),
            x_max: 2.0 * PI,
        }
    }
}

fn default_edge_wave() -> PeriodicPanelSettings {
    PeriodicPanelSettings::edge_wave()
}

fn default_second_sine() -> PeriodicPanelSettings {
    PeriodicPanelSettings::second_sine()
}

/// Travelling sine/cosine animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub wavelength: f64,
    pub velocity: f64,
    /// Spatial grid `[0, x_max)` sampled every `x_step`
    pub x_max: f64,
    pub x_step: f64,
    /// One frame per `t_step` over `[0, t_max)`
    pub t_max: f64,
    pub t_step: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            wavelength: 1.0,
            velocity: 1.0,
            x_max: 4.0,
            x_step: 0.01,
            t_max: 2.0,
            t_step: 0.01,
        }
    }
}

impl AnimationSettings {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("wavelength", self.wavelength),
            ("x_max", self.x_max),
            ("x_step", self.x_step),
            ("t_max", self.t_max),
            ("t_step", self.t_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScopeError::Config(format!(
                    "animation {} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.velocity.is_finite() {
            return Err(ScopeError::Config("animation velocity must be finite".into()));
        }
        Ok(())
    }
}

/// All panel settings, serialized as named tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    #[serde(default)]
    pub sine: SinePanelSettings,
    #[serde(default)]
    pub phase: PhasePanelSettings,
    #[serde(default)]
    pub noise: NoisePanelSettings,
    #[serde(default = "default_edge_wave")]
    pub square: PeriodicPanelSettings,
    #[serde(default = "default_edge_wave")]
    pub sawtooth: PeriodicPanelSettings,
    #[serde(default = "default_second_sine")]
    pub second_sine: PeriodicPanelSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            sine: SinePanelSettings::default(),
            phase: PhasePanelSettings::default(),
            noise: NoisePanelSettings::default(),
            square: PeriodicPanelSettings::edge_wave(),
            sawtooth: PeriodicPanelSettings::edge_wave(),
            second_sine: PeriodicPanelSettings::second_sine(),
            animation: AnimationSettings::default(),
        }
    }
}

impl PanelSettings {
    pub fn validate(&self) -> Result<()> {
        self.sine.frequency.validate("sine frequency")?;
        self.phase.phase.validate("phase")?;
        self.noise.level.validate("noise level")?;
        self.square.frequency.validate("square frequency")?;
        self.sawtooth.frequency.validate("sawtooth frequency")?;
        self.second_sine.frequency.validate("second sine frequency")?;

        if !self.noise.std_dev.is_finite() || self.noise.std_dev < 0.0 {
            return Err(ScopeError::Config(format!(
                "noise std_dev must be non-negative, got {}",
                self.noise.std_dev
            )));
        }

        let grids = [
            ("phase", self.phase.x_max),
            ("noise", self.noise.x_max),
            ("square", self.square.x_max),
            ("sawtooth", self.sawtooth.x_max),
            ("second sine", self.second_sine.x_max),
        ];
        for (name, x_max) in grids {
            if !x_max.is_finite() || x_max <= 0.0 {
                return Err(ScopeError::Config(format!(
                    "{} panel x_max must be positive, got {}",
                    name, x_max
                )));
            }
        }

        self.animation.validate()
    }
}
