//! Waveform synthesis
//!
//! This module generates the signals shown on the oscilloscope panels:
//! - Sine at a frequency in Hz (the signal fed to spectrum analysis)
//! - Phase-shifted, noisy, square and sawtooth panel waveforms
//! - Travelling sine/cosine waves for the animation panel

pub mod noise;
pub mod waveform;

pub use noise::{noisy_sine, NoiseSource, DEFAULT_NOISE_STD_DEV};
pub use waveform::{
    generate_sine, phase_shifted_sine, sawtooth, square, travelling_wave, WaveKind, Waveform,
};
