//! Analysis module for signal processing
//!
//! This module provides the spectrum side of the oscilloscope:
//! - DFT power spectrum of a uniformly sampled signal
//! - Quantized frequency axis construction
//! - Peak detection on the resulting spectrum

pub mod spectrum;

pub use spectrum::{analyze, frequency_axis, Spectrum, SpectrumAnalyzer, FREQUENCY_QUANTA_PER_HZ};
