//! # oscilloscope-rs: Waveform synthesis and power spectrum analysis
//!
//! The computational core of a signal oscilloscope. Signals are generated
//! on a uniform time grid and analysed with a forward DFT into a power
//! spectrum over a frequency axis quantized to thirds of a hertz.
//!
//! ## Architecture
//!
//! - **Synthesis**: Pure waveform generators (sine, phase shifted, noisy, square, sawtooth)
//! - **Analysis**: DFT power spectrum and frequency axis via rustfft
//! - **App**: Headless event-handling context that an external render loop drives
//! - **Config**: TOML/JSON scope configuration with per-panel slider ranges
//!
//! Neither core operation holds state between calls; both are safe to call
//! from any number of threads.
//!
//! ## Example
//!
//! ```
//! use oscilloscope_rs::{analysis::analyze, synthesis::generate_sine, types::linspace};
//!
//! let t = linspace(0.0, 3.0, 300);
//! let signal = generate_sine(&t, 1.0);
//! let spectrum = analyze(&signal, 3.0)?;
//!
//! assert_eq!(spectrum.power.len(), 150);
//! let (peak_hz, _) = spectrum.peak().unwrap();
//! assert!((peak_hz - 1.0).abs() < 1e-9);
//! # Ok::<(), oscilloscope_rs::ScopeError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod synthesis;
pub mod types;

// Re-export commonly used types
pub use analysis::{Spectrum, SpectrumAnalyzer};
pub use app::{Panel, PanelUpdate, ScopeApp, ScopeEvent};
pub use config::ScopeConfig;
pub use error::{Result, ScopeError};
pub use types::Trace;
