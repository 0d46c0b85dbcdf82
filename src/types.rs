//! Core data types for the oscilloscope
//!
//! Time sequences, amplitude sequences and frequency axes are plain
//! `Vec<f64>` / `&[f64]` values. This module adds the sampling grid used to
//! produce them and the [`Trace`] type handed to an external renderer.
//!
//! # Main Types
//!
//! - [`linspace`] - Uniform sampling grid with an inclusive endpoint
//! - [`Trace`] - One plot line: x values paired with y values

use serde::{Deserialize, Serialize};

/// Return `n` evenly spaced samples over `[start, stop]`, endpoint included.
///
/// `n == 0` gives an empty grid and `n == 1` gives `[start]`. The last sample
/// is pinned to `stop` so it never drifts through accumulated rounding.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
            grid[n - 1] = stop;
            grid
        }
    }
}

/// Return samples `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || stop <= start {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// A single line to draw: `x[i]` is plotted against `y[i]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Horizontal values (seconds or Hz)
    pub x: Vec<f64>,
    /// Vertical values (amplitude or power)
    pub y: Vec<f64>,
}

impl Trace {
    /// Create a trace from matching x/y sequences
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Number of drawable points (the shorter of the two sequences)
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// True if nothing can be drawn
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get data points for plotting, truncated to the shorter sequence
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    /// Minimum and maximum of the y values, ignoring NaN
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.y
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
