//! Headless oscilloscope shell
//!
//! [`ScopeApp`] owns everything the panels need between slider moves: the
//! sampling grids, the noise realization, the current slider values and a
//! spectrum analyzer with cached FFT plans. An external render loop feeds it
//! [`ScopeEvent`]s and draws the [`PanelUpdate`]s it returns. Nothing is
//! registered as a callback and nothing is drawn here.
//!
//! # Panels
//!
//! | Panel        | Slider          | Waveform                               |
//! |--------------|-----------------|----------------------------------------|
//! | Sine         | frequency (Hz)  | selected [`Waveform`] plus its spectrum |
//! | Phase        | phase (rad)     | `sin(phase + ω x)`                     |
//! | Noise        | noise level     | `sin(ω x) + level · noise`             |
//! | Square       | frequency       | square wave                            |
//! | Sawtooth     | frequency       | rising sawtooth                        |
//! | Second sine  | frequency (Hz)  | `sin(2π f x)`                          |
//! | Animation    | frame index     | travelling sine and cosine             |
//!
//! The sine panel analyses `sin(2π f t)` unless another [`Waveform`] is
//! selected; the alternatives use `ω = 2π f` on the same time grid and take
//! the phase and noise level from their own panels' sliders.
//!
//! Square and sawtooth panels start at their slider's initial frequency
//! (2.0 by default), not at a fixed `ω = 4`. The noise panel returns only the
//! noisy trace; a clean reference curve is left to the renderer.

use crate::analysis::{Spectrum, SpectrumAnalyzer};
use crate::config::{ScopeConfig, SliderRange};
use crate::error::{Result, ResultExt, ScopeError};
use crate::synthesis::{
    generate_sine, noisy_sine, phase_shifted_sine, sawtooth, square, travelling_wave, NoiseSource,
    WaveKind, Waveform,
};
use crate::types::{arange, linspace, Trace};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Identifies a drawable panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Sine,
    Phase,
    Noise,
    Square,
    Sawtooth,
    SecondSine,
    Animation,
}

impl Panel {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Panel::Sine => "Sine 1",
            Panel::Phase => "Phase Shifted Sinewave",
            Panel::Noise => "Sinewave with Noise",
            Panel::Square => "Squarewave",
            Panel::Sawtooth => "Sawtooth Wave",
            Panel::SecondSine => "Sine 2",
            Panel::Animation => "Sine and Cosine Animation",
        }
    }
}

/// Input from the render loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeEvent {
    SineFrequency(f64),
    SineWaveform(Waveform),
    Phase(f64),
    NoiseLevel(f64),
    SquareFrequency(f64),
    SawtoothFrequency(f64),
    SecondSineFrequency(f64),
    AnimationFrame(usize),
    Exit,
}

/// What the render loop should redraw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelUpdate {
    /// Main sine and its power spectrum
    Sine { signal: Trace, spectrum: Spectrum },
    /// A single-trace panel
    Trace { panel: Panel, trace: Trace },
    /// One animation frame
    Animation {
        frame: usize,
        sine: Trace,
        cosine: Trace,
    },
    /// The scope was closed
    Closed,
}

impl PanelUpdate {
    /// Panel this update redraws, `None` once the scope is closed
    pub fn panel(&self) -> Option<Panel> {
        match self {
            PanelUpdate::Sine { .. } => Some(Panel::Sine),
            PanelUpdate::Trace { panel, .. } => Some(*panel),
            PanelUpdate::Animation { .. } => Some(Panel::Animation),
            PanelUpdate::Closed => None,
        }
    }
}

/// Current slider values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderValues {
    pub sine_frequency: f64,
    pub sine_waveform: Waveform,
    pub phase: f64,
    pub noise_level: f64,
    pub square_frequency: f64,
    pub sawtooth_frequency: f64,
    pub second_sine_frequency: f64,
    pub animation_frame: usize,
}

/// Event-handling context for the oscilloscope panels
pub struct ScopeApp {
    config: ScopeConfig,
    time: Vec<f64>,
    phase_grid: Vec<f64>,
    noise_grid: Vec<f64>,
    noise: Vec<f64>,
    square_grid: Vec<f64>,
    sawtooth_grid: Vec<f64>,
    second_sine_grid: Vec<f64>,
    animation_x: Vec<f64>,
    animation_t: Vec<f64>,
    analyzer: SpectrumAnalyzer,
    values: SliderValues,
    closed: bool,
}

impl ScopeApp {
    /// Build the scope from a validated config
    pub fn new(config: ScopeConfig) -> Result<Self> {
        config.validate().context("Invalid scope configuration")?;

        let n = config.points;
        let panels = &config.panels;

        let noise_grid = linspace(0.0, panels.noise.x_max, n);
        let mut noise_source = match panels.noise.seed {
            Some(seed) => NoiseSource::with_seed(panels.noise.std_dev, seed)?,
            None => NoiseSource::new(panels.noise.std_dev)?,
        };
        let noise = noise_source.samples(noise_grid.len());

        let animation = &panels.animation;
        let animation_x = arange(0.0, animation.x_max, animation.x_step);
        let animation_t = arange(0.0, animation.t_max, animation.t_step);

        let values = SliderValues {
            sine_frequency: panels.sine.frequency.initial,
            sine_waveform: panels.sine.waveform,
            phase: panels.phase.phase.initial,
            noise_level: panels.noise.level.initial,
            square_frequency: panels.square.frequency.initial,
            sawtooth_frequency: panels.sawtooth.frequency.initial,
            second_sine_frequency: panels.second_sine.frequency.initial,
            animation_frame: 0,
        };

        tracing::debug!(
            points = n,
            t_max = config.t_max,
            animation_frames = animation_t.len(),
            "Created oscilloscope"
        );

        Ok(Self {
            time: linspace(0.0, config.t_max, n),
            phase_grid: linspace(0.0, panels.phase.x_max, n),
            noise_grid,
            noise,
            square_grid: linspace(0.0, panels.square.x_max, n),
            sawtooth_grid: linspace(0.0, panels.sawtooth.x_max, n),
            second_sine_grid: linspace(0.0, panels.second_sine.x_max, n),
            animation_x,
            animation_t,
            analyzer: SpectrumAnalyzer::new(),
            values,
            closed: false,
            config,
        })
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn values(&self) -> &SliderValues {
        &self.values
    }

    /// Sample instants of the main sine panel
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Number of animation frames before the index wraps
    pub fn frame_count(&self) -> usize {
        self.animation_t.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Apply one event and return the panel to redraw
    pub fn handle(&mut self, event: ScopeEvent) -> Result<PanelUpdate> {
        if self.closed {
            return Err(ScopeError::invalid(format!(
                "scope is closed, ignoring {:?}",
                event
            )));
        }

        let panels = &self.config.panels;
        match event {
            ScopeEvent::SineFrequency(f) => {
                self.values.sine_frequency =
                    clamp_slider(&panels.sine.frequency, f, "sine frequency");
                self.sine_update()
            }
            ScopeEvent::SineWaveform(waveform) => {
                tracing::debug!("Sine panel waveform set to {}", waveform);
                self.values.sine_waveform = waveform;
                self.sine_update()
            }
            ScopeEvent::Phase(p) => {
                self.values.phase = clamp_slider(&panels.phase.phase, p, "phase");
                Ok(self.phase_update())
            }
            ScopeEvent::NoiseLevel(l) => {
                self.values.noise_level = clamp_slider(&panels.noise.level, l, "noise level");
                self.noise_update()
            }
            ScopeEvent::SquareFrequency(f) => {
                self.values.square_frequency =
                    clamp_slider(&panels.square.frequency, f, "square frequency");
                Ok(self.square_update())
            }
            ScopeEvent::SawtoothFrequency(f) => {
                self.values.sawtooth_frequency =
                    clamp_slider(&panels.sawtooth.frequency, f, "sawtooth frequency");
                Ok(self.sawtooth_update())
            }
            ScopeEvent::SecondSineFrequency(f) => {
                self.values.second_sine_frequency =
                    clamp_slider(&panels.second_sine.frequency, f, "second sine frequency");
                Ok(self.second_sine_update())
            }
            ScopeEvent::AnimationFrame(i) => {
                let frames = self.frame_count();
                self.values.animation_frame = if frames == 0 { 0 } else { i % frames };
                Ok(self.animation_update())
            }
            ScopeEvent::Exit => {
                tracing::debug!("Closing oscilloscope");
                self.closed = true;
                Ok(PanelUpdate::Closed)
            }
        }
    }

    /// Every panel drawn with the current slider values
    pub fn initial_frame(&mut self) -> Result<Vec<PanelUpdate>> {
        Ok(vec![
            self.sine_update()?,
            self.phase_update(),
            self.noise_update()?,
            self.square_update(),
            self.sawtooth_update(),
            self.second_sine_update(),
            self.animation_update(),
        ])
    }

    /// Selected waveform at the sine frequency, sampled on the time grid
    fn sine_signal(&self) -> Result<Vec<f64>> {
        let f = self.values.sine_frequency;
        let omega = 2.0 * PI * f;
        Ok(match self.values.sine_waveform {
            Waveform::Sine => generate_sine(&self.time, f),
            Waveform::PhaseShiftedSine => phase_shifted_sine(&self.time, self.values.phase, omega),
            Waveform::NoisySine => {
                noisy_sine(&self.time, omega, self.values.noise_level, &self.noise)?
            }
            Waveform::Square => square(&self.time, omega),
            Waveform::Sawtooth => sawtooth(&self.time, omega),
        })
    }

    /// Main signal and its spectrum at the current frequency and waveform
    pub fn sine_update(&mut self) -> Result<PanelUpdate> {
        let signal = self.sine_signal()?;
        let spectrum = self
            .analyzer
            .analyze(&signal, self.config.t_max)
            .with_context(|| {
                format!(
                    "{} spectrum of {} at {} Hz",
                    Panel::Sine.display_name(),
                    self.values.sine_waveform,
                    self.values.sine_frequency
                )
            })?;
        Ok(PanelUpdate::Sine {
            signal: Trace::new(self.time.clone(), signal),
            spectrum,
        })
    }

    fn phase_update(&self) -> PanelUpdate {
        let y = phase_shifted_sine(
            &self.phase_grid,
            self.values.phase,
            self.config.panels.phase.angular_frequency,
        );
        trace_update(Panel::Phase, &self.phase_grid, y)
    }

    fn noise_update(&self) -> Result<PanelUpdate> {
        let y = noisy_sine(
            &self.noise_grid,
            self.config.panels.noise.angular_frequency,
            self.values.noise_level,
            &self.noise,
        )?;
        Ok(trace_update(Panel::Noise, &self.noise_grid, y))
    }

    fn square_update(&self) -> PanelUpdate {
        let y = square(&self.square_grid, self.values.square_frequency);
        trace_update(Panel::Square, &self.square_grid, y)
    }

    fn sawtooth_update(&self) -> PanelUpdate {
        let y = sawtooth(&self.sawtooth_grid, self.values.sawtooth_frequency);
        trace_update(Panel::Sawtooth, &self.sawtooth_grid, y)
    }

    fn second_sine_update(&self) -> PanelUpdate {
        let y = generate_sine(&self.second_sine_grid, self.values.second_sine_frequency);
        trace_update(Panel::SecondSine, &self.second_sine_grid, y)
    }

    fn animation_update(&self) -> PanelUpdate {
        let frame = self.values.animation_frame;
        let t = self.animation_t.get(frame).copied().unwrap_or(0.0);
        let animation = &self.config.panels.animation;
        let wave = |kind| {
            Trace::new(
                self.animation_x.clone(),
                travelling_wave(
                    &self.animation_x,
                    t,
                    animation.wavelength,
                    animation.velocity,
                    kind,
                ),
            )
        };

        PanelUpdate::Animation {
            frame,
            sine: wave(WaveKind::Sine),
            cosine: wave(WaveKind::Cosine),
        }
    }
}

fn clamp_slider(range: &SliderRange, value: f64, name: &str) -> f64 {
    let clamped = if value.is_nan() {
        range.initial
    } else {
        range.clamp(value)
    };
    if clamped != value {
        tracing::warn!("{} {} outside slider range, using {}", name, value, clamped);
    }
    clamped
}

fn trace_update(panel: Panel, x: &[f64], y: Vec<f64>) -> PanelUpdate {
    PanelUpdate::Trace {
        panel,
        trace: Trace::new(x.to_vec(), y),
    }
}
