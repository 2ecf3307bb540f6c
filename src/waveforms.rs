//! Analytical excitation waveforms.
//!
//! The Gaussian family follows the FDTD simulator's conventions: every pulse
//! is centred at `chi` after `t = 0` so that it is negligibly small at the
//! start of a run, and the width is set by `zeta`, both derived from the
//! centre frequency. [`WaveformKind::Gaussian`], [`WaveformKind::GaussianPrime`]
//! and [`WaveformKind::GaussianDoublePrime`] share one `(chi, zeta)` pair, so
//! for a common amplitude and frequency they are exact calculus siblings:
//! `Gaussian` integrates `GaussianPrime` and `GaussianDoublePrime` differentiates it.

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::math::Scalar;

/// Errors raised while interpreting waveform descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveformError {
    /// The name does not match any supported waveform family.
    #[error("unknown waveform type: {0}")]
    UnknownKind(String),
}

/// Supported waveform families.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveformKind {
    /// Gaussian `exp(-zeta (t - chi)^2)`.
    Gaussian,
    /// First time-derivative of the Gaussian.
    GaussianDot,
    /// [`WaveformKind::GaussianDot`] normalised to unit peak.
    GaussianDotNorm,
    /// First time-derivative of the Gaussian; the dipole current pulse.
    GaussianPrime,
    /// Second time-derivative of the Gaussian; the derivative of the dipole current pulse.
    GaussianDoublePrime,
    /// Second time-derivative of a wider Gaussian (`chi = √2/f`).
    GaussianDotDot,
    /// [`WaveformKind::GaussianDotDot`] normalised to unit peak.
    GaussianDotDotNorm,
    /// Ricker wavelet: the negated, normalised [`WaveformKind::GaussianDotDot`].
    Ricker,
    /// Single cycle of a sine wave.
    Sine,
    /// Continuous sine wave with a linear amplitude ramp over the first four cycles.
    ContSine,
    /// Unit impulse lasting one time step.
    Impulse,
}

impl WaveformKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Gaussian,
        Self::GaussianDot,
        Self::GaussianDotNorm,
        Self::GaussianPrime,
        Self::GaussianDoublePrime,
        Self::GaussianDotDot,
        Self::GaussianDotDotNorm,
        Self::Ricker,
        Self::Sine,
        Self::ContSine,
        Self::Impulse,
    ];

    /// Lower-case name used by the simulator's input files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::GaussianDot => "gaussiandot",
            Self::GaussianDotNorm => "gaussiandotnorm",
            Self::GaussianPrime => "gaussianprime",
            Self::GaussianDoublePrime => "gaussiandoubleprime",
            Self::GaussianDotDot => "gaussiandotdot",
            Self::GaussianDotDotNorm => "gaussiandotdotnorm",
            Self::Ricker => "ricker",
            Self::Sine => "sine",
            Self::ContSine => "contsine",
            Self::Impulse => "impulse",
        }
    }

    /// True for the kinds built on a Gaussian envelope.
    #[must_use]
    pub const fn is_gaussian(self) -> bool {
        !matches!(self, Self::Sine | Self::ContSine | Self::Impulse)
    }

    const fn is_wide_gaussian(self) -> bool {
        matches!(
            self,
            Self::GaussianDotDot | Self::GaussianDotDotNorm | Self::Ricker
        )
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveformKind {
    type Err = WaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == needle)
            .ok_or_else(|| WaveformError::UnknownKind(s.to_owned()))
    }
}

/// Immutable waveform description: family, peak scaling and centre frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    /// Waveform family.
    pub kind: WaveformKind,
    /// Amplitude scaling applied to the unit-amplitude shape.
    pub amplitude: Scalar,
    /// Centre frequency in hertz.
    pub frequency: Scalar,
}

impl Waveform {
    /// Creates a waveform.
    #[must_use]
    pub const fn new(kind: WaveformKind, amplitude: Scalar, frequency: Scalar) -> Self {
        Self {
            kind,
            amplitude,
            frequency,
        }
    }

    /// Returns the `(integral, pulse, derivative)` waveforms that drive a Hertzian dipole.
    ///
    /// The pulse is the dipole current `I(t)` ([`WaveformKind::GaussianPrime`]),
    /// the integral its charge `q(t)` and the derivative `dI/dt`.
    #[must_use]
    pub const fn dipole_triplet(amplitude: Scalar, frequency: Scalar) -> (Self, Self, Self) {
        (
            Self::new(WaveformKind::Gaussian, amplitude, frequency),
            Self::new(WaveformKind::GaussianPrime, amplitude, frequency),
            Self::new(WaveformKind::GaussianDoublePrime, amplitude, frequency),
        )
    }

    /// Gaussian centre time `chi` and width coefficient `zeta`.
    ///
    /// Only meaningful for Gaussian kinds; other kinds report the narrow pair.
    #[must_use]
    pub fn coefficients(&self) -> (Scalar, Scalar) {
        let f = self.frequency;
        if self.kind.is_wide_gaussian() {
            (Scalar::sqrt(2.0) / f, PI * PI * f * f)
        } else {
            (1.0 / f, 2.0 * PI * PI * f * f)
        }
    }

    /// Time at which the Gaussian envelope peaks, `chi`; zero for non-Gaussian kinds.
    #[must_use]
    pub fn centre_time(&self) -> Scalar {
        if self.kind.is_gaussian() {
            self.coefficients().0
        } else {
            0.0
        }
    }

    /// Evaluates the waveform at `time` seconds.
    ///
    /// `dt` is the simulation time step and only matters for
    /// [`WaveformKind::Impulse`]. Negative times are valid and describe the
    /// excitation before the run starts.
    #[must_use]
    pub fn value(&self, time: Scalar, dt: Scalar) -> Scalar {
        let shape = match self.kind {
            WaveformKind::Sine => {
                if time * self.frequency > 1.0 {
                    0.0
                } else {
                    (2.0 * PI * self.frequency * time).sin()
                }
            }
            WaveformKind::ContSine => {
                let ramp = (0.25 * time * self.frequency).min(1.0);
                ramp * (2.0 * PI * self.frequency * time).sin()
            }
            WaveformKind::Impulse => {
                if time < dt {
                    1.0
                } else {
                    0.0
                }
            }
            WaveformKind::Gaussian => self.gaussian_terms(time).envelope,
            WaveformKind::GaussianDot | WaveformKind::GaussianPrime => {
                self.gaussian_terms(time).dot
            }
            WaveformKind::GaussianDotNorm => {
                let g = self.gaussian_terms(time);
                g.dot * (E / (2.0 * g.zeta)).sqrt()
            }
            WaveformKind::GaussianDotDot | WaveformKind::GaussianDoublePrime => {
                self.gaussian_terms(time).dotdot
            }
            WaveformKind::GaussianDotDotNorm => {
                let g = self.gaussian_terms(time);
                g.dotdot / (2.0 * g.zeta)
            }
            WaveformKind::Ricker => {
                let g = self.gaussian_terms(time);
                -g.dotdot / (2.0 * g.zeta)
            }
        };
        self.amplitude * shape
    }

    fn gaussian_terms(&self, time: Scalar) -> GaussianTerms {
        let (chi, zeta) = self.coefficients();
        let delay = time - chi;
        let envelope = (-zeta * delay * delay).exp();
        // Far tails: keep 0 * inf from producing NaN.
        if envelope == 0.0 {
            return GaussianTerms {
                envelope: 0.0,
                dot: 0.0,
                dotdot: 0.0,
                zeta,
            };
        }
        GaussianTerms {
            envelope,
            dot: -2.0 * zeta * delay * envelope,
            dotdot: 2.0 * zeta * (2.0 * zeta * delay * delay - 1.0) * envelope,
            zeta,
        }
    }
}

/// Unit-amplitude Gaussian and its first two derivatives at one instant.
struct GaussianTerms {
    envelope: Scalar,
    dot: Scalar,
    dotdot: Scalar,
    zeta: Scalar,
}

/// Evaluates a waveform of the given family at `time`.
///
/// Equivalent to `Waveform::new(kind, amplitude, frequency).value(time, 0.0)`,
/// so an [`WaveformKind::Impulse`] is on for every negative time.
#[must_use]
pub fn evaluate(kind: WaveformKind, amplitude: Scalar, frequency: Scalar, time: Scalar) -> Scalar {
    Waveform::new(kind, amplitude, frequency).value(time, 0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const FREQUENCIES: [Scalar; 2] = [1.0e9, 3.5e8];

    fn peak_abs(w: &Waveform) -> Scalar {
        let chi = w.centre_time();
        let step = chi / 2000.0;
        (0..8000)
            .map(|i| w.value(i as Scalar * step, 0.0).abs())
            .fold(0.0, Scalar::max)
    }

    fn sample_times(freq: Scalar) -> [Scalar; 6] {
        let chi = 1.0 / freq;
        [
            0.4 * chi,
            0.8 * chi,
            0.95 * chi,
            chi,
            1.1 * chi,
            1.6 * chi,
        ]
    }

    #[test]
    fn integral_differentiates_to_pulse() {
        for freq in FREQUENCIES {
            let (integral, pulse, _) = Waveform::dipole_triplet(1.0, freq);
            let scale = peak_abs(&pulse);
            let h = 1.0e-4 / freq;
            for t in sample_times(freq) {
                let fd = (integral.value(t + h, 0.0) - integral.value(t - h, 0.0)) / (2.0 * h);
                let exact = pulse.value(t, 0.0);
                assert!(
                    (fd - exact).abs() <= 1.0e-6 * scale,
                    "freq {freq}, t {t}: fd {fd} vs {exact}"
                );
            }
        }
    }

    #[test]
    fn pulse_differentiates_to_derivative() {
        for freq in FREQUENCIES {
            let (_, pulse, derivative) = Waveform::dipole_triplet(2.0, freq);
            let scale = peak_abs(&derivative);
            let h = 1.0e-4 / freq;
            for t in sample_times(freq) {
                let fd = (pulse.value(t + h, 0.0) - pulse.value(t - h, 0.0)) / (2.0 * h);
                let exact = derivative.value(t, 0.0);
                assert!(
                    (fd - exact).abs() <= 1.0e-6 * scale,
                    "freq {freq}, t {t}: fd {fd} vs {exact}"
                );
            }
        }
    }

    #[test]
    fn integrating_derivative_recovers_pulse() {
        for freq in FREQUENCIES {
            let (_, pulse, derivative) = Waveform::dipole_triplet(1.0, freq);
            let scale = peak_abs(&pulse);
            let start = -1.0 / freq;
            let steps_per_period = 20_000;
            let h = 1.0 / (freq * steps_per_period as Scalar);
            let mut acc = 0.0;
            let mut t = start;
            let mut prev = derivative.value(t, 0.0);
            for (k, target) in sample_times(freq).into_iter().enumerate() {
                while t + h <= target {
                    let next = derivative.value(t + h, 0.0);
                    acc += 0.5 * h * (prev + next);
                    prev = next;
                    t += h;
                }
                let expected = pulse.value(t, 0.0) - pulse.value(start, 0.0);
                assert!(
                    (acc - expected).abs() <= 1.0e-5 * scale,
                    "freq {freq}, sample {k}: {acc} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn pulse_is_negligible_before_start() {
        let (integral, pulse, derivative) = Waveform::dipole_triplet(1.0, 1.0e9);
        for w in [integral, pulse, derivative] {
            let scale = peak_abs(&w);
            assert!(w.value(-1.0e-9, 0.0).abs() < 1.0e-12 * scale);
        }
    }

    #[test]
    fn far_tails_are_finite() {
        for kind in WaveformKind::ALL {
            let w = Waveform::new(kind, 1.0, 1.0e9);
            for t in [-1.0, -1.0e-6, 1.0e-6, 1.0] {
                assert!(w.value(t, 1.0e-12).is_finite(), "{kind} at {t}");
            }
        }
        for kind in WaveformKind::ALL.into_iter().filter(|k| k.is_gaussian()) {
            let w = Waveform::new(kind, 1.0, 1.0e9);
            assert_eq!(w.value(-1.0e300, 0.0), 0.0);
            assert_eq!(w.value(1.0e300, 0.0), 0.0);
        }
    }

    #[test]
    fn normalised_kinds_peak_at_amplitude() {
        for kind in [WaveformKind::GaussianDotNorm, WaveformKind::GaussianDotDotNorm] {
            let w = Waveform::new(kind, 3.0, 1.0e9);
            assert_relative_eq!(peak_abs(&w), 3.0, max_relative = 1.0e-4);
        }
    }

    #[test]
    fn ricker_is_negated_normalised_dotdot() {
        let ricker = Waveform::new(WaveformKind::Ricker, 1.0, 1.0e9);
        let norm = Waveform::new(WaveformKind::GaussianDotDotNorm, 1.0, 1.0e9);
        let chi = ricker.centre_time();
        assert_relative_eq!(chi, Scalar::sqrt(2.0) * 1.0e-9, max_relative = 1.0e-12);
        assert_relative_eq!(ricker.value(chi, 0.0), 1.0, max_relative = 1.0e-12);
        for t in [0.3 * chi, chi, 1.7 * chi] {
            assert_eq!(ricker.value(t, 0.0), -norm.value(t, 0.0));
        }
    }

    #[test]
    fn sine_stops_after_one_cycle() {
        let w = Waveform::new(WaveformKind::Sine, 1.0, 1.0e9);
        assert_relative_eq!(w.value(0.25e-9, 0.0), 1.0, max_relative = 1.0e-12);
        assert_eq!(w.value(1.5e-9, 0.0), 0.0);
    }

    #[test]
    fn contsine_ramps_over_four_cycles() {
        let w = Waveform::new(WaveformKind::ContSine, 2.0, 1.0e9);
        assert_relative_eq!(w.value(0.25e-9, 0.0), 2.0 * 0.0625, max_relative = 1.0e-9);
        assert_relative_eq!(w.value(10.25e-9, 0.0), 2.0, max_relative = 1.0e-9);
    }

    #[test]
    fn impulse_lasts_one_step() {
        let w = Waveform::new(WaveformKind::Impulse, 1.0, 1.0e9);
        assert_eq!(w.value(0.0, 1.0e-12), 1.0);
        assert_eq!(w.value(1.0e-12, 1.0e-12), 0.0);
    }

    #[test]
    fn evaluate_matches_waveform_value() {
        let w = Waveform::new(WaveformKind::GaussianPrime, 1.5, 1.0e9);
        let t = 0.7e-9;
        assert_eq!(evaluate(w.kind, w.amplitude, w.frequency, t), w.value(t, 0.0));
    }

    #[test]
    fn kinds_parse_from_simulator_names() {
        assert_eq!(
            "gaussiandoubleprime".parse::<WaveformKind>(),
            Ok(WaveformKind::GaussianDoublePrime)
        );
        assert_eq!(" Ricker ".parse::<WaveformKind>(), Ok(WaveformKind::Ricker));
        assert_eq!(
            "square".parse::<WaveformKind>(),
            Err(WaveformError::UnknownKind("square".into()))
        );
        assert_eq!(WaveformKind::ContSine.to_string(), "contsine");
    }
}
