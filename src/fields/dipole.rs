//! Closed-form fields of a z-directed Hertzian dipole in free space.
//!
//! The dipole sits at the origin and carries the current `I(t)`, its charge
//! `q(t) = ∫I dt` and `dI/dt` (see [`Waveform::dipole_triplet`]). Each field
//! component is evaluated at the receiver position shifted by half a cell
//! exactly where an FDTD (Yee) grid stores that component, and at its own
//! retarded time `t - r/c`, so the result can be compared sample by sample
//! with a simulated receiver.
//!
//! Reference: Shlager & Smith, "Comparison of two FDTD near-field to near-field
//! transformations applied to pulsed antenna problems",
//! <http://dx.doi.org/10.1016/0021-9991(83)90103-1>.

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::constants::{propagation_delay, VACUUM_PERMITTIVITY};
use crate::math::{ratio_or_zero, sign_or_positive, R3, Scalar};
use crate::waveforms::Waveform;

use super::sample::{FieldComponent, FieldSample, FieldTable};

/// Amplitude of the reference excitation.
pub const REFERENCE_AMPLITUDE: Scalar = 1.0;
/// Centre frequency of the reference excitation in hertz.
pub const REFERENCE_FREQUENCY: Scalar = 1.0e9;

/// FDTD cell size `(dx, dy, dz)` in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialResolution {
    /// Cell size along x.
    pub dx: Scalar,
    /// Cell size along y.
    pub dy: Scalar,
    /// Cell size along z; also the dipole length.
    pub dz: Scalar,
}

impl SpatialResolution {
    /// Creates a resolution triple.
    #[must_use]
    pub const fn new(dx: Scalar, dy: Scalar, dz: Scalar) -> Self {
        Self { dx, dy, dz }
    }

    /// Cubic cells of side `d`.
    #[must_use]
    pub const fn uniform(d: Scalar) -> Self {
        Self::new(d, d, d)
    }

    /// Effective length of the dipole, one cell along z.
    #[must_use]
    pub const fn dipole_length(&self) -> Scalar {
        self.dz
    }

    /// True if every cell dimension is finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.dx, self.dy, self.dz]
            .into_iter()
            .all(|d| d.is_finite() && d > 0.0)
    }
}

/// Receiver position relative to the dipole, in meters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverOffset {
    /// Offset along x.
    pub x: Scalar,
    /// Offset along y.
    pub y: Scalar,
    /// Offset along z.
    pub z: Scalar,
}

impl ReceiverOffset {
    /// Creates a receiver offset.
    #[must_use]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// The offset as a vector.
    #[must_use]
    pub fn to_vector(&self) -> R3 {
        R3::new(self.x, self.y, self.z)
    }
}

/// Amplitude and centre frequency shared by the three dipole waveforms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleExcitation {
    /// Peak scaling of the current pulse.
    pub amplitude: Scalar,
    /// Centre frequency in hertz.
    pub frequency: Scalar,
}

impl DipoleExcitation {
    /// The excitation the reference solution is tied to: unit amplitude at 1 GHz.
    pub const REFERENCE: Self = Self {
        amplitude: REFERENCE_AMPLITUDE,
        frequency: REFERENCE_FREQUENCY,
    };

    /// Builds the integral, pulse and derivative waveforms.
    #[must_use]
    pub const fn waveforms(&self) -> DipoleWaveforms {
        let (integral, pulse, derivative) =
            Waveform::dipole_triplet(self.amplitude, self.frequency);
        DipoleWaveforms {
            integral,
            pulse,
            derivative,
        }
    }
}

impl Default for DipoleExcitation {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The current pulse of the dipole together with its exact integral and derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleWaveforms {
    /// Charge `q(t)`.
    pub integral: Waveform,
    /// Current `I(t)`.
    pub pulse: Waveform,
    /// `dI/dt`.
    pub derivative: Waveform,
}

impl DipoleWaveforms {
    /// Evaluates all three waveforms at `time`, scaled by the dipole length `dl`.
    #[must_use]
    pub fn retarded_terms(&self, time: Scalar, dt: Scalar, dl: Scalar) -> RetardedTerms {
        RetardedTerms {
            integral: self.integral.value(time, dt) * dl,
            value: self.pulse.value(time, dt) * dl,
            derivative: self.derivative.value(time, dt) * dl,
        }
    }
}

/// Source terms `(q·dl, I·dl, dI/dt·dl)` at one retarded time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetardedTerms {
    /// `q(t - τ)·dl`.
    pub integral: Scalar,
    /// `I(t - τ)·dl`.
    pub value: Scalar,
    /// `dI/dt(t - τ)·dl`.
    pub derivative: Scalar,
}

/// Staggered receiver point of one field component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentGeometry {
    /// Position relative to the dipole.
    pub point: R3,
    /// Distance from the dipole, `|point|`.
    pub distance: Scalar,
    /// Free-space travel time `distance / c`.
    pub delay: Scalar,
}

impl ComponentGeometry {
    fn at(point: R3) -> Self {
        let distance = point.norm();
        Self {
            point,
            distance,
            delay: propagation_delay(distance),
        }
    }
}

/// Per-component receiver geometry, computed once per receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleGeometry {
    dipole_length: Scalar,
    sign_z: Scalar,
    components: [ComponentGeometry; 6],
}

impl DipoleGeometry {
    /// Places every field component on its Yee-grid position around `receiver`.
    ///
    /// Electric components along x and y, and Hz, sit half a cell below the
    /// receiver in z; x-staggered components sit half a cell forward in x and
    /// y-staggered ones half a cell forward in y.
    #[must_use]
    pub fn new(resolution: SpatialResolution, receiver: ReceiverOffset) -> Self {
        let SpatialResolution { dx, dy, dz } = resolution;
        let ReceiverOffset { x, y, z } = receiver;
        let hx = 0.5 * dx;
        let hy = 0.5 * dy;
        let hz = 0.5 * dz;
        let components = [
            ComponentGeometry::at(R3::new(x + hx, y, z - hz)),
            ComponentGeometry::at(R3::new(x, y + hy, z - hz)),
            ComponentGeometry::at(R3::new(x, y, z)),
            ComponentGeometry::at(R3::new(x, y + hy, z)),
            ComponentGeometry::at(R3::new(x + hx, y, z)),
            ComponentGeometry::at(R3::new(x + hx, y + hy, z - hz)),
        ];
        Self {
            dipole_length: resolution.dipole_length(),
            sign_z: sign_or_positive(z),
            components,
        }
    }

    /// Dipole length `dl`.
    #[must_use]
    pub const fn dipole_length(&self) -> Scalar {
        self.dipole_length
    }

    /// `+1` for receivers on or above the `z = 0` plane, `-1` below it.
    ///
    /// No field expression depends on it; it is reported for callers that
    /// mirror receivers across the dipole plane.
    #[must_use]
    pub const fn sign_z(&self) -> Scalar {
        self.sign_z
    }

    /// Geometry of one component.
    #[must_use]
    pub const fn component(&self, component: FieldComponent) -> &ComponentGeometry {
        &self.components[component.index()]
    }

    /// True if any component lies on the dipole itself, where the fields are singular.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.components.iter().any(|c| c.distance == 0.0)
    }

    /// Field sample at `time` seconds.
    #[must_use]
    pub fn sample(&self, time: Scalar, dt: Scalar, waveforms: &DipoleWaveforms) -> FieldSample {
        let terms = |c: FieldComponent| {
            let g = self.component(c);
            (g, waveforms.retarded_terms(time - g.delay, dt, self.dipole_length))
        };
        let (gx, ex) = terms(FieldComponent::Ex);
        let (gy, ey) = terms(FieldComponent::Ey);
        let (gz, ez) = terms(FieldComponent::Ez);
        let (ghx, hx) = terms(FieldComponent::Hx);
        let (ghy, hy) = terms(FieldComponent::Hy);
        FieldSample::new(
            electric_x(gx, ex),
            electric_y(gy, ey),
            electric_z(gz, ez),
            magnetic_x(ghx, hx),
            magnetic_y(ghy, hy),
            0.0,
        )
    }
}

#[inline]
fn transverse_electric(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    let p = g.point;
    let tau = g.delay;
    (p.x * p.z) / (4.0 * PI * VACUUM_PERMITTIVITY * g.distance.powi(5))
        * (3.0 * (f.integral + tau * f.value) + tau * tau * f.derivative)
}

fn electric_x(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    transverse_electric(g, f)
}

fn electric_y(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    ratio_or_zero(g.point.y, g.point.x) * transverse_electric(g, f)
}

fn electric_z(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    let p = g.point;
    let tau = g.delay;
    let rho2 = p.x * p.x + p.y * p.y;
    (1.0 / (4.0 * PI * VACUUM_PERMITTIVITY * g.distance.powi(5)))
        * ((2.0 * p.z * p.z - rho2) * (f.integral + tau * f.value)
            - rho2 * tau * tau * f.derivative)
}

#[inline]
fn azimuthal_magnetic(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    -(g.point.y / (4.0 * PI * g.distance.powi(3))) * (f.value + g.delay * f.derivative)
}

fn magnetic_x(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    azimuthal_magnetic(g, f)
}

fn magnetic_y(g: &ComponentGeometry, f: RetardedTerms) -> Scalar {
    -ratio_or_zero(g.point.x, g.point.y) * azimuthal_magnetic(g, f)
}

/// Computes the reference fields for `iterations` time steps of `dt` seconds
/// using the 1 GHz unit-amplitude excitation.
///
/// Row `n` holds the fields at `t = n·dt` in the order `(Ex, Ey, Ez, Hx, Hy, Hz)`.
/// Inputs are not validated: a receiver whose staggered point coincides with the
/// dipole yields non-finite values in that component.
#[must_use]
pub fn compute_fields(
    iterations: usize,
    dt: Scalar,
    resolution: SpatialResolution,
    receiver: ReceiverOffset,
) -> FieldTable {
    compute_fields_with(iterations, dt, resolution, receiver, DipoleExcitation::REFERENCE)
}

/// [`compute_fields`] with an explicit excitation.
#[must_use]
pub fn compute_fields_with(
    iterations: usize,
    dt: Scalar,
    resolution: SpatialResolution,
    receiver: ReceiverOffset,
    excitation: DipoleExcitation,
) -> FieldTable {
    let geometry = prepare(iterations, dt, resolution, receiver, excitation);
    let waveforms = excitation.waveforms();
    let samples = (0..iterations)
        .map(|step| geometry.sample(step as Scalar * dt, dt, &waveforms))
        .collect();
    FieldTable::new(dt, samples)
}

/// Parallel [`compute_fields_with`]; rows are identical to the serial result.
#[cfg(feature = "parallel")]
#[must_use]
pub fn compute_fields_par(
    iterations: usize,
    dt: Scalar,
    resolution: SpatialResolution,
    receiver: ReceiverOffset,
    excitation: DipoleExcitation,
) -> FieldTable {
    use rayon::prelude::*;

    let geometry = prepare(iterations, dt, resolution, receiver, excitation);
    let waveforms = excitation.waveforms();
    let samples = (0..iterations)
        .into_par_iter()
        .map(|step| geometry.sample(step as Scalar * dt, dt, &waveforms))
        .collect();
    FieldTable::new(dt, samples)
}

fn prepare(
    iterations: usize,
    dt: Scalar,
    resolution: SpatialResolution,
    receiver: ReceiverOffset,
    excitation: DipoleExcitation,
) -> DipoleGeometry {
    let geometry = DipoleGeometry::new(resolution, receiver);
    debug!(
        iterations,
        dt,
        ?receiver,
        amplitude = excitation.amplitude,
        frequency = excitation.frequency,
        sign_z = geometry.sign_z(),
        "computing Hertzian dipole reference"
    );
    for c in FieldComponent::ALL {
        let g = geometry.component(c);
        trace!(component = %c, distance = g.distance, delay = g.delay, "staggered receiver");
    }
    geometry
}
