use std::fmt;
use std::ops::Index;

use crate::math::{R3, Scalar};

/// Field components in output column order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldComponent {
    /// x-directed electric field (V/m).
    Ex,
    /// y-directed electric field (V/m).
    Ey,
    /// z-directed electric field (V/m).
    Ez,
    /// x-directed magnetic field (A/m).
    Hx,
    /// y-directed magnetic field (A/m).
    Hy,
    /// z-directed magnetic field (A/m).
    Hz,
}

impl FieldComponent {
    /// All components, in column order.
    pub const ALL: [Self; 6] = [Self::Ex, Self::Ey, Self::Ez, Self::Hx, Self::Hy, Self::Hz];

    /// Column index of the component in a [`FieldSample`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short name as used in receiver outputs (`"Ex"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ex => "Ex",
            Self::Ey => "Ey",
            Self::Ez => "Ez",
            Self::Hx => "Hx",
            Self::Hy => "Hy",
            Self::Hz => "Hz",
        }
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field values at one time step, ordered `(Ex, Ey, Ez, Hx, Hy, Hz)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample(pub [Scalar; 6]);

impl FieldSample {
    /// Builds a sample from its six components.
    #[must_use]
    pub const fn new(
        ex: Scalar,
        ey: Scalar,
        ez: Scalar,
        hx: Scalar,
        hy: Scalar,
        hz: Scalar,
    ) -> Self {
        Self([ex, ey, ez, hx, hy, hz])
    }

    /// Value of one component.
    #[must_use]
    pub const fn get(&self, component: FieldComponent) -> Scalar {
        self.0[component.index()]
    }

    /// Electric field vector (V/m).
    #[must_use]
    pub fn electric(&self) -> R3 {
        R3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Magnetic field vector (A/m).
    #[must_use]
    pub fn magnetic(&self) -> R3 {
        R3::new(self.0[3], self.0[4], self.0[5])
    }

    /// First component holding a NaN or infinite value.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<FieldComponent> {
        FieldComponent::ALL
            .into_iter()
            .find(|&c| !self.get(c).is_finite())
    }
}

impl Index<FieldComponent> for FieldSample {
    type Output = Scalar;

    fn index(&self, component: FieldComponent) -> &Self::Output {
        &self.0[component.index()]
    }
}

impl From<[Scalar; 6]> for FieldSample {
    fn from(values: [Scalar; 6]) -> Self {
        Self(values)
    }
}

/// Time series of field samples; the row index is the time step.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTable {
    dt: Scalar,
    samples: Vec<FieldSample>,
}

impl FieldTable {
    /// Wraps samples taken every `dt` seconds starting at `t = 0`.
    #[must_use]
    pub const fn new(dt: Scalar, samples: Vec<FieldSample>) -> Self {
        Self { dt, samples }
    }

    /// Time step in seconds.
    #[must_use]
    pub const fn dt(&self) -> Scalar {
        self.dt
    }

    /// Number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the table holds no time steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All rows in time order.
    #[must_use]
    pub fn rows(&self) -> &[FieldSample] {
        &self.samples
    }

    /// Sample times `timestep * dt`.
    pub fn times(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.samples.len()).map(move |step| step as Scalar * self.dt)
    }

    /// One component as a column.
    #[must_use]
    pub fn component(&self, component: FieldComponent) -> Vec<Scalar> {
        self.samples.iter().map(|s| s.get(component)).collect()
    }

    /// Time step and signed value of the largest-magnitude entry of a component.
    ///
    /// Returns `None` for an empty table. NaN entries are skipped.
    #[must_use]
    pub fn peak(&self, component: FieldComponent) -> Option<(usize, Scalar)> {
        self.samples
            .iter()
            .map(|s| s.get(component))
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best: Option<(usize, Scalar)>, (step, v)| match best {
                Some((_, b)) if b.abs() >= v.abs() => best,
                _ => Some((step, v)),
            })
    }

    /// First `(timestep, component)` holding a non-finite value.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, FieldComponent)> {
        self.samples
            .iter()
            .enumerate()
            .find_map(|(step, s)| s.first_non_finite().map(|c| (step, c)))
    }
}

impl Index<usize> for FieldTable {
    type Output = FieldSample;

    fn index(&self, step: usize) -> &Self::Output {
        &self.samples[step]
    }
}
