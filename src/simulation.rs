//! Run configuration, the reference engine and CSV export.

use std::io;
use std::io::Write;

use tracing::{debug, warn};

use crate::fields::{
    compute_fields_with, DipoleExcitation, DipoleGeometry, FieldComponent, FieldTable,
    ReceiverOffset, SpatialResolution,
};
use crate::math::Scalar;

/// Errors that can occur while configuring or executing reference runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised when a computed field value is NaN or infinite.
    #[error("non-finite {component} at time step {timestep}")]
    NonFinite {
        /// Offending component.
        component: FieldComponent,
        /// Offending time step.
        timestep: usize,
    },
    /// Raised when two traces that should be compared sample by sample differ in length.
    #[error("trace length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch {
        /// Reference length.
        expected: usize,
        /// Length of the trace under test.
        actual: usize,
    },
}

/// Description of one reference run.
///
/// The run length is given either as an explicit iteration count or as a time
/// window; an explicit count wins when both are present.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Number of time steps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub iterations: Option<usize>,
    /// Time window in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_window: Option<Scalar>,
    /// Time step in seconds.
    pub dt: Scalar,
    /// FDTD cell size.
    pub resolution: SpatialResolution,
    /// Receiver position relative to the dipole.
    pub receiver: ReceiverOffset,
    /// Dipole excitation; the 1 GHz unit pulse unless overridden.
    #[cfg_attr(feature = "serde", serde(default))]
    pub excitation: DipoleExcitation,
}

impl SimulationConfig {
    /// Creates a configuration running for a fixed number of time steps.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        iterations: usize,
        dt: Scalar,
        resolution: SpatialResolution,
        receiver: ReceiverOffset,
    ) -> Self {
        Self {
            name: name.into(),
            iterations: Some(iterations),
            time_window: None,
            dt,
            resolution,
            receiver,
            excitation: DipoleExcitation::REFERENCE,
        }
    }

    /// Creates a configuration covering `time_window` seconds.
    #[must_use]
    pub fn with_time_window(
        name: impl Into<String>,
        time_window: Scalar,
        dt: Scalar,
        resolution: SpatialResolution,
        receiver: ReceiverOffset,
    ) -> Self {
        Self {
            name: name.into(),
            iterations: None,
            time_window: Some(time_window),
            dt,
            resolution,
            receiver,
            excitation: DipoleExcitation::REFERENCE,
        }
    }

    /// Replaces the excitation.
    #[must_use]
    pub fn with_excitation(mut self, excitation: DipoleExcitation) -> Self {
        self.excitation = excitation;
        self
    }

    /// Number of time steps: the explicit count, or `ceil(time_window / dt) + 1`.
    pub fn iteration_count(&self) -> Result<usize, SimulationError> {
        if let Some(n) = self.iterations {
            return Ok(n);
        }
        let window = self
            .time_window
            .ok_or(SimulationError::MissingParameter("iterations or time_window"))?;
        if !window.is_finite() || window < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "time_window must be finite and >= 0, got {window}"
            )));
        }
        let steps = (window / self.dt).ceil();
        if !steps.is_finite() || steps >= usize::MAX as Scalar {
            return Err(SimulationError::InvalidConfig(format!(
                "time_window {window} s at dt {} s needs more steps than fit in usize",
                self.dt
            )));
        }
        (steps as usize).checked_add(1).ok_or_else(|| {
            SimulationError::InvalidConfig(format!(
                "time_window {window} s overflows the step count"
            ))
        })
    }

    /// Checks every precondition of the field calculator.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if !self.resolution.is_valid() {
            return Err(SimulationError::InvalidConfig(format!(
                "resolution must be finite and > 0, got {:?}",
                self.resolution
            )));
        }
        if !self.receiver.to_vector().iter().all(|v| v.is_finite()) {
            return Err(SimulationError::InvalidConfig(format!(
                "receiver offset must be finite, got {:?}",
                self.receiver
            )));
        }
        let DipoleExcitation {
            amplitude,
            frequency,
        } = self.excitation;
        if !amplitude.is_finite() || !(frequency.is_finite() && frequency > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "excitation needs a finite amplitude and frequency > 0, \
                 got {amplitude} at {frequency} Hz"
            )));
        }
        if DipoleGeometry::new(self.resolution, self.receiver).is_singular() {
            return Err(SimulationError::InvalidConfig(
                "a staggered receiver point coincides with the dipole".into(),
            ));
        }
        self.iteration_count().map(|_| ())
    }
}

/// Trait for anything that produces a field table for a configuration.
///
/// The analytical dipole implements it; adapters around a numerical solver can
/// implement it too so both sides of a validation share one entry point.
pub trait SimulationEngine {
    /// Executes the run described by `config`.
    fn run(&mut self, config: &SimulationConfig) -> Result<FieldTable, SimulationError>;
}

/// Engine backed by the closed-form Hertzian dipole solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticalDipole {
    /// Evaluate time steps on the rayon pool.
    #[cfg(feature = "parallel")]
    pub parallel: bool,
}

impl SimulationEngine for AnalyticalDipole {
    fn run(&mut self, config: &SimulationConfig) -> Result<FieldTable, SimulationError> {
        config.validate()?;
        let iterations = config.iteration_count()?;
        debug!(name = %config.name, iterations, "running analytical reference");

        #[cfg(feature = "parallel")]
        let table = if self.parallel {
            crate::fields::compute_fields_par(
                iterations,
                config.dt,
                config.resolution,
                config.receiver,
                config.excitation,
            )
        } else {
            compute_fields_with(
                iterations,
                config.dt,
                config.resolution,
                config.receiver,
                config.excitation,
            )
        };
        #[cfg(not(feature = "parallel"))]
        let table = compute_fields_with(
            iterations,
            config.dt,
            config.resolution,
            config.receiver,
            config.excitation,
        );

        if let Some((timestep, component)) = table.first_non_finite() {
            warn!(name = %config.name, timestep, %component, "non-finite field value");
            return Err(SimulationError::NonFinite {
                component,
                timestep,
            });
        }
        Ok(table)
    }
}

/// Validates `config` and computes its reference field table.
pub fn run_reference(config: &SimulationConfig) -> Result<FieldTable, SimulationError> {
    AnalyticalDipole::default().run(config)
}

/// Writes a field table as CSV with columns `time,Ex,Ey,Ez,Hx,Hy,Hz`.
pub fn write_fields_csv<W: Write>(mut w: W, table: &FieldTable) -> io::Result<()> {
    write!(w, "time")?;
    for c in FieldComponent::ALL {
        write!(w, ",{c}")?;
    }
    writeln!(w)?;
    for (time, sample) in table.times().zip(table.rows()) {
        write!(w, "{:.16e}", time)?;
        for value in sample.0 {
            write!(w, ",{:.16e}", value)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Writes one component of a field table as a two-column CSV.
pub fn write_component_csv<W: Write>(
    mut w: W,
    table: &FieldTable,
    component: FieldComponent,
) -> io::Result<()> {
    writeln!(w, "time,{component}")?;
    for (time, value) in table.times().zip(table.component(component)) {
        writeln!(w, "{:.16e},{:.16e}", time, value)?;
    }
    Ok(())
}
