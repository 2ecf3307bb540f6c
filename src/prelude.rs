//! Convenience re-exports for building reference comparisons.

pub use crate::constants::*;
pub use crate::directives::{
    emit, hertzian_dipole, rx, rx_steps, src_steps, waveform, Directive, DirectiveError,
    Polarisation, Rotate90, Rx,
};
pub use crate::errors::EmDipoleError;
pub use crate::fields::{
    compute_fields, compute_fields_with, ComponentGeometry, DipoleExcitation, DipoleGeometry,
    DipoleWaveforms, FieldComponent, FieldSample, FieldTable, ReceiverOffset, RetardedTerms,
    SpatialResolution,
};
#[cfg(feature = "parallel")]
pub use crate::fields::compute_fields_par;
pub use crate::math::{ratio_or_zero, R3, Scalar};
pub use crate::simulation::{
    run_reference, write_component_csv, write_fields_csv, AnalyticalDipole, SimulationConfig,
    SimulationEngine, SimulationError,
};
pub use crate::validation::{compare, ComparisonReport, ComponentError};
pub use crate::waveforms::{evaluate, Waveform, WaveformError, WaveformKind};
