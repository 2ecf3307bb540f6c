//! Analytical field solutions and the sampled field containers they produce.

mod dipole;
mod sample;

pub use dipole::{
    compute_fields, compute_fields_with, ComponentGeometry, DipoleExcitation, DipoleGeometry,
    DipoleWaveforms, ReceiverOffset, RetardedTerms, SpatialResolution, REFERENCE_AMPLITUDE,
    REFERENCE_FREQUENCY,
};
#[cfg(feature = "parallel")]
pub use dipole::compute_fields_par;
pub use sample::{FieldComponent, FieldSample, FieldTable};
