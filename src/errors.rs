//! Shared error types used across submodules.

use thiserror::Error;

use crate::directives::DirectiveError;
use crate::simulation::SimulationError;
use crate::waveforms::WaveformError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum EmDipoleError {
    /// Wraps configuration and run errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps directive assembly errors.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    /// Wraps waveform parsing errors.
    #[error(transparent)]
    Waveform(#[from] WaveformError),
    /// Raised when writing output fails.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
