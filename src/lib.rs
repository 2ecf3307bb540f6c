#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Free-space physical constants.
pub mod constants;
/// Shared numerical primitives.
pub mod math;
/// Analytical excitation waveforms and their calculus siblings.
pub mod waveforms;
/// Analytical dipole fields and sampled field containers.
pub mod fields;
/// Run configuration, the reference engine and CSV export.
pub mod simulation;
/// Simulator input directive writer.
pub mod directives;
/// Comparison of simulated traces against the reference.
pub mod validation;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
