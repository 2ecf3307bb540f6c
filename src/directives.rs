//! Writer for the FDTD simulator's text input directives.
//!
//! Every directive is a single line of the form `#name: arg1 arg2 ...`, with
//! optional trailing identifiers and flags. Receivers and sources can be
//! rotated by 90° about a pivot in the x-y plane, which needs the cell size to
//! re-anchor the rotated component on its grid edge.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::fields::{FieldComponent, SpatialResolution};
use crate::math::Scalar;
use crate::waveforms::Waveform;

/// Errors raised while assembling a directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// A 90° rotation was requested without the cell size needed to apply it.
    #[error("#{directive}: rotation requested without a dxdy offset")]
    MissingRotationOffset {
        /// Directive that could not be emitted.
        directive: &'static str,
    },
}

/// Field polarisation of a source or receiver.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarisation {
    /// Along x.
    X,
    /// Along y.
    Y,
    /// Along z.
    Z,
}

impl Polarisation {
    /// Polarisation after a 90° rotation in the x-y plane.
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
            Self::Z => Self::Z,
        }
    }
}

impl fmt::Display for Polarisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// 90° counter-clockwise rotation about `origin` in the x-y plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate90 {
    /// Pivot `(x, y)` in meters.
    pub origin: (Scalar, Scalar),
    /// Cell size `(dx, dy)`; required to emit a rotated directive.
    pub dxdy: Option<(Scalar, Scalar)>,
}

impl Rotate90 {
    /// Rotation about `origin` with the cell size taken from `resolution`.
    #[must_use]
    pub const fn about(origin: (Scalar, Scalar), resolution: SpatialResolution) -> Self {
        Self {
            origin,
            dxdy: Some((resolution.dx, resolution.dy)),
        }
    }

    /// Rotates the point a polarised component is anchored at.
    ///
    /// An x- or y-polarised component occupies the cell edge that starts at
    /// `(x, y)`. Both ends of that edge are rotated and the lower corner of
    /// the rotated edge becomes the new anchor.
    fn apply(
        &self,
        directive: &'static str,
        (x, y): (Scalar, Scalar),
        polarisation: Option<Polarisation>,
    ) -> Result<(Scalar, Scalar), DirectiveError> {
        let (dx, dy) = self
            .dxdy
            .ok_or(DirectiveError::MissingRotationOffset { directive })?;
        let start = self.rotate_point((x, y));
        let end = match polarisation {
            Some(Polarisation::X) => self.rotate_point((x + dx, y)),
            Some(Polarisation::Y) => self.rotate_point((x, y + dy)),
            Some(Polarisation::Z) | None => start,
        };
        Ok((start.0.min(end.0), start.1.min(end.1)))
    }

    fn rotate_point(&self, (x, y): (Scalar, Scalar)) -> (Scalar, Scalar) {
        let (ox, oy) = self.origin;
        (ox - (y - oy), oy + (x - ox))
    }
}

/// One input directive, rendered as `#name: args`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    name: &'static str,
    args: Vec<String>,
}

impl Directive {
    /// Starts a directive with no arguments.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Appends a numeric argument.
    #[must_use]
    pub fn number(mut self, value: Scalar) -> Self {
        self.args.push(format_number(value));
        self
    }

    /// Appends a free-form argument.
    #[must_use]
    pub fn word(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Directive name without the leading `#`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Arguments in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Integral values print without a fractional part, zero never prints as `-0`.
fn format_number(value: Scalar) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

/// Receiver directive builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rx<'a> {
    /// Receiver position `(x, y, z)` in meters.
    pub position: (Scalar, Scalar, Scalar),
    /// Optional identifier.
    pub id: Option<&'a str>,
    /// Components to record; only written when an identifier is given.
    pub outputs: &'a [FieldComponent],
    /// Polarisation used to re-anchor a rotated receiver.
    pub polarisation: Option<Polarisation>,
    /// Optional 90° rotation.
    pub rotate90: Option<Rotate90>,
}

impl Rx<'_> {
    /// Receiver at `(x, y, z)` with default outputs.
    #[must_use]
    pub fn at(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self {
            position: (x, y, z),
            ..Self::default()
        }
    }

    /// Builds the `#rx` directive.
    pub fn directive(&self) -> Result<Directive, DirectiveError> {
        let (mut x, mut y, z) = self.position;
        if let Some(rotation) = &self.rotate90 {
            (x, y) = rotation.apply("rx", (x, y), self.polarisation)?;
        }
        let mut d = Directive::new("rx").number(x).number(y).number(z);
        if let Some(id) = self.id {
            d = d.word(id);
            for output in self.outputs {
                d = d.word(output);
            }
        }
        Ok(d)
    }
}

/// `#rx` directive for a receiver at `(x, y, z)`.
pub fn rx(
    x: Scalar,
    y: Scalar,
    z: Scalar,
    id: Option<&str>,
    outputs: &[FieldComponent],
    polarisation: Option<Polarisation>,
    rotate90: Option<Rotate90>,
) -> Result<Directive, DirectiveError> {
    Rx {
        position: (x, y, z),
        id,
        outputs,
        polarisation,
        rotate90,
    }
    .directive()
}

/// `#src_steps` directive: per-run increments of every source position.
#[must_use]
pub fn src_steps(dx: Scalar, dy: Scalar, dz: Scalar) -> Directive {
    Directive::new("src_steps").number(dx).number(dy).number(dz)
}

/// `#rx_steps` directive: per-run increments of every receiver position.
#[must_use]
pub fn rx_steps(dx: Scalar, dy: Scalar, dz: Scalar) -> Directive {
    Directive::new("rx_steps").number(dx).number(dy).number(dz)
}

/// `#waveform` directive declaring `waveform` under `id`.
#[must_use]
pub fn waveform(waveform: &Waveform, id: &str) -> Directive {
    Directive::new("waveform")
        .word(waveform.kind)
        .number(waveform.amplitude)
        .number(waveform.frequency)
        .word(id)
}

/// `#hertzian_dipole` directive driven by the waveform `waveform_id`.
///
/// A rotation moves the dipole like a receiver and swaps x and y polarisation.
pub fn hertzian_dipole(
    polarisation: Polarisation,
    position: (Scalar, Scalar, Scalar),
    waveform_id: &str,
    rotate90: Option<Rotate90>,
) -> Result<Directive, DirectiveError> {
    let (mut x, mut y, z) = position;
    let mut polarisation = polarisation;
    if let Some(rotation) = &rotate90 {
        (x, y) = rotation.apply("hertzian_dipole", (x, y), Some(polarisation))?;
        polarisation = polarisation.rotated();
    }
    Ok(Directive::new("hertzian_dipole")
        .word(polarisation)
        .number(x)
        .number(y)
        .number(z)
        .word(waveform_id))
}

/// Writes `directive` as one line.
pub fn emit<W: Write>(mut w: W, directive: &Directive) -> io::Result<()> {
    writeln!(w, "{directive}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldComponent::{Ex, Ez};
    use crate::waveforms::WaveformKind;

    #[test]
    fn rx_at_origin() {
        let d = rx(0.0, 0.0, 0.0, None, &[], None, None).expect("no rotation");
        assert_eq!(d.to_string(), "#rx: 0 0 0");
    }

    #[test]
    fn rx_with_id() {
        let d = rx(0.0, 1.0, 2.0, Some("id"), &[], None, None).expect("no rotation");
        assert_eq!(d.to_string(), "#rx: 0 1 2 id");
    }

    #[test]
    fn rx_polarisation_is_ignored_without_rotation() {
        let d = rx(2.0, 1.0, 0.0, Some("id"), &[Ex], Some(Polarisation::Y), None)
            .expect("no rotation");
        assert_eq!(d.to_string(), "#rx: 2 1 0 id Ex");
    }

    #[test]
    fn rx_with_multiple_outputs() {
        let d = Rx {
            id: Some("id"),
            outputs: &[Ex, Ez],
            ..Rx::at(2.0, 1.0, 0.0)
        };
        assert_eq!(d.directive().expect("no rotation").to_string(), "#rx: 2 1 0 id Ex Ez");
    }

    #[test]
    fn rx_rotation_without_offset_fails() {
        let rotation = Rotate90 {
            origin: (1.0, 1.0),
            dxdy: None,
        };
        let err = rx(2.0, 1.0, 0.0, Some("id"), &[Ex, Ez], Some(Polarisation::X), Some(rotation))
            .expect_err("dxdy missing");
        assert_eq!(err, DirectiveError::MissingRotationOffset { directive: "rx" });
    }

    #[test]
    fn rx_rotation_swaps_about_pivot() {
        let rotation = Rotate90 {
            origin: (1.0, 1.0),
            dxdy: Some((0.0, 0.0)),
        };
        let d = rx(2.0, 1.0, 0.0, Some("id"), &[Ex, Ez], Some(Polarisation::X), Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#rx: 1 2 0 id Ex Ez");
    }

    #[test]
    fn rotated_x_edge_keeps_its_start_corner() {
        // Edge (1, 0)-(1.5, 0) turns into (0, 1)-(0, 1.5).
        let rotation = Rotate90::about((0.0, 0.0), SpatialResolution::uniform(0.5));
        let d = rx(1.0, 0.0, 0.0, None, &[], Some(Polarisation::X), Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#rx: 0 1 0");
    }

    #[test]
    fn rotated_y_edge_anchors_at_its_lower_corner() {
        // Edge (1, 0)-(1, 0.25) turns into (-0.25, 1)-(0, 1).
        let rotation = Rotate90 {
            origin: (0.0, 0.0),
            dxdy: Some((0.5, 0.25)),
        };
        let d = rx(1.0, 0.0, 0.0, None, &[], Some(Polarisation::Y), Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#rx: -0.25 1 0");

        let d = hertzian_dipole(Polarisation::Y, (2.0, 1.0, 0.5), "pulse", Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#hertzian_dipole: x -1.25 2 0.5 pulse");
    }

    #[test]
    fn rotated_z_component_only_moves_its_point() {
        let rotation = Rotate90::about((1.0, 1.0), SpatialResolution::uniform(0.5));
        let d = rx(2.0, 1.0, 3.0, None, &[], Some(Polarisation::Z), Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#rx: 1 2 3");
    }

    #[test]
    fn steps_default_and_fractional() {
        assert_eq!(src_steps(0.0, 0.0, 0.0).to_string(), "#src_steps: 0 0 0");
        assert_eq!(src_steps(42.0, 43.0, 44.2).to_string(), "#src_steps: 42 43 44.2");
        assert_eq!(rx_steps(0.0, 0.0, 0.0).to_string(), "#rx_steps: 0 0 0");
        assert_eq!(rx_steps(42.0, 43.0, 44.2).to_string(), "#rx_steps: 42 43 44.2");
    }

    #[test]
    fn dipole_model_directives() {
        let w = Waveform::new(WaveformKind::GaussianDot, 1.0, 1.0e9);
        assert_eq!(
            waveform(&w, "pulse").to_string(),
            "#waveform: gaussiandot 1 1000000000 pulse"
        );
        let d = hertzian_dipole(Polarisation::Z, (0.05, 0.05, 0.05), "pulse", None)
            .expect("no rotation");
        assert_eq!(d.to_string(), "#hertzian_dipole: z 0.05 0.05 0.05 pulse");
    }

    #[test]
    fn rotated_dipole_swaps_polarisation() {
        let rotation = Rotate90 {
            origin: (0.0, 0.0),
            dxdy: Some((0.0, 0.0)),
        };
        let d = hertzian_dipole(Polarisation::X, (1.0, 0.0, 0.0), "pulse", Some(rotation))
            .expect("dxdy given");
        assert_eq!(d.to_string(), "#hertzian_dipole: y 0 1 0 pulse");
    }

    #[test]
    fn emit_writes_one_line() {
        let mut buf = Vec::new();
        emit(&mut buf, &rx_steps(1.0, 0.0, 0.0)).expect("in-memory write");
        assert_eq!(buf, b"#rx_steps: 1 0 0\n");
    }
}
