//! Error metrics between a simulated receiver trace and the analytical reference.

use tracing::debug;

use crate::fields::{FieldComponent, FieldSample, FieldTable};
use crate::math::Scalar;
use crate::simulation::SimulationError;

/// Error of one component of a simulated trace.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentError {
    /// Component compared.
    pub component: FieldComponent,
    /// Largest absolute sample difference.
    pub max_abs_diff: Scalar,
    /// Largest reference magnitude.
    pub reference_peak: Scalar,
    /// `100 · max_abs_diff / reference_peak`; `None` for an identically zero reference.
    pub percent: Option<Scalar>,
    /// `20 · log10(max_abs_diff / reference_peak)`; `None` for an identically zero reference.
    pub db: Option<Scalar>,
}

/// Per-component comparison of a simulated trace against the reference.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    components: Vec<ComponentError>,
}

impl ComparisonReport {
    /// Error figures of one component.
    #[must_use]
    pub fn component(&self, component: FieldComponent) -> &ComponentError {
        &self.components[component.index()]
    }

    /// All components, in column order.
    #[must_use]
    pub fn components(&self) -> &[ComponentError] {
        &self.components
    }

    /// Worst relative error in dB over the components with a non-zero reference.
    #[must_use]
    pub fn worst_db(&self) -> Option<Scalar> {
        self.components
            .iter()
            .filter_map(|c| c.db)
            .fold(None, |acc: Option<Scalar>, db| Some(acc.map_or(db, |a| a.max(db))))
    }

    /// True if every component with a non-zero reference is at or below `limit_db`.
    #[must_use]
    pub fn within_db(&self, limit_db: Scalar) -> bool {
        self.components
            .iter()
            .filter_map(|c| c.db)
            .all(|db| db <= limit_db)
    }
}

/// Compares `simulated` sample by sample with `reference`.
pub fn compare(
    reference: &FieldTable,
    simulated: &[FieldSample],
) -> Result<ComparisonReport, SimulationError> {
    if reference.len() != simulated.len() {
        return Err(SimulationError::LengthMismatch {
            expected: reference.len(),
            actual: simulated.len(),
        });
    }
    let components = FieldComponent::ALL
        .into_iter()
        .map(|component| {
            let (max_abs_diff, reference_peak) = reference
                .rows()
                .iter()
                .zip(simulated)
                .fold((0.0, 0.0), |(diff, peak): (Scalar, Scalar), (r, s)| {
                    (
                        diff.max((r[component] - s[component]).abs()),
                        peak.max(r[component].abs()),
                    )
                });
            let ratio = (reference_peak > 0.0).then(|| max_abs_diff / reference_peak);
            ComponentError {
                component,
                max_abs_diff,
                reference_peak,
                percent: ratio.map(|r| 100.0 * r),
                db: ratio.map(|r| 20.0 * r.log10()),
            }
        })
        .collect();
    let report = ComparisonReport { components };
    debug!(worst_db = ?report.worst_db(), samples = reference.len(), "compared trace");
    Ok(report)
}
