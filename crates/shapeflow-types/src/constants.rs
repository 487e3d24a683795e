//! Numeric constants and engine defaults.

/// Threshold on ‖e1 × e2‖ below which a triangle is treated as
/// degenerate (zero area) and frame construction fails.
pub const DEGENERATE_AREA_THRESHOLD: f64 = 1.0e-10;
