//! Tolerance defaults for 3D surface measurements (internal).
//!
//! Policy
//! - Heron's radicand is clamped at zero without a tolerance; these constants
//!   only feed diagnostics (degenerate-face counts) and never change the
//!   measured totals.

/// Faces with area at or below this value are reported as degenerate.
pub(crate) const DEGENERATE_AREA_EPS: f64 = 1e-12;
