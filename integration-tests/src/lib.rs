//! Shared fixtures for the integration tests.

use stride_core::{Grid, ModelExpression, Namespace};
use stride_export::ExportSession;

/// A shooting grid with interval lengths [1, 2, 1].
///
/// # Panics
///
/// Panics if the grid fails to build, which the fixed points cannot.
#[must_use]
pub fn uneven_shooting_grid() -> Grid {
    Grid::from_points(vec![0.0, 1.0, 3.0, 4.0]).expect("fixture grid should build")
}

/// A session for a four-state vehicle model with a generated right-hand
/// side, namespaced `veh`.
#[must_use]
pub fn vehicle_session() -> ExportSession {
    let mut session = ExportSession::new(Namespace::new("veh"));
    session.set_rhs(
        ModelExpression::new("veh_rhs", 4),
        ModelExpression::new("veh_rhs_jac", 24),
    );
    session
}
