//! The export session: everything the emission backend queries.

mod binding;
mod config;
mod error;
mod outputs;
mod steps;

pub use binding::RhsBinding;
pub use config::Config;
pub use error::Error;
pub use outputs::OutputSpec;

use stride_core::{DataType, ExportedVariable, Grid, ModelExpression, Namespace};

/// Identifier of the exported integrator reset flag.
const RESET_FLAG_IDENT: &str = "resetIntegrator";

/// One integrator export session: the bridge between a continuous-time
/// model and the discrete, loop-unrolled integration code emitted for it.
///
/// A session owns everything the emission backend queries: the integration
/// grid, per-interval step counts for non-uniform shooting grids, the
/// right-hand-side binding, the registered output functions, and the
/// generation flags. It is configured once, sequentially, then read; it
/// must not be shared across concurrent generation requests.
///
/// Cloning a session value-copies the whole configuration, so a clone can
/// be reconfigured without touching the original.
///
/// # Examples
///
/// ```
/// use stride_core::{Grid, ModelExpression, Namespace};
/// use stride_export::ExportSession;
///
/// let shooting = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0])?;
///
/// let mut session = ExportSession::new(Namespace::new("mpc"));
/// session.derive_grid(&shooting, 8)?;
/// session.set_rhs(
///     ModelExpression::new("mpc_rhs", 4),
///     ModelExpression::new("mpc_rhs_jac", 24),
/// );
///
/// assert_eq!(session.num_steps(), &[2, 4, 2]);
/// assert_eq!(session.rhs_name(), Some("mpc_rhs"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSession {
    namespace: Namespace,
    config: Config,
    reset_flag: ExportedVariable,
    grid: Option<Grid>,
    steps_per_interval: Vec<usize>,
    rhs: Option<RhsBinding>,
    outputs: Vec<OutputSpec>,
}

impl ExportSession {
    /// Creates a session whose exported symbols are qualified by
    /// `namespace`.
    ///
    /// Construction declares the integrator reset flag, a
    /// namespace-qualified integer scalar that generated code reads at the
    /// start of each call to decide whether to discard its internal state.
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        let reset_flag =
            ExportedVariable::new(&namespace, RESET_FLAG_IDENT, DataType::Int, 1, 1);
        Self {
            namespace,
            config: Config::default(),
            reset_flag,
            grid: None,
            steps_per_interval: Vec::new(),
            rhs: None,
            outputs: Vec::new(),
        }
    }

    /// Installs an explicit, possibly non-uniform integration grid.
    ///
    /// Clears the `equidistant` generation flag. Per-interval step counts
    /// derived earlier, if any, are left untouched.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = Some(grid);
        self.config.equidistant = false;
    }

    /// Derives the integration grid from the shooting grid of the outer
    /// optimal-control problem and a desired total number of steps.
    ///
    /// For an equidistant shooting grid the result is one canonical
    /// interval of length `span / N`, subdivided so the requested total is
    /// met; every shooting interval replays the same template and
    /// [`num_steps`](Self::num_steps) stays empty. For a non-equidistant
    /// shooting grid the result is a single generic step of size
    /// `span / desired_steps` plus one step count per shooting interval,
    /// sized so no interval undershoots its true duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroSteps`] when `desired_steps` is zero. The
    /// session is left unchanged on failure.
    pub fn derive_grid(&mut self, ocp_grid: &Grid, desired_steps: usize) -> Result<(), Error> {
        let derived = steps::derive(ocp_grid, desired_steps)?;
        self.grid = Some(derived.grid);
        self.steps_per_interval = derived.steps_per_interval;
        Ok(())
    }

    /// Binds the main right-hand side to generated code.
    ///
    /// `rhs` is the differential-equation expression and `derivative` its
    /// sensitivity expression. Sets the `export_rhs` flag so the backend
    /// emits the function bodies inline. Replaces any previous binding.
    pub fn set_rhs(&mut self, rhs: ModelExpression, derivative: ModelExpression) {
        self.rhs = Some(RhsBinding::Generated { rhs, derivative });
        self.config.export_rhs = true;
    }

    /// Binds the main right-hand side to an externally supplied function.
    ///
    /// Stores the two symbol names and clears the `export_rhs` flag so the
    /// backend emits calls instead of function bodies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RhsAlreadyGenerated`] when a generated expression
    /// of nonzero dimension is already bound; the binding is one-shot and
    /// the session is left unchanged.
    pub fn bind_external_rhs(
        &mut self,
        name: impl Into<String>,
        derivative_name: impl Into<String>,
    ) -> Result<(), Error> {
        if let Some(RhsBinding::Generated { rhs, .. }) = &self.rhs {
            if !rhs.is_empty() {
                return Err(Error::RhsAlreadyGenerated {
                    name: rhs.name().to_owned(),
                });
            }
        }
        self.rhs = Some(RhsBinding::External {
            name: name.into(),
            derivative_name: derivative_name.into(),
        });
        self.config.export_rhs = false;
        Ok(())
    }

    /// Appends an auxiliary output function.
    ///
    /// Outputs accumulate for the lifetime of the session; there is no
    /// removal.
    pub fn register_output(&mut self, output: OutputSpec) {
        self.outputs.push(output);
    }

    /// The namespace qualifying every symbol this session exports.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The generation flags the backend emits against.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the generation flags.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The exported reset flag declared at construction.
    #[must_use]
    pub fn reset_flag(&self) -> &ExportedVariable {
        &self.reset_flag
    }

    /// The integration grid, once one is configured.
    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Per-interval integration step counts.
    ///
    /// Empty while the shooting grid is equidistant, in which case the
    /// grid itself carries the single step template.
    #[must_use]
    pub fn num_steps(&self) -> &[usize] {
        &self.steps_per_interval
    }

    /// Returns true while every shooting interval uses the same step
    /// template, which is exactly when [`num_steps`](Self::num_steps) is
    /// empty.
    #[must_use]
    pub fn equidistant_control_grid(&self) -> bool {
        self.steps_per_interval.is_empty()
    }

    /// The right-hand-side binding, once one is installed.
    #[must_use]
    pub fn rhs(&self) -> Option<&RhsBinding> {
        self.rhs.as_ref()
    }

    /// Exported name of the right-hand-side function, however it is bound.
    #[must_use]
    pub fn rhs_name(&self) -> Option<&str> {
        self.rhs.as_ref().map(RhsBinding::name)
    }

    /// Exported name of the right-hand-side derivative function.
    #[must_use]
    pub fn rhs_derivative_name(&self) -> Option<&str> {
        self.rhs.as_ref().map(RhsBinding::derivative_name)
    }

    /// All registered outputs, in registration order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputSpec] {
        &self.outputs
    }

    /// The output registered at `index`, if any.
    #[must_use]
    pub fn output(&self, index: usize) -> Option<&OutputSpec> {
        self.outputs.get(index)
    }

    /// Exported name of the output at `index`, however it is bound.
    #[must_use]
    pub fn output_name(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).map(OutputSpec::name)
    }

    /// Number of components of the output at `index`.
    #[must_use]
    pub fn output_dim(&self, index: usize) -> Option<usize> {
        self.outputs.get(index).map(OutputSpec::dim)
    }

    /// Exported name of the derivative of the output at `index`.
    #[must_use]
    pub fn output_derivative_name(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).map(OutputSpec::derivative_name)
    }

    /// Value-copied expressions of the generated outputs, in registration
    /// order.
    #[must_use]
    pub fn output_expressions(&self) -> Vec<ModelExpression> {
        self.outputs
            .iter()
            .filter_map(|output| output.expression().cloned())
            .collect()
    }

    /// Value-copied grids of all registered outputs, in registration order.
    #[must_use]
    pub fn output_grids(&self) -> Vec<Grid> {
        self.outputs
            .iter()
            .map(|output| output.grid().clone())
            .collect()
    }

    /// Index of the shooting interval owning a scaled query time, once a
    /// grid is configured.
    ///
    /// See [`Grid::interval_index`] for the query conventions.
    #[must_use]
    pub fn interval_index(&self, time: f64) -> Option<usize> {
        self.grid.as_ref().map(|grid| grid.interval_index(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn session() -> ExportSession {
        ExportSession::new(Namespace::new("sim"))
    }

    #[test]
    fn new_session_declares_the_reset_flag() {
        let session = session();

        assert_eq!(session.reset_flag().name(), "sim_resetIntegrator");
        assert!(session.reset_flag().is_scalar());
        assert_eq!(session.reset_flag().data_type(), DataType::Int);
        assert_eq!(session.config(), &Config::default());
        assert!(session.grid().is_none());
        assert!(session.rhs().is_none());
        assert!(session.outputs().is_empty());
    }

    #[test]
    fn explicit_grid_clears_the_equidistant_flag() {
        let mut session = session();
        let grid = Grid::from_points(vec![0.0, 0.3, 1.0]).expect("should build");

        session.set_grid(grid);

        assert!(!session.config().equidistant);
        assert!(session.grid().is_some());
        // The step vector is untouched, so the control grid still counts
        // as equidistant.
        assert!(session.equidistant_control_grid());
    }

    #[test]
    fn derivation_from_equidistant_shooting_grid() {
        let mut session = session();
        let shooting = Grid::from_range(0.0, 10.0, 6).expect("should build");

        session.derive_grid(&shooting, 23).expect("should derive");

        let grid = session.grid().expect("grid should be configured");
        assert_eq!(grid.num_points(), 6);
        assert_relative_eq!(grid.span(), 2.0);
        assert!(session.num_steps().is_empty());
        assert!(session.equidistant_control_grid());
    }

    #[test]
    fn derivation_from_non_equidistant_shooting_grid() {
        let mut session = session();
        let shooting = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0]).expect("should build");

        session.derive_grid(&shooting, 8).expect("should derive");

        assert_eq!(session.num_steps(), &[2, 4, 2]);
        assert!(!session.equidistant_control_grid());

        let grid = session.grid().expect("grid should be configured");
        assert_eq!(grid.num_points(), 2);
        assert_relative_eq!(grid.last_time(), 0.5);
    }

    #[test]
    fn zero_desired_steps_leaves_the_session_unchanged() {
        let mut session = session();
        let shooting = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0]).expect("should build");
        session.derive_grid(&shooting, 8).expect("should derive");

        let before = session.clone();
        let result = session.derive_grid(&shooting, 0);

        assert!(matches!(result, Err(Error::ZeroSteps)));
        assert_eq!(session, before);
    }

    #[test]
    fn external_rhs_clears_the_inline_flag() {
        let mut session = session();

        session
            .bind_external_rhs("plant_ode", "plant_ode_jac")
            .expect("should bind");

        assert!(!session.config().export_rhs);
        assert_eq!(session.rhs_name(), Some("plant_ode"));
        assert_eq!(session.rhs_derivative_name(), Some("plant_ode_jac"));
    }

    #[test]
    fn external_rhs_cannot_override_a_generated_model() {
        let mut session = session();
        session.set_rhs(
            ModelExpression::new("crane_rhs", 6),
            ModelExpression::new("crane_rhs_jac", 48),
        );

        let result = session.bind_external_rhs("plant_ode", "plant_ode_jac");

        assert!(matches!(
            result,
            Err(Error::RhsAlreadyGenerated { ref name }) if name == "crane_rhs"
        ));
        // Nothing about the binding moved.
        assert!(session.config().export_rhs);
        assert_eq!(session.rhs_name(), Some("crane_rhs"));
        assert_eq!(session.rhs_derivative_name(), Some("crane_rhs_jac"));
    }

    #[test]
    fn empty_generated_rhs_may_still_be_replaced() {
        let mut session = session();
        session.set_rhs(
            ModelExpression::new("placeholder", 0),
            ModelExpression::new("placeholder_jac", 0),
        );

        session
            .bind_external_rhs("plant_ode", "plant_ode_jac")
            .expect("an empty expression does not block binding");

        assert_eq!(session.rhs_name(), Some("plant_ode"));
    }

    #[test]
    fn outputs_accumulate_in_registration_order() {
        let mut session = session();
        let coarse = Grid::from_range(0.0, 1.0, 3).expect("should build");
        let fine = Grid::from_range(0.0, 1.0, 11).expect("should build");

        session.register_output(OutputSpec::generated(
            ModelExpression::new("tire_forces", 4),
            ModelExpression::new("tire_forces_jac", 32),
            fine.clone(),
        ));
        session.register_output(OutputSpec::external(
            "imu_model",
            "imu_model_jac",
            6,
            coarse,
        ));

        assert_eq!(session.outputs().len(), 2);
        assert_eq!(session.output(0).map(OutputSpec::name), Some("tire_forces"));
        assert_eq!(session.output(1).map(OutputSpec::dim), Some(6));
        assert!(session.output(2).is_none());

        // The indexed accessors dispatch the same way for both origins.
        assert_eq!(session.output_name(0), Some("tire_forces"));
        assert_eq!(session.output_derivative_name(0), Some("tire_forces_jac"));
        assert_eq!(session.output_dim(0), Some(4));
        assert_eq!(session.output_name(1), Some("imu_model"));
        assert_eq!(session.output_derivative_name(1), Some("imu_model_jac"));
        assert_eq!(session.output_dim(1), Some(6));
        assert_eq!(session.output_name(2), None);

        // Only the generated output contributes an expression; both
        // contribute their grids.
        assert_eq!(session.output_expressions().len(), 1);
        assert_eq!(session.output_grids().len(), 2);
        assert_eq!(session.output_grids()[0], fine);
    }

    #[test]
    fn interval_lookup_requires_a_configured_grid() {
        let mut session = session();
        assert_eq!(session.interval_index(0.5), None);

        let grid = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0]).expect("should build");
        session.set_grid(grid);

        assert_eq!(session.interval_index(0.0), Some(0));
        assert_eq!(session.interval_index(0.5), Some(1));
        assert_eq!(session.interval_index(1.0), Some(2));
    }

    #[test]
    fn cloned_sessions_are_isolated() {
        let mut original = session();
        let shooting = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0]).expect("should build");
        original.derive_grid(&shooting, 8).expect("should derive");

        let mut copy = original.clone();
        let other = Grid::from_range(0.0, 1.0, 4).expect("should build");
        copy.set_grid(other);
        copy.config_mut().sparse_jacobian = true;

        let grid = original.grid().expect("grid should be configured");
        assert_eq!(grid.num_points(), 2);
        assert_relative_eq!(grid.last_time(), 0.5);
        assert!(!original.config().sparse_jacobian);
        assert!(original.config().equidistant);
    }
}
