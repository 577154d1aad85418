use stride_core::{Grid, ModelExpression};

/// One auxiliary output function evaluated along the integration.
///
/// Each output carries its own grid, which may be finer than the main
/// integration grid when the caller wants denser output reporting, and its
/// own choice between generated and external execution, independent of how
/// the right-hand side is bound.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    kind: OutputKind,
    grid: Grid,
}

#[derive(Debug, Clone, PartialEq)]
enum OutputKind {
    Generated {
        expr: ModelExpression,
        derivative: ModelExpression,
    },
    External {
        name: String,
        derivative_name: String,
        dim: usize,
    },
}

impl OutputSpec {
    /// An output emitted from owned expressions, sampled on `grid`.
    #[must_use]
    pub fn generated(expr: ModelExpression, derivative: ModelExpression, grid: Grid) -> Self {
        Self {
            kind: OutputKind::Generated { expr, derivative },
            grid,
        }
    }

    /// An output calling an externally supplied function of `dim`
    /// components, sampled on `grid`.
    #[must_use]
    pub fn external(
        name: impl Into<String>,
        derivative_name: impl Into<String>,
        dim: usize,
        grid: Grid,
    ) -> Self {
        Self {
            kind: OutputKind::External {
                name: name.into(),
                derivative_name: derivative_name.into(),
                dim,
            },
            grid,
        }
    }

    /// Exported name of the output function, regardless of origin.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            OutputKind::Generated { expr, .. } => expr.name(),
            OutputKind::External { name, .. } => name,
        }
    }

    /// Exported name of the output's derivative function.
    #[must_use]
    pub fn derivative_name(&self) -> &str {
        match &self.kind {
            OutputKind::Generated { derivative, .. } => derivative.name(),
            OutputKind::External {
                derivative_name, ..
            } => derivative_name,
        }
    }

    /// Number of components the output evaluates to.
    #[must_use]
    pub fn dim(&self) -> usize {
        match &self.kind {
            OutputKind::Generated { expr, .. } => expr.dim(),
            OutputKind::External { dim, .. } => *dim,
        }
    }

    /// The grid this output is sampled on.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The owned expression, present only for generated outputs.
    #[must_use]
    pub fn expression(&self) -> Option<&ModelExpression> {
        match &self.kind {
            OutputKind::Generated { expr, .. } => Some(expr),
            OutputKind::External { .. } => None,
        }
    }

    /// Returns true when the generator owns the expressions.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self.kind, OutputKind::Generated { .. })
    }
}
