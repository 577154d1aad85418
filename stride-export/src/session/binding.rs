use stride_core::ModelExpression;

/// How the main right-hand side executes in generated code.
///
/// Either the generator owns the expressions and emits the function bodies,
/// or the caller supplies the symbol names of functions linked in from
/// outside. The derivative entry feeds the sensitivity propagation and
/// follows the same choice as the right-hand side itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RhsBinding {
    /// Emit the right-hand side and its derivative from these expressions.
    Generated {
        rhs: ModelExpression,
        derivative: ModelExpression,
    },
    /// Call externally supplied functions with these symbol names.
    External {
        name: String,
        derivative_name: String,
    },
}

impl RhsBinding {
    /// Exported name of the right-hand-side function, regardless of origin.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Generated { rhs, .. } => rhs.name(),
            Self::External { name, .. } => name,
        }
    }

    /// Exported name of the derivative function, regardless of origin.
    #[must_use]
    pub fn derivative_name(&self) -> &str {
        match self {
            Self::Generated { derivative, .. } => derivative.name(),
            Self::External {
                derivative_name, ..
            } => derivative_name,
        }
    }

    /// Returns true when the generator owns the expressions.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}
