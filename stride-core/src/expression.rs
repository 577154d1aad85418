/// An opaque handle to a symbolic model expression.
///
/// The differentiation system that builds right-hand-side and sensitivity
/// expressions lives upstream of this workspace. The export stage only needs
/// two facts about an expression: the symbol name it will be emitted under
/// and the number of components it evaluates to.
///
/// A dimension of zero marks an empty handle, the state of a function slot
/// whose expression has not been defined yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ModelExpression {
    name: String,
    dim: usize,
}

impl ModelExpression {
    /// Creates a handle for the expression emitted as `name`, evaluating to
    /// `dim` components.
    pub fn new(name: impl Into<String>, dim: usize) -> Self {
        Self {
            name: name.into(),
            dim,
        }
    }

    /// Returns the symbol name the expression is emitted under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of components the expression evaluates to.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns true when the handle carries no expression.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }
}
