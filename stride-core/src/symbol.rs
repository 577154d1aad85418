//! Namespace-qualified symbols declared toward the emission backend.

/// Scalar type of an exported variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum DataType {
    Int,
    Real,
}

/// The shared identifier that prefixes every exported symbol name.
///
/// Several generated modules can coexist in one binary only if their
/// exported symbols do not collide, so the namespace is an explicit
/// parameter threaded through every symbol's construction rather than
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Returns the raw prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// Returns `ident` qualified with this namespace, as `prefix_ident`.
    #[must_use]
    pub fn qualify(&self, ident: &str) -> String {
        format!("{}_{ident}", self.0)
    }
}

/// A variable declared toward the emission backend.
///
/// Carries the fully qualified name together with the scalar type and the
/// shape the generated declaration needs. The name is qualified once, at
/// construction, so downstream code never concatenates prefixes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ExportedVariable {
    name: String,
    data_type: DataType,
    rows: usize,
    cols: usize,
}

impl ExportedVariable {
    /// Declares a variable named `ident`, qualified by `namespace`.
    pub fn new(
        namespace: &Namespace,
        ident: &str,
        data_type: DataType,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            name: namespace.qualify(ident),
            data_type,
            rows,
            cols,
        }
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scalar type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true for a 1x1 variable.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }
}
