use stride_core::GridError;
use thiserror::Error;

/// Errors that can occur while configuring an export session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An external binding was requested for a slot that already holds a
    /// generated expression. Binding is one-shot.
    #[error("right-hand side is already bound to generated expression `{name}`")]
    RhsAlreadyGenerated { name: String },

    /// Grid derivation was asked for zero integration steps.
    #[error("desired number of integration steps must be at least one")]
    ZeroSteps,

    /// A derived grid failed validation.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}
