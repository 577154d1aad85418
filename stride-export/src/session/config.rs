/// Generation-wide flags read by the emission backend.
///
/// Grouped into one value so the backend threads a single reference through
/// the pipeline instead of consulting free-standing booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Emit the right-hand side inline instead of calling an external
    /// function.
    pub export_rhs: bool,
    /// The integration grid is uniform, so one step template serves every
    /// shooting interval.
    pub equidistant: bool,
    /// Export derivative matrices in compressed-row layout instead of dense.
    pub sparse_jacobian: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_rhs: true,
            equidistant: true,
            sparse_jacobian: false,
        }
    }
}
