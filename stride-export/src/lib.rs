//! Export-stage configuration for embedded integrators.
//!
//! The types here sit between a continuous-time model and the code emission
//! backend. They fix, once and offline, everything the generated integrator
//! will replay every control cycle: the integration grid, how many internal
//! steps each shooting interval receives, whether the right-hand side and
//! each auxiliary output run as generated code or as external functions, and
//! the layout flags the emitted derivative code is structured against.
//!
//! Configuration is a one-shot, synchronous stage: build an
//! [`ExportSession`], configure it, then hand it read-only to the backend.
//! A session is single-owner for its whole configure-then-emit lifetime.

pub mod session;

pub use session::{Config, Error, ExportSession, OutputSpec, RhsBinding};
